use shelfmark_core::google_books::{
    ImageLinks, IndustryIdentifier, Volume, VolumeInfo, VolumesResponse,
};

use super::catalogue::FixtureBook;

pub fn volume(book: &FixtureBook) -> Volume {
    Volume {
        id: Some(book.google_id.to_string()),
        volume_info: Some(VolumeInfo {
            title: Some(book.title.to_string()),
            subtitle: book.subtitle.map(str::to_string),
            authors: book.authors.iter().map(|a| (*a).to_string()).collect(),
            publisher: Some(book.publisher.to_string()),
            published_date: Some(book.published.to_string()),
            description: Some(book.description.to_string()),
            industry_identifiers: vec![
                IndustryIdentifier {
                    kind: Some("ISBN_10".into()),
                    identifier: Some(book.isbn10.to_string()),
                },
                IndustryIdentifier {
                    kind: Some("ISBN_13".into()),
                    identifier: Some(book.isbn13.to_string()),
                },
            ],
            categories: book.categories.iter().map(|c| (*c).to_string()).collect(),
            average_rating: Some(book.average_rating),
            language: Some(book.language.to_string()),
            image_links: Some(ImageLinks {
                thumbnail: Some(format!(
                    "http://books.google.com/books/content?id={}&printsec=frontcover&img=1&zoom=1",
                    book.google_id
                )),
                ..ImageLinks::default()
            }),
            ..VolumeInfo::default()
        }),
    }
}

pub fn response<'a>(books: impl IntoIterator<Item = &'a FixtureBook>) -> VolumesResponse {
    let items: Vec<Volume> = books.into_iter().map(volume).collect();
    VolumesResponse {
        total_items: u32::try_from(items.len()).unwrap_or(u32::MAX),
        items,
    }
}
