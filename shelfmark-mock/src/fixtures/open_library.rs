use shelfmark_core::open_library::{
    BibKey, Book, BooksResponse, Cover, Excerpt, Identifiers, Named, SearchDoc, SearchResponse,
};

use super::catalogue::FixtureBook;

fn named(values: &[&str]) -> Vec<Named> {
    values
        .iter()
        .map(|v| Named {
            url: None,
            name: Some((*v).to_string()),
        })
        .collect()
}

pub fn book(b: &FixtureBook) -> Book {
    let cover = |size: &str| format!("https://covers.openlibrary.org/b/id/{}-{size}.jpg", b.cover_id);
    Book {
        url: Some(b.edition_url.to_string()),
        title: Some(b.title.to_string()),
        subtitle: b.subtitle.map(str::to_string),
        authors: named(b.authors),
        publishers: named(&[b.publisher]),
        publish_date: Some(b.publish_date_text.to_string()),
        identifiers: Some(Identifiers {
            isbn_10: vec![b.isbn10.to_string()],
            isbn_13: vec![b.isbn13.to_string()],
            ..Identifiers::default()
        }),
        subjects: named(b.categories),
        excerpts: vec![Excerpt {
            text: Some(b.description.to_string()),
        }],
        cover: Some(Cover {
            small: Some(cover("S")),
            medium: Some(cover("M")),
            large: Some(cover("L")),
        }),
        number_of_pages: None,
    }
}

pub fn books_response(isbn: &str, b: &FixtureBook) -> BooksResponse {
    BooksResponse::single(BibKey::isbn(isbn), book(b))
}

pub fn doc(b: &FixtureBook) -> SearchDoc {
    SearchDoc {
        key: Some(b.work_key.to_string()),
        title: Some(b.title.to_string()),
        subtitle: b.subtitle.map(str::to_string),
        author_name: b.authors.iter().map(|a| (*a).to_string()).collect(),
        first_publish_year: Some(b.first_publish_year),
        isbn: vec![b.isbn13.to_string(), b.isbn10.to_string()],
        publisher: vec![b.publisher.to_string()],
        language: vec!["eng".to_string()],
        subject: b.categories.iter().map(|c| (*c).to_string()).collect(),
        cover_id: Some(b.cover_id),
        edition_count: Some(1),
        ..SearchDoc::default()
    }
}

pub fn search_response<'a>(books: impl IntoIterator<Item = &'a FixtureBook>) -> SearchResponse {
    let docs: Vec<SearchDoc> = books.into_iter().map(doc).collect();
    SearchResponse {
        num_found: u32::try_from(docs.len()).unwrap_or(u32::MAX),
        start: 0,
        docs,
    }
}
