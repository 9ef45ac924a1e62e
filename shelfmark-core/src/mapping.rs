//! Conversion of raw provider payloads into candidates and resolved records.

use chrono::{Datelike, NaiveDate};

use crate::google_books::{IndustryIdentifier, Volume, VolumeInfo};
use crate::isbn::Isbn;
use crate::open_library::{Book, SearchDoc};
use crate::{BookRecord, Candidate, IdKind, ProviderIds, RawRecord, RawResult, Source};

const OPEN_LIBRARY_COVER_URL: &str = "https://covers.openlibrary.org/b/id";

/// Convert a search payload into candidates, preserving provider order.
///
/// Entries without a derivable name are discarded.
#[must_use]
pub fn candidates_from(raw: &RawResult) -> Vec<Candidate> {
    let out: Vec<Candidate> = match raw {
        RawResult::GoogleBooks(resp) => resp.items.iter().filter_map(volume_candidate).collect(),
        RawResult::OpenLibraryBooks(resp) => {
            resp.iter().filter_map(|(_, book)| book_candidate(book)).collect()
        }
        RawResult::OpenLibrarySearch(resp) => resp.docs.iter().filter_map(doc_candidate).collect(),
    };
    #[cfg(feature = "tracing")]
    tracing::trace!(source = %raw.source(), count = out.len(), "mapped candidates");
    out
}

/// Map a fetched record into output fields. Returns `None` when the record has no title.
#[must_use]
pub fn record_from(raw: &RawRecord) -> Option<BookRecord> {
    match raw {
        RawRecord::GoogleBooks(volume) => volume_record(volume),
        RawRecord::OpenLibrary(book) => book_record(book),
    }
}

/// Parse a free-text publication date.
///
/// Accepts ISO dates (`2005-08-02`, `2005-08`, `2005`) and the English long forms sources
/// emit (`August 2, 2005`, `Aug 2, 2005`, `2 August 2005`, `August 2005`). Partial dates
/// resolve to the first day of the period.
#[must_use]
pub fn parse_publication_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim().trim_end_matches('.');
    const FULL: [&str; 5] = ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];
    for fmt in FULL {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    const MONTH: [&str; 3] = ["%Y-%m", "%B %Y", "%b %Y"];
    for fmt in MONTH {
        let padded = format!("1 {text}");
        let fmt_padded = format!("%d {fmt}");
        if let Ok(d) = NaiveDate::parse_from_str(&padded, &fmt_padded) {
            return Some(d);
        }
    }
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }
    None
}

fn display_name(title: Option<&str>, subtitle: Option<&str>) -> Option<String> {
    let title = title.map(str::trim).filter(|t| !t.is_empty())?;
    match subtitle.map(str::trim).filter(|s| !s.is_empty()) {
        Some(sub) => Some(format!("{title}: {sub}")),
        None => Some(title.to_string()),
    }
}

/// Pick a normalized ISBN, preferring a valid ISBN-13 and upgrading a valid ISBN-10.
fn preferred_isbn<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let parsed: Vec<Isbn> = values
        .into_iter()
        .filter_map(|v| Isbn::parse(v).ok())
        .collect();
    parsed
        .iter()
        .find(|i| matches!(i, Isbn::Isbn13(_)))
        .or_else(|| parsed.first())
        .map(Isbn::to_isbn13)
}

fn google_isbn(ids: &[IndustryIdentifier]) -> Option<String> {
    preferred_isbn(
        ids.iter()
            .filter(|i| {
                i.kind
                    .as_deref()
                    .is_some_and(|k| k.to_ascii_uppercase().contains("ISBN"))
            })
            .filter_map(|i| i.identifier.as_deref()),
    )
}

fn open_library_isbn(book: &Book) -> Option<String> {
    let ids = book.identifiers.as_ref()?;
    preferred_isbn(ids.isbn_13.iter().chain(&ids.isbn_10).map(String::as_str))
}

fn volume_candidate(volume: &Volume) -> Option<Candidate> {
    let info = volume.volume_info.as_ref()?;
    let name = display_name(info.title.as_deref(), info.subtitle.as_deref())?;
    let mut c = Candidate::new(Source::GoogleBooks, name);
    c.authors.clone_from(&info.authors);
    c.overview.clone_from(&info.description);
    c.year = info
        .published_date
        .as_deref()
        .and_then(parse_publication_date)
        .map(|d| d.year());
    c.image_url = info
        .image_links
        .as_ref()
        .and_then(|l| l.largest())
        .map(str::to_string);
    c.ids = volume_ids(volume, info);
    Some(c)
}

fn volume_ids(volume: &Volume, info: &VolumeInfo) -> ProviderIds {
    let mut ids = ProviderIds::new();
    if let Some(id) = &volume.id {
        ids.set(IdKind::GoogleBooks, id.clone());
    }
    if let Some(isbn) = google_isbn(&info.industry_identifiers) {
        ids.set(IdKind::Isbn, isbn);
    }
    ids
}

fn book_candidate(book: &Book) -> Option<Candidate> {
    let name = display_name(book.title.as_deref(), book.subtitle.as_deref())?;
    let mut c = Candidate::new(Source::OpenLibrary, name);
    c.authors = book.authors.iter().filter_map(|a| a.name.clone()).collect();
    c.overview = book.excerpts.iter().find_map(|e| e.text.clone());
    c.year = book
        .publish_date
        .as_deref()
        .and_then(parse_publication_date)
        .map(|d| d.year());
    c.image_url = book.cover.as_ref().and_then(|cv| cv.largest()).map(str::to_string);
    c.ids = book_ids(book);
    Some(c)
}

fn book_ids(book: &Book) -> ProviderIds {
    let mut ids = ProviderIds::new();
    if let Some(url) = &book.url {
        ids.set(IdKind::OpenLibrary, url.clone());
    }
    if let Some(isbn) = open_library_isbn(book) {
        ids.set(IdKind::Isbn, isbn);
    }
    ids
}

fn doc_candidate(doc: &SearchDoc) -> Option<Candidate> {
    let name = display_name(doc.title.as_deref(), doc.subtitle.as_deref())?;
    let mut c = Candidate::new(Source::OpenLibrary, name);
    c.authors.clone_from(&doc.author_name);
    c.year = doc.first_publish_year;
    c.image_url = doc
        .cover_id
        .map(|id| format!("{OPEN_LIBRARY_COVER_URL}/{id}-L.jpg"));
    if let Some(key) = &doc.key {
        c.ids.set(IdKind::OpenLibrary, key.clone());
    }
    if let Some(isbn) = preferred_isbn(doc.isbn.iter().map(String::as_str)) {
        c.ids.set(IdKind::Isbn, isbn);
    }
    Some(c)
}

fn volume_record(volume: &Volume) -> Option<BookRecord> {
    let info = volume.volume_info.as_ref()?;
    let name = display_name(info.title.as_deref(), info.subtitle.as_deref())?;
    let date = info.published_date.as_deref().and_then(parse_publication_date);
    Some(BookRecord {
        name,
        overview: info.description.clone(),
        authors: info.authors.clone(),
        publishers: info
            .publisher
            .iter()
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .collect(),
        premiere_date: date,
        year: date.map(|d| d.year()),
        genres: info.categories.clone(),
        // 5-point scale upstream
        community_rating: info.average_rating.map(|r| (r * 2.0) as f32),
        language: info
            .language
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(str::to_uppercase),
        image_url: info
            .image_links
            .as_ref()
            .and_then(|l| l.largest())
            .map(str::to_string),
        ids: volume_ids(volume, info),
    })
}

fn book_record(book: &Book) -> Option<BookRecord> {
    let name = display_name(book.title.as_deref(), book.subtitle.as_deref())?;
    let date = book.publish_date.as_deref().and_then(parse_publication_date);
    let excerpts: Vec<&str> = book
        .excerpts
        .iter()
        .filter_map(|e| e.text.as_deref())
        .collect();
    Some(BookRecord {
        name,
        overview: (!excerpts.is_empty()).then(|| excerpts.join("\n\n")),
        authors: book.authors.iter().filter_map(|a| a.name.clone()).collect(),
        publishers: book
            .publishers
            .iter()
            .filter_map(|p| p.name.clone())
            .filter(|n| !n.is_empty())
            .collect(),
        premiere_date: date,
        year: date.map(|d| d.year()),
        genres: book
            .subjects
            .iter()
            .filter_map(|s| s.name.clone())
            .filter(|n| !n.is_empty())
            .collect(),
        community_rating: None,
        language: None,
        image_url: book.cover.as_ref().and_then(|c| c.largest()).map(str::to_string),
        ids: book_ids(book),
    })
}
