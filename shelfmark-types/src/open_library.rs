//! Open Library search and books API payloads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Response of `search.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Total number of matches.
    #[serde(default)]
    pub num_found: u32,
    /// Offset of the first document.
    #[serde(default)]
    pub start: u32,
    /// Matching documents.
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// A work as returned by the search API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDoc {
    /// Work key, e.g. `"/works/OL893415W"` (the source-native id).
    pub key: Option<String>,
    /// Title.
    pub title: Option<String>,
    /// Subtitle.
    pub subtitle: Option<String>,
    /// Author names.
    pub author_name: Vec<String>,
    /// Year of first publication.
    pub first_publish_year: Option<i32>,
    /// ISBNs of all editions.
    pub isbn: Vec<String>,
    /// Publisher names.
    pub publisher: Vec<String>,
    /// Language codes.
    pub language: Vec<String>,
    /// Subjects.
    pub subject: Vec<String>,
    /// Edition key of the cover.
    pub cover_edition_key: Option<String>,
    /// Cover id for `covers.openlibrary.org`.
    #[serde(rename = "cover_i")]
    pub cover_id: Option<i64>,
    /// Number of editions.
    pub edition_count: Option<u32>,
}

/// Key of a Books API response entry.
///
/// Format: `"ISBN:<isbn>"`, echoing the `bibkeys` request parameter. The Books API is only
/// queried by ISBN, so every key in a [`BooksResponse`] has this shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BibKey(String);

impl BibKey {
    /// Key for an ISBN lookup.
    #[must_use]
    pub fn isbn(isbn: &str) -> Self {
        Self(format!("ISBN:{isbn}"))
    }

    /// The ISBN portion of the key, if it has the documented shape.
    #[must_use]
    pub fn isbn_part(&self) -> Option<&str> {
        self.0.strip_prefix("ISBN:")
    }

    /// Raw key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BibKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response of `api/books?jscmd=data`: one edition per requested bib key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BooksResponse(pub BTreeMap<BibKey, Book>);

impl BooksResponse {
    /// Build a response holding a single entry.
    #[must_use]
    pub fn single(key: BibKey, book: Book) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key, book);
        Self(map)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&BibKey, &Book)> {
        self.0.iter()
    }

    /// True when no entries were returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An edition as returned by the books API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    /// Edition url (the source-native id for fetched books).
    pub url: Option<String>,
    /// Title.
    pub title: Option<String>,
    /// Subtitle.
    pub subtitle: Option<String>,
    /// Authors.
    pub authors: Vec<Named>,
    /// Publishers.
    pub publishers: Vec<Named>,
    /// Free-text publication date, e.g. `"August 2, 2005"`.
    pub publish_date: Option<String>,
    /// Identifiers by scheme.
    pub identifiers: Option<Identifiers>,
    /// Subjects.
    pub subjects: Vec<Named>,
    /// Excerpts.
    pub excerpts: Vec<Excerpt>,
    /// Cover images by size.
    pub cover: Option<Cover>,
    /// Number of pages.
    pub number_of_pages: Option<u32>,
}

/// Named entity (author, publisher, subject).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Named {
    /// Url of the entity page.
    pub url: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

/// Identifier lists by scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identifiers {
    /// ISBN-10 values.
    pub isbn_10: Vec<String>,
    /// ISBN-13 values.
    pub isbn_13: Vec<String>,
    /// Open Library edition ids.
    pub openlibrary: Vec<String>,
    /// Goodreads ids.
    pub goodreads: Vec<String>,
}

/// Excerpt text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Excerpt {
    /// The excerpt.
    pub text: Option<String>,
}

/// Cover image urls by size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cover {
    /// Small.
    pub small: Option<String>,
    /// Medium.
    pub medium: Option<String>,
    /// Large.
    pub large: Option<String>,
}

impl Cover {
    /// Largest available image url.
    #[must_use]
    pub fn largest(&self) -> Option<&str> {
        self.large
            .as_deref()
            .or(self.medium.as_deref())
            .or(self.small.as_deref())
    }
}
