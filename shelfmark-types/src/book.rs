//! Request and result types for bibliographic resolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{IdKind, ProviderIds};
use crate::source::Source;

/// A bibliographic lookup request. Immutable once handed to a resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free-text title; may carry a trailing `" by <author>"`.
    pub title: Option<String>,
    /// Author name, when known.
    pub author: Option<String>,
    /// ISBN-10 or ISBN-13 in any common formatting.
    pub isbn: Option<String>,
    /// Publication year.
    pub year: Option<i32>,
    /// Identifiers already known for the item (e.g. a source-native id from a previous match).
    #[serde(default)]
    pub ids: ProviderIds,
}

impl Query {
    /// Start a query from a title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Start a query from an ISBN.
    pub fn isbn(isbn: impl Into<String>) -> Self {
        Self {
            isbn: Some(isbn.into()),
            ..Self::default()
        }
    }

    /// Set the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the ISBN.
    #[must_use]
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Set the publication year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Attach a known identifier.
    #[must_use]
    pub fn with_id(mut self, kind: IdKind, value: impl Into<String>) -> Self {
        self.ids.set(kind, value);
        self
    }

    /// The title, if present and not blank.
    #[must_use]
    pub fn title_str(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// The author, if present and not blank.
    #[must_use]
    pub fn author_str(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }

    /// The ISBN as supplied, if present and not blank.
    #[must_use]
    pub fn isbn_str(&self) -> Option<&str> {
        non_blank(self.isbn.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// One provider record converted into a comparable search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Source the record came from.
    pub source: Source,
    /// Display name: title plus `": subtitle"` when a subtitle exists.
    pub name: String,
    /// Authors as reported by the source.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Short description or excerpt.
    pub overview: Option<String>,
    /// Publication year.
    pub year: Option<i32>,
    /// Cover image url.
    pub image_url: Option<String>,
    /// Source-native id and, when discoverable, a normalized ISBN.
    #[serde(default)]
    pub ids: ProviderIds,
}

impl Candidate {
    /// Create a candidate with only a name.
    pub fn new(source: Source, name: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
            authors: Vec::new(),
            overview: None,
            year: None,
            image_url: None,
            ids: ProviderIds::new(),
        }
    }

    /// The identifier that addresses this candidate on its own source.
    #[must_use]
    pub fn native_id(&self) -> Option<&str> {
        self.ids.get(self.source.native_id())
    }

    /// Authors joined into one string for matching, if any are known.
    #[must_use]
    pub fn author_line(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(self.authors.join(", "))
        }
    }
}

/// A candidate together with its 0–100 match score against the query that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The candidate record.
    pub candidate: Candidate,
    /// Composite match score in `0..=100`.
    pub score: u8,
}

/// A fully fetched record mapped into host-neutral output fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Title plus `": subtitle"` when a subtitle exists.
    pub name: String,
    /// Description or joined excerpts.
    pub overview: Option<String>,
    /// Authors as reported by the source.
    pub authors: Vec<String>,
    /// Publisher names.
    pub publishers: Vec<String>,
    /// Parsed publication date.
    pub premiere_date: Option<NaiveDate>,
    /// Publication year.
    pub year: Option<i32>,
    /// Categories or subjects.
    pub genres: Vec<String>,
    /// Community rating on a 10-point scale.
    pub community_rating: Option<f32>,
    /// Uppercase language code.
    pub language: Option<String>,
    /// Cover image url.
    pub image_url: Option<String>,
    /// Source-native id and normalized ISBN (ISBN-13 preferred).
    pub ids: ProviderIds,
}
