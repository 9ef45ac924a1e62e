//! Typed identifier map carried by queries, candidates and resolved records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of identifier stored in a [`ProviderIds`] map.
///
/// String forms (see [`IdKind::as_str`]) are stable and match the keys hosts use for
/// external identifiers: `"ISBN"`, `"GoogleBooksId"`, `"OpenLibraryId"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdKind {
    /// Normalized ISBN (hyphens and whitespace stripped, uppercase). ISBN-13 when known.
    #[serde(rename = "ISBN")]
    Isbn,
    /// Google Books volume id, e.g. `"B1hSG45JCX4C"`.
    #[serde(rename = "GoogleBooksId")]
    GoogleBooks,
    /// Open Library key or url, e.g. `"/works/OL893415W"`.
    #[serde(rename = "OpenLibraryId")]
    OpenLibrary,
}

impl IdKind {
    /// Stable external name of this identifier kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isbn => "ISBN",
            Self::GoogleBooks => "GoogleBooksId",
            Self::OpenLibrary => "OpenLibraryId",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier map keyed by [`IdKind`]; values are source-native id strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderIds(BTreeMap<IdKind, String>);

impl ProviderIds {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Look up an identifier.
    #[must_use]
    pub fn get(&self, kind: IdKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }

    /// Insert or replace an identifier. Empty values are ignored.
    pub fn set(&mut self, kind: IdKind, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(kind, value);
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, kind: IdKind, value: impl Into<String>) -> Self {
        self.set(kind, value);
        self
    }

    /// Remove an identifier, returning it if present.
    pub fn remove(&mut self, kind: IdKind) -> Option<String> {
        self.0.remove(&kind)
    }

    /// True when no identifiers are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(kind, value)` pairs in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (IdKind, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
