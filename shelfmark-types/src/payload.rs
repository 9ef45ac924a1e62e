//! Raw collaborator payloads, one variant per source response shape.

use serde::{Deserialize, Serialize};

use crate::google_books::{Volume, VolumesResponse};
use crate::open_library::{Book, BooksResponse, SearchResponse};
use crate::source::Source;

/// Result of an identifier or text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawResult {
    /// Google Books volume list.
    GoogleBooks(VolumesResponse),
    /// Open Library books API (identifier search).
    OpenLibraryBooks(BooksResponse),
    /// Open Library search API (text search).
    OpenLibrarySearch(SearchResponse),
}

impl RawResult {
    /// Source that produced this payload.
    #[must_use]
    pub const fn source(&self) -> Source {
        match self {
            Self::GoogleBooks(_) => Source::GoogleBooks,
            Self::OpenLibraryBooks(_) | Self::OpenLibrarySearch(_) => Source::OpenLibrary,
        }
    }
}

/// A full record fetched by source-native id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawRecord {
    /// Google Books volume.
    GoogleBooks(Volume),
    /// Open Library edition.
    OpenLibrary(Book),
}

impl RawRecord {
    /// Source that produced this payload.
    #[must_use]
    pub const fn source(&self) -> Source {
        match self {
            Self::GoogleBooks(_) => Source::GoogleBooks,
            Self::OpenLibrary(_) => Source::OpenLibrary,
        }
    }
}
