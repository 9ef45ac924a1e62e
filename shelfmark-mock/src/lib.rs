//! Deterministic providers for tests and examples.
//!
//! [`MockProvider`] answers from a small static catalogue (Dune, The Hobbit, Good Omens,
//! War and Peace) in the payload shape of the source it impersonates. A few magic inputs
//! force failure paths:
//!
//! - `"FAIL"`: `SourceUnavailable`
//! - `"MALFORMED"`: `MalformedResponse`
//! - `"TIMEOUT"`: sleeps for 30 seconds before answering
//!
//! [`DynamicMockProvider`] defers every answer to a test-side controller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use shelfmark_core::isbn;
use shelfmark_core::{ProviderClient, RawRecord, RawResult, ShelfmarkError, Source};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior, RecordedCall};
use fixtures::catalogue::{self, BOOKS};
use fixtures::{google_books, open_library};

/// Number of calls observed per provider operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `search_by_identifier` calls.
    pub identifier: usize,
    /// `search_by_title_author` calls.
    pub text: usize,
    /// `fetch_by_native_id` calls.
    pub fetch: usize,
}

impl CallCounts {
    /// Sum over all operations.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.identifier + self.text + self.fetch
    }
}

/// Fixture-backed provider for one source.
#[derive(Debug)]
pub struct MockProvider {
    source: Source,
    identifier_calls: AtomicUsize,
    text_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockProvider {
    /// A mock answering in `source`'s payload shapes.
    #[must_use]
    pub const fn new(source: Source) -> Self {
        Self {
            source,
            identifier_calls: AtomicUsize::new(0),
            text_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// A Google Books mock.
    #[must_use]
    pub const fn google_books() -> Self {
        Self::new(Source::GoogleBooks)
    }

    /// An Open Library mock.
    #[must_use]
    pub const fn open_library() -> Self {
        Self::new(Source::OpenLibrary)
    }

    /// Calls observed so far.
    #[must_use]
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            identifier: self.identifier_calls.load(Ordering::SeqCst),
            text: self.text_calls.load(Ordering::SeqCst),
            fetch: self.fetch_calls.load(Ordering::SeqCst),
        }
    }

    async fn maybe_fail_or_timeout(&self, input: &str) -> Result<(), ShelfmarkError> {
        match input {
            "FAIL" => Err(ShelfmarkError::unavailable(
                self.source,
                "forced failure: 503 Service Unavailable",
            )),
            "MALFORMED" => Err(ShelfmarkError::malformed(
                self.source,
                "expected value at line 1 column 1",
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    fn name(&self) -> &'static str {
        match self.source {
            Source::GoogleBooks => "mock-google-books",
            Source::OpenLibrary => "mock-open-library",
        }
    }

    fn source(&self) -> Source {
        self.source
    }

    async fn search_by_identifier(&self, isbn: &str) -> Result<Option<RawResult>, ShelfmarkError> {
        self.identifier_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail_or_timeout(isbn).await?;
        let normalized = isbn::normalize(isbn);
        let Some(book) = catalogue::by_isbn(&normalized).next() else {
            return Ok(None);
        };
        Ok(Some(match self.source {
            Source::GoogleBooks => RawResult::GoogleBooks(google_books::response([book])),
            Source::OpenLibrary => {
                RawResult::OpenLibraryBooks(open_library::books_response(&normalized, book))
            }
        }))
    }

    async fn search_by_title_author(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<Option<RawResult>, ShelfmarkError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail_or_timeout(title).await?;
        let matches: Vec<_> = catalogue::by_title_author(title, author).collect();
        if matches.is_empty() {
            return Ok(None);
        }
        Ok(Some(match self.source {
            Source::GoogleBooks => RawResult::GoogleBooks(google_books::response(matches)),
            Source::OpenLibrary => {
                RawResult::OpenLibrarySearch(open_library::search_response(matches))
            }
        }))
    }

    async fn fetch_by_native_id(&self, id: &str) -> Result<Option<RawRecord>, ShelfmarkError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail_or_timeout(id).await?;
        let found = BOOKS.iter().find(|b| match self.source {
            Source::GoogleBooks => b.google_id == id,
            Source::OpenLibrary => b.edition_url == id || b.work_key == id,
        });
        Ok(found.map(|b| match self.source {
            Source::GoogleBooks => RawRecord::GoogleBooks(google_books::volume(b)),
            Source::OpenLibrary => RawRecord::OpenLibrary(open_library::book(b)),
        }))
    }
}
