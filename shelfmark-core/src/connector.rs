use async_trait::async_trait;

use crate::{RawRecord, RawResult, ShelfmarkError, Source};

/// Fetch-and-deserialize contract for one external metadata source.
///
/// Implementations own transport and payload parsing. `Ok(None)` means the source answered
/// but had nothing for the request. Failures are reported as
/// [`ShelfmarkError::SourceUnavailable`] or [`ShelfmarkError::MalformedResponse`]; resolvers
/// absorb both into an empty result.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// A stable identifier for logs (e.g., "google-books-http", "mock-open-library").
    fn name(&self) -> &'static str;

    /// The source this client talks to. Payloads returned must belong to the same source.
    fn source(&self) -> Source;

    /// Exact lookup by a normalized ISBN.
    async fn search_by_identifier(&self, isbn: &str) -> Result<Option<RawResult>, ShelfmarkError>;

    /// Free-text search by title and optional author.
    async fn search_by_title_author(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<Option<RawResult>, ShelfmarkError>;

    /// Fetch one full record by the source-native id.
    async fn fetch_by_native_id(&self, id: &str) -> Result<Option<RawRecord>, ShelfmarkError>;
}
