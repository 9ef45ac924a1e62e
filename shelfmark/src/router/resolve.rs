use shelfmark_core::{BookRecord, Query, ShelfmarkError};
use tokio_util::sync::CancellationToken;

use crate::Shelfmark;

impl Shelfmark {
    /// Resolve `query` to a single full record.
    ///
    /// Sources are tried one at a time in priority order; the first one that yields a record
    /// wins and later sources are not contacted.
    ///
    /// # Errors
    /// Returns `ShelfmarkError::Cancelled` if `cancel` fires.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "shelfmark::resolve",
            skip(self, query, cancel),
            fields(title = ?query.title, isbn = ?query.isbn),
        )
    )]
    pub async fn resolve(
        &self,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<Option<BookRecord>, ShelfmarkError> {
        for resolver in &self.resolvers {
            if let Some(record) = resolver.resolve(query, cancel).await? {
                #[cfg(feature = "tracing")]
                tracing::debug!(source = %resolver.source(), name = %record.name, "resolved");
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}
