use shelfmark_core::{Query, ScoredCandidate, ShelfmarkError};
use tokio_util::sync::CancellationToken;

use crate::Shelfmark;
use crate::router::util::merge_ranked;

impl Shelfmark {
    /// Search every enabled source for candidates matching `query`, best first.
    ///
    /// Behavior:
    /// - Sources are queried concurrently, each through its own rate window and cache.
    /// - A failing or timed-out source contributes nothing; the others still answer.
    /// - Results are merged in priority order, stable-sorted by score, de-duplicated by ISBN
    ///   (or normalized name plus year) and cut to `max_results`.
    ///
    /// # Errors
    /// Returns `ShelfmarkError::Cancelled` if `cancel` fires before every source finished.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "shelfmark::search",
            skip(self, query, cancel),
            fields(sources = self.resolvers.len(), title = ?query.title, isbn = ?query.isbn),
        )
    )]
    pub async fn search(
        &self,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<Vec<ScoredCandidate>, ShelfmarkError> {
        let tasks = self.resolvers.iter().map(|r| r.search(query, cancel));
        let outcomes = futures::future::join_all(tasks).await;

        let mut lists = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            lists.push(outcome?);
        }
        let merged = merge_ranked(lists, self.cfg.max_results);

        #[cfg(feature = "tracing")]
        tracing::debug!(count = merged.len(), "merged search results");

        Ok(merged)
    }
}
