//! Shelfmark resolves bibliographic queries against multiple metadata sources.
//!
//! Overview
//! - [`SourceResolver`] runs the per-source pipeline: cache lookup, rate-window admission,
//!   exact ISBN search, fallback title/author search, scoring, filtering and caching.
//! - [`Shelfmark`] fans a query out over every enabled source and merges the answers by
//!   priority and score.
//! - Provider failures and timeouts degrade to empty results. Cancellation is the only error a
//!   caller sees from `search` or `resolve`.
//!
//! Key behaviors and trade-offs
//! - Cache hits never touch the rate window; misses consume one admission per search,
//!   covering both the identifier lookup and its text fallback.
//! - Only non-empty provider answers are cached. A list filtered down to nothing by the
//!   threshold is still cached, so a repeated query costs nothing until the entry expires.
//! - Rate windows admit one waiter at a time; a burst of callers is served in whatever order
//!   the slot lock grants, not strictly first-come.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use shelfmark::{CancellationToken, Query, Shelfmark, Source};
//! use shelfmark_mock::MockProvider;
//!
//! let shelfmark = Shelfmark::builder()
//!     .with_provider(Arc::new(MockProvider::google_books()))
//!     .with_provider(Arc::new(MockProvider::open_library()))
//!     .fuzzy_match_threshold(80)
//!     .build()?;
//!
//! let cancel = CancellationToken::new();
//! let query = Query::title("The Hobbit").with_author("J.R.R. Tolkien");
//! let best = shelfmark.search(&query, &cancel).await?;
//! let record = shelfmark.resolve(&query, &cancel).await?;
//! ```
//!
//! See `shelfmark/examples/` for a runnable walkthrough.
#![warn(missing_docs)]

pub(crate) mod core;
pub mod resolver;
mod router;

pub use core::{Shelfmark, ShelfmarkBuilder};
pub use resolver::{SearchCache, SourceResolver, author_from_title};
pub use router::util::{dedup_key, merge_ranked};

pub use shelfmark_middleware::{RateGate, ResultCache, SlidingWindow};
pub use tokio_util::sync::CancellationToken;

// Re-export core types for convenience
pub use shelfmark_core::{
    BookRecord, Candidate, IdKind, Isbn, ProviderClient, ProviderIds, Query, RawRecord,
    RawResult, ResolverSettings, ScoredCandidate, ShelfmarkConfig, ShelfmarkError, Source,
    SourceSettings, composite_score, extract_from_text, normalize_isbn, text_similarity,
};
