//! Per-source resolution pipeline.
//!
//! `search` walks cache check, rate wait, identifier search, fallback text search, then
//! scoring, filtering and sorting, and finally stores the list in the cache. Collaborator
//! failures are absorbed at each stage; only cancellation reaches the caller.

use std::cmp::Reverse;
use std::future::Future;
use std::sync::Arc;

use shelfmark_core::isbn::{self, Isbn};
use shelfmark_core::similarity::normalize_title;
use shelfmark_core::{
    BookRecord, Candidate, ProviderClient, Query, RawRecord, RawResult, ResolverSettings,
    ScoredCandidate, ShelfmarkError, Source, candidates_from, composite_score, record_from,
};
use shelfmark_middleware::{ResultCache, SlidingWindow, generate_key};
use tokio_util::sync::CancellationToken;

/// Cache of scored search results shared by resolvers.
pub type SearchCache = ResultCache<Arc<Vec<ScoredCandidate>>>;

/// Default capacity of a resolver-owned cache.
pub const DEFAULT_CACHE_ENTRIES: usize = 1000;

const AUTHOR_SEPARATOR: &str = " by ";

/// Derive an author from a `"<title> by <author>"` string.
///
/// Splits on the literal, case-sensitive `" by "` and returns the last non-empty segment.
/// A title that merely contains the phrase (e.g. `"Stand by Me"`) mis-splits; callers that know
/// the author should set it explicitly.
#[must_use]
pub fn author_from_title(title: &str) -> Option<&str> {
    if !title.contains(AUTHOR_SEPARATOR) {
        return None;
    }
    title
        .split(AUTHOR_SEPARATOR)
        .filter(|s| !s.is_empty())
        .last()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Resolves queries against a single source.
pub struct SourceResolver {
    provider: Arc<dyn ProviderClient>,
    settings: ResolverSettings,
    window: Arc<SlidingWindow>,
    cache: Arc<SearchCache>,
}

impl std::fmt::Debug for SourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceResolver")
            .field("provider", &self.provider.name())
            .field("source", &self.provider.source())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SourceResolver {
    /// A resolver with its own rate window (the source's default limit) and cache.
    #[must_use]
    pub fn new(provider: Arc<dyn ProviderClient>, settings: ResolverSettings) -> Self {
        let window = Arc::new(SlidingWindow::new(provider.source().default_rate_limit()));
        let cache = Arc::new(SearchCache::new(DEFAULT_CACHE_ENTRIES, settings.cache_ttl));
        Self::with_shared(provider, settings, window, cache)
    }

    /// A resolver using an externally owned rate window and cache.
    #[must_use]
    pub const fn with_shared(
        provider: Arc<dyn ProviderClient>,
        settings: ResolverSettings,
        window: Arc<SlidingWindow>,
        cache: Arc<SearchCache>,
    ) -> Self {
        Self {
            provider,
            settings,
            window,
            cache,
        }
    }

    /// The source this resolver queries.
    #[must_use]
    pub fn source(&self) -> Source {
        self.provider.source()
    }

    /// Matching and caching settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// The rate window admissions are recorded in.
    #[must_use]
    pub const fn window(&self) -> &Arc<SlidingWindow> {
        &self.window
    }

    /// Cache key for `query`: the source name plus the normalized ISBN, or else the
    /// normalized title. `None` when the query carries neither.
    #[must_use]
    pub fn cache_key(&self, query: &Query) -> Option<String> {
        let ident = match query.isbn_str() {
            Some(raw) => isbn::normalize(raw),
            None => normalize_title(query.title_str()?),
        };
        (!ident.is_empty()).then(|| generate_key(self.source().name(), &ident))
    }

    /// Drop the cached search result stored under an ISBN or a title.
    ///
    /// Returns true if an entry was removed.
    pub fn invalidate(&self, identifier: &str) -> bool {
        let name = self.source().name();
        let by_isbn = self
            .cache
            .remove(&generate_key(name, &isbn::normalize(identifier)));
        let by_title = self
            .cache
            .remove(&generate_key(name, &normalize_title(identifier)));
        by_isbn || by_title
    }

    /// Search the source for candidates matching `query`, best first.
    ///
    /// A cached list is returned without consuming rate budget. Source failures degrade to an
    /// empty list.
    ///
    /// # Errors
    /// Returns `ShelfmarkError::Cancelled` if `cancel` fires while waiting for admission or
    /// during a provider call. Nothing is cached in that case.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "shelfmark::resolver::search",
            skip(self, query, cancel),
            fields(source = %self.source(), title = ?query.title, isbn = ?query.isbn),
        )
    )]
    pub async fn search(
        &self,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<Vec<ScoredCandidate>, ShelfmarkError> {
        let Some(key) = self.cache_key(query) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("query has neither title nor isbn; nothing to search");
            return Ok(Vec::new());
        };

        if let Some(hit) = self.cache.get(&key) {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %key, count = hit.len(), "returning cached results");
            return Ok(Vec::clone(&hit));
        }

        self.window.acquire(cancel).await?;

        let mut candidates = self.identifier_candidates(query, cancel).await?;
        if candidates.is_empty()
            && let Some(title) = query.title_str()
        {
            candidates = self.text_candidates(title, query, cancel).await?;
        }

        if candidates.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::info!(source = %self.source(), "no results found");
            return Ok(Vec::new());
        }

        let results = self.rank(query, candidates);
        self.cache
            .set(key, Arc::new(results.clone()), Some(self.settings.cache_ttl));

        #[cfg(feature = "tracing")]
        tracing::debug!(count = results.len(), "search complete");

        Ok(results)
    }

    /// Resolve `query` to one full record.
    ///
    /// Uses the source-native id on the query when present; otherwise, or when that fetch
    /// yields nothing, searches and fetches the best candidate.
    ///
    /// # Errors
    /// Returns `ShelfmarkError::Cancelled` if `cancel` fires.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "shelfmark::resolver::resolve",
            skip(self, query, cancel),
            fields(source = %self.source(), title = ?query.title),
        )
    )]
    pub async fn resolve(
        &self,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<Option<BookRecord>, ShelfmarkError> {
        let native = self.source().native_id();

        if let Some(id) = query.ids.get(native) {
            if let Some(record) = self.fetch_record(id, cancel).await? {
                return Ok(Some(record));
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(id, "direct fetch yielded nothing; searching");
        }

        let results = self.search(query, cancel).await?;
        let Some(id) = results
            .first()
            .and_then(|best| best.candidate.native_id())
            .map(str::to_string)
        else {
            return Ok(None);
        };
        self.fetch_record(&id, cancel).await
    }

    async fn fetch_record(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<BookRecord>, ShelfmarkError> {
        self.window.acquire(cancel).await?;
        let raw: Option<RawRecord> = self
            .call("fetch_by_native_id", cancel, self.provider.fetch_by_native_id(id))
            .await?;
        Ok(raw.as_ref().and_then(record_from))
    }

    async fn identifier_candidates(
        &self,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<Vec<Candidate>, ShelfmarkError> {
        if !self.settings.enable_identifier_search {
            return Ok(Vec::new());
        }
        let Some(raw) = query.isbn_str() else {
            return Ok(Vec::new());
        };
        let isbn = match Isbn::parse(raw) {
            Ok(isbn) => isbn,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "skipping identifier search");
                return Ok(Vec::new());
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(isbn = %isbn, "searching by identifier");
        let raw: Option<RawResult> = self
            .call(
                "search_by_identifier",
                cancel,
                self.provider.search_by_identifier(isbn.as_str()),
            )
            .await?;
        Ok(raw.as_ref().map(candidates_from).unwrap_or_default())
    }

    async fn text_candidates(
        &self,
        title: &str,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<Vec<Candidate>, ShelfmarkError> {
        let author = query.author_str().or_else(|| author_from_title(title));

        #[cfg(feature = "tracing")]
        tracing::debug!(title, author, "searching by title/author");
        let raw: Option<RawResult> = self
            .call(
                "search_by_title_author",
                cancel,
                self.provider.search_by_title_author(title, author),
            )
            .await?;
        Ok(raw.as_ref().map(candidates_from).unwrap_or_default())
    }

    /// Score, filter by threshold, stable-sort by descending score and truncate.
    fn rank(&self, query: &Query, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let score = if self.settings.enable_fuzzy_matching {
                    composite_score(query, &candidate)
                } else {
                    100
                };
                ScoredCandidate { candidate, score }
            })
            .filter(|s| s.score >= self.settings.fuzzy_match_threshold)
            .collect();
        scored.sort_by_key(|s| Reverse(s.score));
        scored.truncate(self.settings.max_results);
        scored
    }

    /// Run one provider call under the timeout, absorbing everything except cancellation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "shelfmark::resolver::provider_call",
            skip(self, cancel, fut),
            fields(
                provider = self.provider.name(),
                timeout_ms = u64::try_from(self.settings.provider_timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    async fn call<T, Fut>(
        &self,
        operation: &'static str,
        cancel: &CancellationToken,
        fut: Fut,
    ) -> Result<Option<T>, ShelfmarkError>
    where
        Fut: Future<Output = Result<Option<T>, ShelfmarkError>>,
    {
        let source = self.source();
        let bounded = async {
            tokio::time::timeout(self.settings.provider_timeout, fut)
                .await
                .unwrap_or(Err(ShelfmarkError::ProviderTimeout { provider: source }))
        };
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ShelfmarkError::Cancelled),
            r = bounded => r,
        };
        match outcome {
            Ok(v) => Ok(v),
            Err(e) if !e.is_degradable() => Err(e),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(operation, error = %_e, "provider call failed; treating as no result");
                Ok(None)
            }
        }
    }
}
