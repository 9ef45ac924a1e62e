use std::sync::Arc;
use std::time::Duration;

use shelfmark_core::{ProviderClient, ShelfmarkConfig, ShelfmarkError, Source, SourceSettings};
use shelfmark_middleware::RateGate;

use crate::resolver::{SearchCache, SourceResolver};

/// Orchestrator that fans queries out over the registered sources.
pub struct Shelfmark {
    /// Enabled resolvers, ordered by ascending priority then registration order.
    pub(crate) resolvers: Vec<SourceResolver>,
    pub(crate) cfg: ShelfmarkConfig,
    pub(crate) cache: Arc<SearchCache>,
    pub(crate) gate: Arc<RateGate>,
}

impl std::fmt::Debug for Shelfmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shelfmark")
            .field("resolvers", &self.resolvers)
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a `Shelfmark` orchestrator with custom configuration.
pub struct ShelfmarkBuilder {
    providers: Vec<Arc<dyn ProviderClient>>,
    cfg: ShelfmarkConfig,
}

impl Default for ShelfmarkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShelfmarkBuilder {
    /// Create a builder with the default configuration and no providers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            cfg: ShelfmarkConfig::default(),
        }
    }

    /// Register the provider for one source.
    ///
    /// At most one provider may be registered per source; `build` rejects duplicates.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn ProviderClient>) -> Self {
        self.providers.push(p);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ShelfmarkConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replace the settings entry for one source.
    #[must_use]
    pub fn source_settings(mut self, settings: SourceSettings) -> Self {
        self.cfg.set_source_settings(settings);
        self
    }

    /// Set the per-minute admission limit of a source.
    #[must_use]
    pub fn rate_limit(mut self, source: Source, per_minute: u32) -> Self {
        let mut s = self.cfg.source_settings(source);
        s.rate_limit_per_minute = per_minute;
        self.cfg.set_source_settings(s);
        self
    }

    /// Set the priority of a source (lower runs first).
    #[must_use]
    pub fn priority(mut self, source: Source, priority: u8) -> Self {
        let mut s = self.cfg.source_settings(source);
        s.priority = priority;
        self.cfg.set_source_settings(s);
        self
    }

    /// Enable or disable a source without unregistering its provider.
    #[must_use]
    pub fn enable_source(mut self, source: Source, enabled: bool) -> Self {
        let mut s = self.cfg.source_settings(source);
        s.enabled = enabled;
        self.cfg.set_source_settings(s);
        self
    }

    /// Minimum composite score a candidate needs (0–100).
    #[must_use]
    pub const fn fuzzy_match_threshold(mut self, threshold: u8) -> Self {
        self.cfg.fuzzy_match_threshold = threshold;
        self
    }

    /// Toggle the exact ISBN lookup that precedes text search.
    #[must_use]
    pub const fn enable_identifier_search(mut self, yes: bool) -> Self {
        self.cfg.enable_identifier_search = yes;
        self
    }

    /// Toggle scoring; when off every candidate scores 100.
    #[must_use]
    pub const fn enable_fuzzy_matching(mut self, yes: bool) -> Self {
        self.cfg.enable_fuzzy_matching = yes;
        self
    }

    /// Lifetime of cached search results in hours.
    #[must_use]
    pub const fn cache_ttl_hours(mut self, hours: u64) -> Self {
        self.cfg.cache_ttl_hours = hours;
        self
    }

    /// Maximum number of cached search results across all sources.
    #[must_use]
    pub const fn cache_max_entries(mut self, entries: usize) -> Self {
        self.cfg.cache_max_entries = entries;
        self
    }

    /// Upper bound for a single provider call.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Maximum number of candidates returned per search.
    #[must_use]
    pub const fn max_results(mut self, n: usize) -> Self {
        self.cfg.max_results = n;
        self
    }

    /// Build the `Shelfmark` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration fails validation, no provider was
    /// registered, or two providers claim the same source.
    pub fn build(self) -> Result<Shelfmark, ShelfmarkError> {
        self.cfg.validate()?;
        if self.providers.is_empty() {
            return Err(ShelfmarkError::invalid_config(
                "no providers registered; add at least one via with_provider(...)",
            ));
        }
        for (i, p) in self.providers.iter().enumerate() {
            if self.providers[..i].iter().any(|o| o.source() == p.source()) {
                return Err(ShelfmarkError::invalid_config(format!(
                    "more than one provider registered for {}",
                    p.source()
                )));
            }
        }

        let gate = Arc::new(RateGate::with_limits(
            Source::ALL
                .iter()
                .map(|s| (*s, self.cfg.source_settings(*s).rate_limit_per_minute)),
        ));
        let cache = Arc::new(SearchCache::new(
            self.cfg.cache_max_entries,
            self.cfg.cache_ttl(),
        ));
        let settings = self.cfg.resolver_settings();

        let mut resolvers: Vec<SourceResolver> = self
            .providers
            .into_iter()
            .filter(|p| self.cfg.source_settings(p.source()).enabled)
            .map(|p| {
                let window = gate.window(p.source());
                SourceResolver::with_shared(p, settings, window, Arc::clone(&cache))
            })
            .collect();
        resolvers.sort_by_key(|r| self.cfg.source_settings(r.source()).priority);

        Ok(Shelfmark {
            resolvers,
            cfg: self.cfg,
            cache,
            gate,
        })
    }
}

impl Shelfmark {
    /// Start building a new `Shelfmark` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use shelfmark::{Shelfmark, Source};
    /// use shelfmark_mock::MockProvider;
    ///
    /// let shelfmark = Shelfmark::builder()
    ///     .with_provider(Arc::new(MockProvider::google_books()))
    ///     .with_provider(Arc::new(MockProvider::open_library()))
    ///     .rate_limit(Source::GoogleBooks, 20)
    ///     .fuzzy_match_threshold(80)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ShelfmarkBuilder {
        ShelfmarkBuilder::new()
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &ShelfmarkConfig {
        &self.cfg
    }

    /// Enabled sources in the order they are consulted.
    #[must_use]
    pub fn sources(&self) -> Vec<Source> {
        self.resolvers.iter().map(SourceResolver::source).collect()
    }

    /// The resolver for `source`, if a provider is registered and enabled.
    #[must_use]
    pub fn resolver(&self, source: Source) -> Option<&SourceResolver> {
        self.resolvers.iter().find(|r| r.source() == source)
    }

    /// The shared per-source rate gate.
    #[must_use]
    pub fn rate_gate(&self) -> &RateGate {
        &self.gate
    }

    /// Drop the cached search result for `identifier` (an ISBN or title) on `source`.
    ///
    /// Returns true if an entry was removed.
    pub fn invalidate(&self, source: Source, identifier: &str) -> bool {
        self.resolver(source)
            .is_some_and(|r| r.invalidate(identifier))
    }

    /// Drop every cached search result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
