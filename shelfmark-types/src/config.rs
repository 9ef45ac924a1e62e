//! Configuration types shared across resolvers and the orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShelfmarkError;
use crate::source::Source;

/// Per-source settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Source these settings apply to.
    pub source: Source,
    /// Whether the orchestrator consults this source at all.
    pub enabled: bool,
    /// Ordering among sources; lower values are consulted and ranked first.
    pub priority: u8,
    /// Admitted outbound lookups per rolling 60-second window.
    pub rate_limit_per_minute: u32,
}

impl SourceSettings {
    /// Documented defaults for a source.
    #[must_use]
    pub const fn defaults_for(source: Source) -> Self {
        Self {
            source,
            enabled: true,
            priority: source.default_priority(),
            rate_limit_per_minute: source.default_rate_limit(),
        }
    }
}

/// Matching and caching behavior of a single source resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Lifetime of cached search results.
    pub cache_ttl: Duration,
    /// Minimum composite score (0–100) a candidate needs to be returned.
    pub fuzzy_match_threshold: u8,
    /// Try an exact ISBN lookup before falling back to text search.
    pub enable_identifier_search: bool,
    /// Score candidates against the query; when off every candidate scores 100.
    pub enable_fuzzy_matching: bool,
    /// Upper bound for a single collaborator call.
    pub provider_timeout: Duration,
    /// Maximum number of candidates returned per search.
    pub max_results: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        ShelfmarkConfig::default().resolver_settings()
    }
}

/// Global configuration for the `Shelfmark` orchestrator.
///
/// Passed explicitly to the builder; there is no process-wide settings lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfmarkConfig {
    /// Per-source settings. Sources without an entry use [`SourceSettings::defaults_for`].
    pub sources: Vec<SourceSettings>,
    /// Cache lifetime in hours.
    pub cache_ttl_hours: u64,
    /// Maximum number of cached entries across all sources.
    pub cache_max_entries: usize,
    /// Minimum composite score (0–100) a candidate needs to be returned.
    pub fuzzy_match_threshold: u8,
    /// Try an exact ISBN lookup before falling back to text search.
    pub enable_identifier_search: bool,
    /// Score candidates against the query; when off every candidate scores 100.
    pub enable_fuzzy_matching: bool,
    /// Upper bound for a single collaborator call.
    pub provider_timeout: Duration,
    /// Maximum number of candidates returned per search.
    pub max_results: usize,
}

impl Default for ShelfmarkConfig {
    fn default() -> Self {
        Self {
            sources: Source::ALL
                .iter()
                .copied()
                .map(SourceSettings::defaults_for)
                .collect(),
            cache_ttl_hours: 24,
            cache_max_entries: 1000,
            fuzzy_match_threshold: 85,
            enable_identifier_search: true,
            enable_fuzzy_matching: true,
            provider_timeout: Duration::from_secs(10),
            max_results: 10,
        }
    }
}

impl ShelfmarkConfig {
    /// Settings for `source`, falling back to the documented defaults.
    #[must_use]
    pub fn source_settings(&self, source: Source) -> SourceSettings {
        self.sources
            .iter()
            .find(|s| s.source == source)
            .copied()
            .unwrap_or_else(|| SourceSettings::defaults_for(source))
    }

    /// Insert or replace the settings entry for its source.
    pub fn set_source_settings(&mut self, settings: SourceSettings) {
        self.sources.retain(|s| s.source != settings.source);
        self.sources.push(settings);
    }

    /// The cache lifetime as a `Duration`.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.saturating_mul(3600))
    }

    /// Project the fields a single source resolver consumes.
    #[must_use]
    pub const fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            cache_ttl: self.cache_ttl(),
            fuzzy_match_threshold: self.fuzzy_match_threshold,
            enable_identifier_search: self.enable_identifier_search,
            enable_fuzzy_matching: self.enable_fuzzy_matching,
            provider_timeout: self.provider_timeout,
            max_results: self.max_results,
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// Returns `ShelfmarkError::InvalidConfig` when the threshold exceeds 100, a rate limit is
    /// zero, a source appears twice, or `max_results` is zero.
    pub fn validate(&self) -> Result<(), ShelfmarkError> {
        if self.fuzzy_match_threshold > 100 {
            return Err(ShelfmarkError::invalid_config(format!(
                "fuzzy_match_threshold must be within 0..=100, got {}",
                self.fuzzy_match_threshold
            )));
        }
        if self.max_results == 0 {
            return Err(ShelfmarkError::invalid_config("max_results must be positive"));
        }
        for (i, s) in self.sources.iter().enumerate() {
            if s.rate_limit_per_minute == 0 {
                return Err(ShelfmarkError::invalid_config(format!(
                    "rate_limit_per_minute for {} must be positive",
                    s.source
                )));
            }
            if self.sources[..i].iter().any(|o| o.source == s.source) {
                return Err(ShelfmarkError::invalid_config(format!(
                    "duplicate settings for {}",
                    s.source
                )));
            }
        }
        Ok(())
    }
}
