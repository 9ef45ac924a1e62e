//! The closed set of external metadata sources.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::IdKind;

/// An external bibliographic metadata source.
///
/// Every source is a variant here; resolvers are driven generically over
/// [`ProviderClient`](../shelfmark_core/connector/trait.ProviderClient.html) implementations
/// tagged with one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    /// Google Books volumes API.
    GoogleBooks,
    /// Open Library search and books APIs.
    OpenLibrary,
}

impl Source {
    /// All known sources in declaration order.
    pub const ALL: [Self; 2] = [Self::GoogleBooks, Self::OpenLibrary];

    /// Human-readable name; also the cache-key prefix for results from this source.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GoogleBooks => "Google Books",
            Self::OpenLibrary => "Open Library",
        }
    }

    /// The identifier kind that addresses a record natively on this source.
    #[must_use]
    pub const fn native_id(self) -> IdKind {
        match self {
            Self::GoogleBooks => IdKind::GoogleBooks,
            Self::OpenLibrary => IdKind::OpenLibrary,
        }
    }

    /// Outbound lookups per rolling minute when no limit is configured.
    #[must_use]
    pub const fn default_rate_limit(self) -> u32 {
        match self {
            Self::GoogleBooks => 10,
            Self::OpenLibrary => 100,
        }
    }

    /// Priority used when none is configured (lower runs first).
    #[must_use]
    pub const fn default_priority(self) -> u8 {
        match self {
            Self::GoogleBooks => 1,
            Self::OpenLibrary => 2,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
