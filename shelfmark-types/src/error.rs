use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::Source;

/// Unified error type for the shelfmark workspace.
///
/// Collaborator failures (`SourceUnavailable`, `MalformedResponse`, `ProviderTimeout`) are
/// absorbed by the resolvers and turned into empty results. `Cancelled` is the only outcome a
/// caller of a resolution request ever observes as an error.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShelfmarkError {
    /// The source could not be reached or answered with a non-success status.
    #[error("{provider} unavailable: {msg}")]
    SourceUnavailable {
        /// Source that failed.
        provider: Source,
        /// Human-readable error message.
        msg: String,
    },

    /// The source answered, but the payload could not be parsed.
    #[error("{provider} returned a malformed response: {msg}")]
    MalformedResponse {
        /// Source that produced the payload.
        provider: Source,
        /// Parser diagnostic.
        msg: String,
    },

    /// A book identifier failed syntax or checksum validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The caller cancelled the request while it was waiting or fetching.
    #[error("request cancelled")]
    Cancelled,

    /// An individual collaborator call exceeded the configured timeout.
    #[error("{provider} timed out")]
    ProviderTimeout {
        /// Source that timed out.
        provider: Source,
    },

    /// Configuration rejected while building an orchestrator.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No provider is registered for the requested source.
    #[error("no provider registered for {provider}")]
    Unsupported {
        /// Source that was requested.
        provider: Source,
    },
}

impl ShelfmarkError {
    /// Helper: build a `SourceUnavailable` error.
    pub fn unavailable(provider: Source, msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            provider,
            msg: msg.into(),
        }
    }

    /// Helper: build a `MalformedResponse` error.
    pub fn malformed(provider: Source, msg: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            msg: msg.into(),
        }
    }

    /// Helper: build an `InvalidIdentifier` error for the offending input.
    pub fn invalid_identifier(raw: impl Into<String>) -> Self {
        Self::InvalidIdentifier(raw.into())
    }

    /// Helper: build an `InvalidConfig` error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns true if a resolver may absorb this error and continue with a degraded answer.
    ///
    /// Cancellation and configuration problems are never degradable.
    #[must_use]
    pub const fn is_degradable(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::InvalidConfig(_))
    }

    /// Returns true for the cancellation outcome.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
