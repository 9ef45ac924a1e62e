//! shelfmark-middleware
//!
//! Shared state sitting between resolvers and their providers: per-source sliding-window
//! rate limiting and a TTL result cache.
//!
//! Both types use `tokio::time::Instant`, so tests can drive them with a paused clock.
#![warn(missing_docs)]

pub mod cache;
pub mod rate_gate;

pub use crate::cache::{ResultCache, generate_key};
pub use crate::rate_gate::{RateGate, SlidingWindow, WINDOW};
