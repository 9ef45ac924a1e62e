//! Shelfmark data model, provider payloads, errors and configuration primitives.
#![warn(missing_docs)]

mod book;
mod config;
mod error;
pub mod google_books;
mod ids;
pub mod open_library;
mod payload;
mod source;

pub use book::{BookRecord, Candidate, Query, ScoredCandidate};
pub use config::{ResolverSettings, ShelfmarkConfig, SourceSettings};
pub use error::ShelfmarkError;
pub use ids::{IdKind, ProviderIds};
pub use payload::{RawRecord, RawResult};
pub use source::Source;
