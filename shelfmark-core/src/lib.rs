//! shelfmark-core
//!
//! Matching primitives and the provider contract shared across the shelfmark workspace.
//!
//! - `isbn`: ISBN-10/13 normalization, validation, extraction and conversion.
//! - `similarity`: token-set text similarity and the weighted composite match score.
//! - `connector`: the `ProviderClient` trait every metadata source implements.
//! - `mapping`: conversion of raw provider payloads into candidates and book records.
//!
//! The data model, payload types, errors and configuration live in `shelfmark-types` and are
//! re-exported here.
#![warn(missing_docs)]

/// The `ProviderClient` capability trait.
pub mod connector;
pub mod isbn;
pub mod mapping;
pub mod similarity;

pub use connector::ProviderClient;
pub use isbn::{
    Isbn, convert_isbn10_to_13, extract_from_text, normalize as normalize_isbn, validate_isbn10,
    validate_isbn13,
};
pub use mapping::{candidates_from, parse_publication_date, record_from};
pub use shelfmark_types::*;
pub use similarity::{Weights, composite_score, text_similarity};
