//! ISBN-10/13 validation, normalization, extraction and conversion.
//!
//! Validators operate on already-normalized input (see [`normalize`]); they never strip
//! separators themselves. [`Isbn::parse`] normalizes and validates in one step.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Query, ShelfmarkError};

// `97[89]` followed by ten more digits, each optionally preceded by one hyphen or space.
static ISBN13_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"97[89](?:[-\s]?\d){10}").expect("static regex compiles")
});

// Nine digits with optional single separators, then a digit or `X` check character.
static ISBN10_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d(?:[-\s]?\d){8}[-\s]?[\dX]").expect("static regex compiles")
});

/// Strip hyphens and whitespace and uppercase the remainder.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn isbn13_check_digit(first12: &[u8]) -> u8 {
    let sum: u32 = first12
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(d - b'0') * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    // sum % 10 < 10, so the result always fits in a u8
    ((10 - sum % 10) % 10) as u8
}

/// Validate a normalized ISBN-13 (13 digits, weighted 1/3 checksum).
#[must_use]
pub fn validate_isbn13(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 13 || !b[..12].iter().all(u8::is_ascii_digit) {
        return false;
    }
    b[12].is_ascii_digit() && b[12] - b'0' == isbn13_check_digit(&b[..12])
}

/// Validate a normalized ISBN-10 (nine digits plus a digit or `X`, modulo-11 checksum).
#[must_use]
pub fn validate_isbn10(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 10 || !b[..9].iter().all(u8::is_ascii_digit) {
        return false;
    }
    let terminal = match b[9] {
        b'X' => 10,
        d if d.is_ascii_digit() => u32::from(d - b'0'),
        _ => return false,
    };
    let sum: u32 = b[..9]
        .iter()
        .zip((2..=10u32).rev())
        .map(|(d, w)| u32::from(d - b'0') * w)
        .sum();
    (sum + terminal) % 11 == 0
}

/// Convert a valid ISBN-10 into its `978`-prefixed ISBN-13 form.
///
/// Returns `None` when the input fails ISBN-10 validation.
#[must_use]
pub fn convert_isbn10_to_13(isbn10: &str) -> Option<String> {
    if !validate_isbn10(isbn10) {
        return None;
    }
    let mut out = String::with_capacity(13);
    out.push_str("978");
    out.push_str(&isbn10[..9]);
    let check = isbn13_check_digit(out.as_bytes());
    out.push(char::from(b'0' + check));
    Some(out)
}

/// Find the first checksum-valid ISBN in free text (file names, descriptions).
///
/// ISBN-13 shaped tokens take strict priority over ISBN-10 shaped ones. The returned value is
/// normalized.
#[must_use]
pub fn extract_from_text(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    ISBN13_PATTERN
        .find_iter(text)
        .map(|m| normalize(m.as_str()))
        .find(|c| validate_isbn13(c))
        .or_else(|| {
            ISBN10_PATTERN
                .find_iter(text)
                .map(|m| normalize(m.as_str()))
                .find(|c| validate_isbn10(c))
        })
}

/// Fill `query.isbn` from free text when the query does not already carry one.
///
/// Returns true when an ISBN was extracted and set.
pub fn fill_query_isbn(query: &mut Query, text: &str) -> bool {
    if query.isbn_str().is_some() {
        return false;
    }
    match extract_from_text(text) {
        Some(isbn) => {
            query.isbn = Some(isbn);
            true
        }
        None => false,
    }
}

/// A checksum-validated, normalized ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Isbn {
    /// Ten-character form.
    Isbn10(String),
    /// Thirteen-digit form.
    Isbn13(String),
}

impl Isbn {
    /// Normalize and validate `raw` as either form.
    ///
    /// # Errors
    /// Returns `ShelfmarkError::InvalidIdentifier` if neither checksum validates.
    pub fn parse(raw: &str) -> Result<Self, ShelfmarkError> {
        let n = normalize(raw);
        if validate_isbn13(&n) {
            Ok(Self::Isbn13(n))
        } else if validate_isbn10(&n) {
            Ok(Self::Isbn10(n))
        } else {
            Err(ShelfmarkError::invalid_identifier(raw))
        }
    }

    /// The normalized string as parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Isbn10(s) | Self::Isbn13(s) => s,
        }
    }

    /// The ISBN-13 form, converting ISBN-10 values.
    #[must_use]
    pub fn to_isbn13(&self) -> String {
        match self {
            Self::Isbn13(s) => s.clone(),
            // already validated, so conversion cannot fail
            Self::Isbn10(s) => convert_isbn10_to_13(s).unwrap_or_else(|| s.clone()),
        }
    }
}

impl FromStr for Isbn {
    type Err = ShelfmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
