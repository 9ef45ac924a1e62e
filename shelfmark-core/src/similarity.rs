//! Token-set text similarity and the weighted composite match score.

use std::collections::BTreeSet;

use crate::{Candidate, Query};

/// Lowercase `input` and drop everything except word characters and whitespace.
#[must_use]
pub fn normalize_text(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect()
}

/// Normalized title with runs of whitespace collapsed; used for cache keys.
#[must_use]
pub fn normalize_title(input: &str) -> String {
    normalize_text(input)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &x in a {
        let mut diag = 0;
        for (j, &y) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y { diag + 1 } else { above.max(row[j]) };
            diag = above;
        }
    }
    row[b.len()]
}

/// Insert/delete similarity in `0..=100` relative to the combined length of both strings.
///
/// A substitution costs two edits, so strings with no characters in common score zero.
fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0;
    }
    let distance = total - 2 * lcs_len(&a, &b);
    let similarity = (total - distance) as f64 / total as f64;
    (similarity * 100.0).round() as u8
}

fn join(words: &[&str]) -> String {
    words.join(" ")
}

/// Token-set similarity of two strings in `0..=100`.
///
/// Both inputs are normalized and split into unique word sets. The shared words, and the
/// shared words followed by each side's leftovers, are compared pairwise and the best ratio
/// wins, so reordering words or appending a subtitle barely moves the score.
#[must_use]
pub fn text_similarity(a: &str, b: &str) -> u8 {
    let a = normalize_text(a);
    let b = normalize_text(b);
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() {
        return 0;
    }

    let shared: Vec<&str> = ta.intersection(&tb).copied().collect();
    let only_a: Vec<&str> = ta.difference(&tb).copied().collect();
    let only_b: Vec<&str> = tb.difference(&ta).copied().collect();

    let base = join(&shared);
    let with_a = join(&[shared.as_slice(), only_a.as_slice()].concat());
    let with_b = join(&[shared.as_slice(), only_b.as_slice()].concat());

    ratio(&base, &with_a)
        .max(ratio(&base, &with_b))
        .max(ratio(&with_a, &with_b))
}

/// Year agreement in `0..=100`; ten points lost per year of difference.
#[must_use]
pub fn year_score(a: i32, b: i32) -> u8 {
    let diff = a.abs_diff(b).saturating_mul(10).min(100);
    // diff <= 100
    100 - diff as u8
}

/// Weights (title, author, year) selected by which optional query fields are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    /// Title weight in percent.
    pub title: u32,
    /// Author weight in percent.
    pub author: u32,
    /// Year weight in percent.
    pub year: u32,
}

impl Weights {
    /// Weighting table keyed by presence of an author and a year on the query.
    #[must_use]
    pub const fn select(has_author: bool, has_year: bool) -> Self {
        match (has_author, has_year) {
            (false, false) => Self { title: 100, author: 0, year: 0 },
            (false, true) => Self { title: 70, author: 0, year: 30 },
            (true, false) => Self { title: 60, author: 40, year: 0 },
            (true, true) => Self { title: 50, author: 30, year: 20 },
        }
    }
}

/// Composite match score of `candidate` against `query` in `0..=100`.
///
/// The weighting row is chosen from the fields the query carries; a component the candidate
/// cannot be compared on (missing year or authors) contributes zero.
#[must_use]
pub fn composite_score(query: &Query, candidate: &Candidate) -> u8 {
    let Some(title) = query.title_str() else {
        return 0;
    };
    if candidate.name.trim().is_empty() {
        return 0;
    }
    let title_score = u32::from(text_similarity(title, &candidate.name));

    let author_score = match (query.author_str(), candidate.author_line()) {
        (Some(q), Some(c)) => u32::from(text_similarity(q, &c)),
        _ => 0,
    };
    let year_score = match (query.year, candidate.year) {
        (Some(q), Some(c)) => u32::from(year_score(q, c)),
        _ => 0,
    };

    let w = Weights::select(query.author_str().is_some(), query.year.is_some());
    let total = (title_score * w.title + author_score * w.author + year_score * w.year) / 100;
    // weights sum to 100 and each component is <= 100
    total.min(100) as u8
}
