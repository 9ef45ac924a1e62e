use std::collections::HashSet;

use shelfmark_core::similarity::normalize_title;
use shelfmark_core::{IdKind, ScoredCandidate};

/// Identity used to collapse the same book reported by several sources.
///
/// Candidates with an ISBN are identified by it; the rest by normalized name plus year.
#[must_use]
pub fn dedup_key(c: &ScoredCandidate) -> String {
    match c.candidate.ids.get(IdKind::Isbn) {
        Some(isbn) => format!("isbn:{isbn}"),
        None => format!(
            "name:{}|{}",
            normalize_title(&c.candidate.name),
            c.candidate.year.map(|y| y.to_string()).unwrap_or_default()
        ),
    }
}

/// Merge per-source lists given in priority order.
///
/// The result is stable-sorted by descending score, so equal scores keep source priority and
/// provider order. Only the first occurrence of each [`dedup_key`] survives. The list is cut to
/// `limit` entries.
#[must_use]
pub fn merge_ranked(lists: Vec<Vec<ScoredCandidate>>, limit: usize) -> Vec<ScoredCandidate> {
    let mut merged: Vec<ScoredCandidate> = lists.into_iter().flatten().collect();
    merged.sort_by_key(|c| std::cmp::Reverse(c.score));
    let mut seen = HashSet::new();
    merged.retain(|c| seen.insert(dedup_key(c)));
    merged.truncate(limit);
    merged
}
