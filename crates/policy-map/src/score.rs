//! Generic string similarity and best-match search over a catalog.
//!
//! The score is deliberately simple and fully deterministic:
//!
//! - equal strings score 1.0
//! - containment of one string in the other scores 0.9
//! - otherwise the share of overlapping words, relative to the longer word list
//! - with no word overlap, the ratio of characters that match at the same
//!   position, relative to the shorter string
//!
//! The positional fallback is crude and sensitive to padding and
//! transposition. Matching outcomes depend on it, so it is kept as is.

use policy_model::{Catalog, MasterDataItem};
use serde::Serialize;

/// Scores how alike two strings are, in `[0.0, 1.0]`.
///
/// Both inputs are trimmed and lowercased first. A blank input scores 0.0
/// against anything.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return 0.9;
    }

    let words_a: Vec<&str> = a.split_whitespace().collect();
    let words_b: Vec<&str> = b.split_whitespace().collect();
    let overlap = words_a
        .iter()
        .filter(|wa| {
            words_b
                .iter()
                .any(|wb| wb.contains(*wa) || wa.contains(*wb))
        })
        .count();
    if overlap > 0 {
        return overlap as f64 / words_a.len().max(words_b.len()) as f64;
    }

    positional_ratio(&a, &b)
}

fn positional_ratio(a: &str, b: &str) -> f64 {
    let shorter = a.chars().count().min(b.chars().count());
    if shorter == 0 {
        return 0.0;
    }
    let matches = a
        .chars()
        .zip(b.chars())
        .filter(|(ca, cb)| ca == cb)
        .count();
    matches as f64 / shorter as f64
}

/// A catalog item together with the similarity that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredMatch<'a> {
    pub item: &'a MasterDataItem,
    pub score: f64,
}

/// Finds the catalog item whose display name is most similar to `text`.
///
/// Only items scoring at least `threshold` are eligible. Among equal top
/// scores the earliest item in catalog order wins. Returns `None` for an
/// empty catalog or when nothing clears the threshold.
pub fn find_best_match<'a>(
    text: &str,
    catalog: &'a Catalog,
    threshold: f64,
) -> Option<ScoredMatch<'a>> {
    let mut best: Option<ScoredMatch<'a>> = None;
    for item in catalog {
        let score = similarity(text, &item.nombre);
        if score < threshold {
            continue;
        }
        if best.is_none_or(|current| score > current.score) {
            best = Some(ScoredMatch { item, score });
        }
    }
    best
}
