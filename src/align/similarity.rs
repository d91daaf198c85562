//! Pure text-similarity scoring between narration phrases and extracted
//! element text. No I/O, no state; everything operates on normalized
//! strings so scores are stable across runs.

use std::collections::BTreeSet;

/// Weight on the token containment ratio, kept below 1.0 so partial
/// overlap of very different-length strings cannot outscore containment.
const CONTAINMENT_WEIGHT: f64 = 0.8;

/// Lowercases, strips punctuation and collapses whitespace.
pub fn normalize_text(s: &str) -> String {
    let mut mapped = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            mapped.extend(ch.to_lowercase());
        } else {
            mapped.push(' ');
        }
    }
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Token set of an already-normalized string.
pub fn token_set(normalized: &str) -> BTreeSet<&str> {
    normalized.split_whitespace().collect()
}

/// Exact equality or substring containment of normalized, non-empty text.
/// Exact matches outrank any fuzzy score during alignment because they are
/// far less likely to be coincidental.
pub fn exact_normalized(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a == b || a.contains(b) || b.contains(a))
}

/// Similarity of two already-normalized strings in `[0, 1]`.
pub fn score_normalized(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(b) || b.contains(a) {
        return 0.9;
    }

    let ta = token_set(a);
    let tb = token_set(b);
    let inter = ta.intersection(&tb).count();
    let union = ta.union(&tb).count();
    let jaccard = if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    };
    let smaller = ta.len().min(tb.len());
    let containment = if smaller == 0 {
        0.0
    } else {
        inter as f64 / smaller as f64
    };

    jaccard.max(CONTAINMENT_WEIGHT * containment)
}

/// Similarity of two raw strings in `[0, 1]`: 1.0 for exact equality after
/// normalization, 0.9 for containment either direction, otherwise the max
/// of token-set Jaccard and the weighted containment ratio.
pub fn similarity(a: &str, b: &str) -> f64 {
    score_normalized(&normalize_text(a), &normalize_text(b))
}

#[cfg(test)]
#[path = "../../tests/unit/align/similarity.rs"]
mod tests;
