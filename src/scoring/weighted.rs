//! The weighted-frequency relevance formula.

/// Weight of a desired (target) match.
const DESIRED_WEIGHT: f64 = 1.0;
/// Weight of an undesired (bycatch) match.
const UNDESIRED_WEIGHT: f64 = -0.25;
/// Weight of a word matching neither list.
const OTHER_WEIGHT: f64 = 0.5;

/// Score a document's relevance from its match counts, in `[0, 1]`.
///
/// Target matches pull the score up, bycatch matches pull it down, and every
/// unmatched word contributes a small positive baseline: a document with no
/// hits on either list scores 0.5, not 0. Degenerate inputs (non-positive
/// total, negative counts) score 0.0.
pub fn relevance_score(total_words: i64, desired_matches: i64, undesired_matches: i64) -> f64 {
    if total_words <= 0 || desired_matches < 0 || undesired_matches < 0 {
        return 0.0;
    }

    let other_words = total_words - desired_matches - undesired_matches;
    let score = (desired_matches as f64 * DESIRED_WEIGHT
        + undesired_matches as f64 * UNDESIRED_WEIGHT
        + other_words as f64 * OTHER_WEIGHT)
        / total_words as f64;

    score.clamp(0.0, 1.0)
}
