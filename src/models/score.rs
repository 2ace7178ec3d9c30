//! Relevance scoring model types.

use serde::{Deserialize, Serialize};

/// Frequency evidence from matching a document against one word list.
///
/// `top_terms` holds at most the three most frequent matching words, ties
/// broken by first-encountered order. `term_count` is the sum of the counts
/// of exactly those entries: matches beyond the top three do not contribute,
/// which is an intentional approximation in the scoring model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyProfile {
    pub term_count: u32,
    pub top_terms: Vec<(String, u32)>,
}

impl FrequencyProfile {
    /// Render the top terms as `word:count` pairs, for flat record columns
    pub fn terms_summary(&self) -> String {
        self.top_terms
            .iter()
            .map(|(word, count)| format!("{}:{}", word, count))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Output of the probabilistic wordscore model.
///
/// All fields are derived in one pass by
/// [`WordscoreCalculator`](crate::scoring::WordscoreCalculator) and immutable
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wordscore {
    pub probability: f64,
    pub expectation: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    /// Infinite when the variance is zero, i.e. a document with no target
    /// matches at all. serde_json renders that as `null`.
    pub skewness: f64,
}
