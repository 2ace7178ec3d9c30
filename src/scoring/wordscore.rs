//! The probabilistic wordscore model.
//!
//! Computes a Bayesian posterior and the associated statistical moments from
//! target/bycatch frequency counts, optionally blended with an externally
//! supplied prior (the implicature score). The likelihood here is NOT a
//! textbook binomial PMF: the margins raise ratios to their own counts
//! rather than a fixed success probability to an exponent. Downstream
//! consumers depend on this exact numeric behavior, so the equations are
//! kept verbatim.

use crate::models::Wordscore;

/// Share of the final probability carried by the unweighted posterior; the
/// implicature score carries the rest.
const POSTERIOR_WEIGHT: f64 = 0.85;

/// One-shot calculator for a document's wordscore.
///
/// Precondition: `total_length > 0`. The caller must guard this; a zero
/// length divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordscoreCalculator {
    /// Occurrences of target words in the document
    pub target_count: u32,
    /// Occurrences of bycatch words in the document
    pub bycatch_count: u32,
    /// Total number of words in the document
    pub total_length: u32,
    /// Optional prior relevance estimate from an external classifier
    pub implicature_score: Option<f64>,
}

impl WordscoreCalculator {
    pub fn new(
        target_count: u32,
        bycatch_count: u32,
        total_length: u32,
        implicature_score: Option<f64>,
    ) -> Self {
        Self {
            target_count,
            bycatch_count,
            total_length,
            implicature_score,
        }
    }

    /// Derive the wordscore and its moments in one pass.
    ///
    /// With zero target matches the variance collapses to zero and the
    /// skewness goes infinite; the probability and the other moments stay
    /// finite, so the score is still usable for ranking.
    pub fn compute(&self) -> Wordscore {
        debug_assert!(self.total_length > 0, "total_length must be positive");

        let target = f64::from(self.target_count);
        let total = f64::from(self.total_length);
        let neutral = total - target;

        let success_margin = Self::get_margin(target, total);
        let failure_margin = Self::get_margin(neutral, total);
        let target_probability = target / total;
        let bycatch_probability = f64::from(self.bycatch_count) / total;
        let likelihood = self.likelihood(success_margin, failure_margin);

        let expectation = target * target_probability;
        let variance = expectation * (1.0 - target_probability);
        let standard_deviation = variance.sqrt();
        let skewness = (failure_margin - target_probability) / standard_deviation;

        let positive_posterior = Self::bayes_theorem(target_probability, likelihood, failure_margin);
        // The margins swap roles here: the scan is for bycatch, so the
        // failure margin acts as the likelihood and vice versa.
        let negative_posterior = Self::bayes_theorem(bycatch_probability, failure_margin, likelihood);

        let unweighted = positive_posterior - negative_posterior;
        Wordscore {
            probability: self.blend(unweighted),
            expectation,
            variance,
            standard_deviation,
            skewness,
        }
    }

    /// `(part/whole) ^ part` — the probability margin of `part` successes
    /// out of `whole`, raised to its own count.
    ///
    /// ```
    /// use scisift::scoring::WordscoreCalculator;
    /// assert_eq!(WordscoreCalculator::get_margin(2.0, 4.0), 0.25);
    /// ```
    pub fn get_margin(part: f64, whole: f64) -> f64 {
        (part / whole).powf(part)
    }

    /// Binomial-coefficient likelihood of the observed match count.
    fn likelihood(&self, success_margin: f64, failure_margin: f64) -> f64 {
        let combinations = binomial(self.total_length, self.target_count);
        combinations * success_margin * failure_margin
    }

    /// `(prior * likelihood) / (prior * likelihood + margin)`
    fn bayes_theorem(prior: f64, likelihood: f64, margin: f64) -> f64 {
        let hypothesis = prior * likelihood;
        hypothesis / (hypothesis + margin)
    }

    /// Blend the unweighted posterior with the implicature score. Without an
    /// implicature score the posterior stands in for itself, collapsing the
    /// blend to the unweighted value.
    fn blend(&self, unweighted: f64) -> f64 {
        let implicature = self.implicature_score.unwrap_or(unweighted);
        unweighted * POSTERIOR_WEIGHT + implicature * (1.0 - POSTERIOR_WEIGHT)
    }
}

/// `C(n, k)` accumulated multiplicatively in f64. Exact integer coefficients
/// overflow u64 well below realistic document lengths, and the value is only
/// ever consumed as a float factor.
fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (1..=k).fold(1.0, |acc, i| acc * f64::from(n - k + i) / f64::from(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_margin() {
        assert_eq!(WordscoreCalculator::get_margin(2.0, 4.0), 0.25);
        assert_eq!(WordscoreCalculator::get_margin(0.0, 10.0), 1.0);
    }

    #[test]
    fn test_binomial_coefficients() {
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(10, 0), 1.0);
        assert_eq!(binomial(10, 10), 1.0);
        assert_eq!(binomial(5, 7), 0.0);
        // Large n must not overflow.
        assert!(binomial(5000, 12).is_finite());
    }

    #[test]
    fn test_implicature_blend() {
        let calculator = WordscoreCalculator::new(2, 1, 100, Some(0.9));
        assert!((calculator.blend(0.6) - 0.645).abs() < 1e-12);
    }

    #[test]
    fn test_blend_collapses_without_implicature() {
        let calculator = WordscoreCalculator::new(2, 1, 100, None);
        assert!((calculator.blend(0.6) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_moments() {
        let calculator = WordscoreCalculator::new(5, 2, 100, None);
        let score = calculator.compute();
        // expectation = 5 * 0.05, variance = expectation * 0.95
        assert!((score.expectation - 0.25).abs() < 1e-12);
        assert!((score.variance - 0.2375).abs() < 1e-12);
        assert!((score.standard_deviation - 0.2375f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_target_count() {
        let calculator = WordscoreCalculator::new(0, 3, 200, None);
        let score = calculator.compute();
        assert_eq!(score.expectation, 0.0);
        assert_eq!(score.variance, 0.0);
        assert!(score.skewness.is_infinite());
        // Only bycatch evidence remains, so the probability is finite and
        // non-positive.
        assert!(score.probability.is_finite());
        assert!(score.probability <= 0.0);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let calculator = WordscoreCalculator::new(12, 3, 400, Some(0.4));
        assert_eq!(calculator.compute(), calculator.compute());
    }

    #[test]
    fn test_bayes_theorem_shape() {
        // margin of zero concentrates all evidence on the hypothesis
        let full = WordscoreCalculator::bayes_theorem(0.5, 1.0, 0.0);
        assert_eq!(full, 1.0);
        let half = WordscoreCalculator::bayes_theorem(0.5, 1.0, 0.5);
        assert_eq!(half, 0.5);
    }
}
