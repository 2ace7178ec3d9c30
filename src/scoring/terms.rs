//! Tokenization and term-frequency matching.

use regex::Regex;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::models::FrequencyProfile;

/// How many of the most frequent matches feed the profile.
const TOP_TERMS: usize = 3;

/// Parenthetical statistics like `(p = .05)` or `(n > 100)`.
static PAPER_STATISTIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*(?:=|>|<).*\)").expect("statistic pattern must compile"));

/// Split text into scoring tokens.
///
/// Deliberately narrow: trim, lowercase, split on single ASCII spaces. Runs
/// of spaces yield empty tokens and tabs/newlines are NOT split on; the
/// scoring formulas are calibrated against exactly this tokenization, so it
/// must not be "fixed" to whitespace-class splitting.
pub fn tokenize(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split(' ')
        .map(str::to_string)
        .collect()
}

/// Count how often reference words occur in the token stream.
///
/// Takes the three most frequent distinct matching words, ties broken by
/// first-encountered order. `term_count` sums the counts of exactly those
/// three; matches beyond them are dropped from the total on purpose.
pub fn match_terms(tokens: &[String], reference_set: &HashSet<String>) -> FrequencyProfile {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for token in tokens {
        if !reference_set.contains(token.as_str()) {
            continue;
        }
        let entry = counts.entry(token.as_str()).or_insert(0);
        if *entry == 0 {
            order.push(token.as_str());
        }
        *entry += 1;
    }

    // Stable sort keeps first-encountered order among equal counts.
    let mut ranked: Vec<(&str, u32)> = order.iter().map(|word| (*word, counts[word])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_TERMS);

    let term_count = ranked.iter().map(|(_, count)| count).sum();
    FrequencyProfile {
        term_count,
        top_terms: ranked
            .into_iter()
            .map(|(word, count)| (word.to_string(), count))
            .collect(),
    }
}

/// Collect parenthetical statistics reported in the text
pub fn paper_parentheticals(text: &str) -> Vec<String> {
    PAPER_STATISTIC
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn set(list: &[&str]) -> HashSet<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_match_terms_worked_example() {
        let tokens = words(&[
            "a", "a", "b", "c", "d", "d", "d", "d", "c", "a", "f", "f", "f", "g", "d",
        ]);
        let profile = match_terms(&tokens, &set(&["a", "b", "f"]));
        assert_eq!(
            profile.top_terms,
            vec![("a".to_string(), 3), ("f".to_string(), 3), ("b".to_string(), 1)]
        );
        assert_eq!(profile.term_count, 7);
    }

    #[test]
    fn test_term_count_truncates_beyond_top_three() {
        // "d" matches 5 times but ranks fourth, so it must not contribute.
        let tokens = words(&[
            "a", "a", "a", "b", "b", "b", "c", "c", "c", "d", "d", "d", "d", "d",
        ]);
        let mut reference = set(&["a", "b", "c"]);
        reference.insert("d".to_string());
        let profile = match_terms(&tokens, &reference);
        assert_eq!(profile.top_terms.len(), 3);
        assert_eq!(profile.top_terms[0], ("d".to_string(), 5));
        assert_eq!(profile.term_count, 5 + 3 + 3);
    }

    #[test]
    fn test_no_matches() {
        let profile = match_terms(&words(&["x", "y"]), &set(&["a"]));
        assert_eq!(profile.term_count, 0);
        assert!(profile.top_terms.is_empty());
    }

    #[test]
    fn test_tokenize_is_single_space_only() {
        let tokens = tokenize("  Alpha beta\tgamma\ndelta  epsilon ");
        // Tabs and newlines stay inside tokens; double spaces yield an empty
        // token. Both behaviors are load-bearing for the score calibration.
        assert_eq!(
            tokens,
            vec!["alpha", "beta\tgamma\ndelta", "", "epsilon"]
        );
    }

    #[test]
    fn test_paper_parentheticals() {
        let found = paper_parentheticals("effect was large (d = 0.8) but noisy (n < 30)");
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("d = 0.8"));
    }
}
