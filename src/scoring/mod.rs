//! Relevance scoring against target and bycatch word lists.
//!
//! Two scorers share the same frequency evidence: the bounded
//! [`relevance_score`] formula and the [`WordscoreCalculator`] probabilistic
//! model. [`DocumentScorer`] runs the whole pipeline for one document.

mod terms;
mod weighted;
mod wordlist;
mod wordscore;

pub use terms::{match_terms, paper_parentheticals, tokenize};
pub use weighted::relevance_score;
pub use wordlist::load_word_set;
pub use wordscore::WordscoreCalculator;

use std::collections::HashSet;
use std::path::Path;

use crate::models::{DocumentRecord, FrequencyProfile, Wordscore};

/// Everything the scorers learned about one document's text.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub target: FrequencyProfile,
    pub bycatch: FrequencyProfile,
    pub total_word_count: u32,
    pub weighted_score: f64,
    pub wordscore: Option<Wordscore>,
    pub parenthetical_count: u32,
}

/// Scores documents against a target and a bycatch vocabulary.
#[derive(Debug, Clone)]
pub struct DocumentScorer {
    target_set: HashSet<String>,
    bycatch_set: HashSet<String>,
}

impl DocumentScorer {
    pub fn new(target_set: HashSet<String>, bycatch_set: HashSet<String>) -> Self {
        Self {
            target_set,
            bycatch_set,
        }
    }

    /// Load both vocabularies from plain-text word lists
    pub fn from_files(target_words: &Path, bycatch_words: &Path) -> std::io::Result<Self> {
        Ok(Self::new(
            load_word_set(target_words)?,
            load_word_set(bycatch_words)?,
        ))
    }

    /// Score one document's text. The probabilistic model requires a
    /// positive word count, so it is skipped for empty input.
    pub fn score(&self, text: &str, implicature_score: Option<f64>) -> ScoreReport {
        let tokens = tokenize(text);
        let target = match_terms(&tokens, &self.target_set);
        let bycatch = match_terms(&tokens, &self.bycatch_set);
        let total_word_count = tokens.len() as u32;

        let weighted_score = relevance_score(
            total_word_count as i64,
            target.term_count as i64,
            bycatch.term_count as i64,
        );

        let wordscore = (total_word_count > 0).then(|| {
            WordscoreCalculator::new(
                target.term_count,
                bycatch.term_count,
                total_word_count,
                implicature_score,
            )
            .compute()
        });

        let parenthetical_count = paper_parentheticals(text).len() as u32;
        tracing::debug!(
            total_word_count,
            target_count = target.term_count,
            bycatch_count = bycatch.term_count,
            weighted_score,
            "scored document"
        );

        ScoreReport {
            target,
            bycatch,
            total_word_count,
            weighted_score,
            wordscore,
            parenthetical_count,
        }
    }

    /// Score a document and fold the result into an export record.
    pub fn score_into_record(
        &self,
        title: &str,
        text: &str,
        implicature_score: Option<f64>,
    ) -> DocumentRecord {
        let report = self.score(text, implicature_score);
        DocumentRecord {
            title: title.to_string(),
            target: report.target,
            bycatch: report.bycatch,
            total_word_count: report.total_word_count,
            weighted_score: report.weighted_score,
            wordscore: report.wordscore,
            parenthetical_count: report.parenthetical_count,
            ..DocumentRecord::default()
        }
    }
}
