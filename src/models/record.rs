//! The per-document output record handed to the export layer.

use serde::{Deserialize, Serialize};

use super::{FrequencyProfile, ResolutionResult, Wordscore};

/// Everything learned about one document, flattened for tabular export.
///
/// Assembled once after resolution and scoring; the exporter serializes it to
/// CSV or JSON and nothing is kept afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Document title (or filename stem)
    pub title: String,
    /// Canonical identifier, if the cascade found one
    pub identifier: Option<String>,
    /// Identifier kind ("doi" / "arxiv")
    pub identifier_kind: Option<String>,
    /// Which cascade strategy produced the identifier
    pub resolution_source: Option<String>,
    /// Whether the external registry confirmed the identifier
    pub validated: bool,
    /// Frequency evidence against the target word list
    pub target: FrequencyProfile,
    /// Frequency evidence against the bycatch word list
    pub bycatch: FrequencyProfile,
    /// Token count of the document under the scoring tokenizer
    pub total_word_count: u32,
    /// Weighted relevance formula output, in [0, 1]
    pub weighted_score: f64,
    /// Probabilistic model output, absent for empty documents
    pub wordscore: Option<Wordscore>,
    /// Number of parenthetical statistics spotted in the text
    pub parenthetical_count: u32,
}

impl DocumentRecord {
    /// Fold a resolution outcome into the record
    pub fn with_resolution(mut self, resolution: &ResolutionResult) -> Self {
        self.identifier = Some(resolution.identifier.normalized.clone());
        self.identifier_kind = Some(resolution.identifier.kind.id().to_string());
        self.resolution_source = Some(resolution.source.id().to_string());
        self.validated = resolution.validated();
        self
    }

    /// Column names for CSV export, in row order
    pub fn csv_header() -> [&'static str; 15] {
        [
            "title",
            "identifier",
            "identifier_kind",
            "resolution_source",
            "validated",
            "target_terms",
            "target_count",
            "bycatch_terms",
            "bycatch_count",
            "total_word_count",
            "weighted_score",
            "probability",
            "expectation",
            "standard_deviation",
            "parenthetical_count",
        ]
    }

    /// One flat CSV row matching [`Self::csv_header`]
    pub fn csv_row(&self) -> [String; 15] {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        let score = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        [
            self.title.clone(),
            field(&self.identifier),
            field(&self.identifier_kind),
            field(&self.resolution_source),
            self.validated.to_string(),
            self.target.terms_summary(),
            self.target.term_count.to_string(),
            self.bycatch.terms_summary(),
            self.bycatch.term_count.to_string(),
            self.total_word_count.to_string(),
            self.weighted_score.to_string(),
            score(self.wordscore.map(|w| w.probability)),
            score(self.wordscore.map(|w| w.expectation)),
            score(self.wordscore.map(|w| w.standard_deviation)),
            self.parenthetical_count.to_string(),
        ]
    }
}

impl Default for DocumentRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            identifier: None,
            identifier_kind: None,
            resolution_source: None,
            validated: false,
            target: FrequencyProfile::default(),
            bycatch: FrequencyProfile::default(),
            total_word_count: 0,
            weighted_score: 0.0,
            wordscore: None,
            parenthetical_count: 0,
        }
    }
}
