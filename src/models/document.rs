//! Input document model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A document as handed to the resolver and scorers.
///
/// The text, title and metadata all come from an extraction collaborator
/// (PDF reader or plain abstract text); nothing here is mutated by the core.
/// Metadata is kept in a `BTreeMap` so value scans happen in a stable order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Full extracted text
    pub text: String,
    /// Document title, if the metadata carried one
    pub title: Option<String>,
    /// Embedded document-information properties (read-only input)
    pub metadata: BTreeMap<String, String>,
    /// Stem of the originating file name, used as the title fallback
    pub file_stem: Option<String>,
}

impl Document {
    /// Create a document from bare text (e.g. an abstract)
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = Some(stem.into());
        self
    }

    /// The title to search: metadata title, else the filename stem, else empty
    pub fn title_or_stem(&self) -> &str {
        self.title
            .as_deref()
            .or(self.file_stem.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_stem() {
        let doc = Document::from_text("body").with_file_stem("paper_2021");
        assert_eq!(doc.title_or_stem(), "paper_2021");

        let doc = doc.with_title("A Real Title");
        assert_eq!(doc.title_or_stem(), "A Real Title");
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert_eq!(doc.title_or_stem(), "");
        assert!(doc.metadata.is_empty());
    }
}
