//! Bibliographic identifier model.

use serde::{Deserialize, Serialize};

/// The kind of bibliographic identifier that was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Doi,
    Arxiv,
}

impl IdentifierKind {
    /// Returns the display name of the identifier kind
    pub fn name(&self) -> &str {
        match self {
            IdentifierKind::Doi => "DOI",
            IdentifierKind::Arxiv => "arXiv",
        }
    }

    /// Returns the lowercase identifier (for record fields and logging)
    pub fn id(&self) -> &str {
        match self {
            IdentifierKind::Doi => "doi",
            IdentifierKind::Arxiv => "arxiv",
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A bibliographic identifier extracted from a document.
///
/// `normalized` holds the canonical form: `10.<registrant>/<suffix>` for DOIs
/// (all lowercase) and `<4digits>.<digits>[.pdf]` for arXiv ids (version tag
/// dropped). An identifier with an empty `normalized` field means nothing
/// usable was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// The raw matched text, before normalization
    pub raw: String,
    /// Which grammar the match satisfied
    pub kind: IdentifierKind,
    /// Canonical form, or empty if normalization failed
    pub normalized: String,
}

impl Identifier {
    pub fn new(raw: impl Into<String>, kind: IdentifierKind, normalized: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind,
            normalized: normalized.into(),
        }
    }

    /// Whether this identifier carries a usable canonical form
    pub fn is_found(&self) -> bool {
        !self.normalized.is_empty()
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind.id(), self.normalized)
    }
}

/// Which resolution strategy produced an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// A registered metadata key held the identifier verbatim
    Metadata,
    /// Found by scanning the other document-information values
    DocInfo,
    /// Found in the document title (or filename stem)
    Title,
    /// Found in the full extracted text
    FullText,
    /// Found in a web-search result for the opening snippet
    WebSearch,
}

impl ResolutionSource {
    pub fn id(&self) -> &str {
        match self {
            ResolutionSource::Metadata => "metadata",
            ResolutionSource::DocInfo => "doc_info",
            ResolutionSource::Title => "title",
            ResolutionSource::FullText => "full_text",
            ResolutionSource::WebSearch => "web_search",
        }
    }
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// The outcome of running the resolution cascade over one document.
///
/// Built once per document and immutable thereafter. `validation` holds the
/// registry payload when the external lookup succeeded; `None` means the
/// identifier could not be confirmed, which never invalidates the identifier
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub identifier: Identifier,
    pub source: ResolutionSource,
    pub validation: Option<String>,
}

impl ResolutionResult {
    pub fn new(identifier: Identifier, source: ResolutionSource, validation: Option<String>) -> Self {
        Self {
            identifier,
            source,
            validation,
        }
    }

    /// Whether the external registry confirmed this identifier
    pub fn validated(&self) -> bool {
        self.validation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(IdentifierKind::Doi.name(), "DOI");
        assert_eq!(IdentifierKind::Arxiv.id(), "arxiv");
    }

    #[test]
    fn test_identifier_found() {
        let id = Identifier::new("doi:10.1234/x", IdentifierKind::Doi, "10.1234/x");
        assert!(id.is_found());

        let missing = Identifier::new("garbage", IdentifierKind::Doi, "");
        assert!(!missing.is_found());
    }

    #[test]
    fn test_source_ids() {
        assert_eq!(ResolutionSource::DocInfo.id(), "doc_info");
        assert_eq!(ResolutionSource::WebSearch.to_string(), "web_search");
    }
}
