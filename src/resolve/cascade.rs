//! The ordered identifier-resolution cascade.
//!
//! Five strategies are tried in fixed order, cheapest first, and the first
//! hit wins. Later strategies are never invoked once one succeeds; the final
//! strategy is the only one whose discovery step touches the network, which
//! is why it runs last.

use std::sync::Arc;

use crate::models::{Document, Identifier, IdentifierKind, ResolutionResult, ResolutionSource};
use crate::resolve::search::find_identifier;
use crate::resolve::validate::Validator;
use crate::resolve::websearch::SearchProvider;

/// Metadata keys checked first, in priority order. Values under these keys
/// are trusted verbatim.
const PRIORITY_METADATA_KEYS: [&str; 3] = ["doi", "pdf2doi_identifier", "arxiv"];

/// Key skipped during the metadata-value scan; its value is routinely a
/// journal-level DOI rather than the document's own. Compared without the
/// leading slash: some extractors keep the PDF name-object slash, the lopdf
/// info dictionary does not.
const NOISY_METADATA_KEY: &str = "wps-journaldoi";

/// Default number of leading characters sent to the web search.
pub const DEFAULT_SNIPPET_CHARS: usize = 50;

/// Default number of search results examined.
pub const DEFAULT_SEARCH_RESULTS: usize = 3;

/// Runs the resolution cascade over one document.
pub struct IdentifierResolver {
    validator: Arc<dyn Validator>,
    search_provider: Arc<dyn SearchProvider>,
    snippet_chars: usize,
    search_results: usize,
}

impl IdentifierResolver {
    pub fn new(validator: Arc<dyn Validator>, search_provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            validator,
            search_provider,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            search_results: DEFAULT_SEARCH_RESULTS,
        }
    }

    /// Override how many leading characters feed the web search
    pub fn with_snippet_chars(mut self, chars: usize) -> Self {
        self.snippet_chars = chars;
        self
    }

    /// Override how many search results are examined
    pub fn with_search_results(mut self, results: usize) -> Self {
        self.search_results = results;
        self
    }

    /// Resolve an identifier for the document, or `None` when every strategy
    /// comes up empty. Strategies run strictly in order with early return.
    pub async fn resolve(&self, document: &Document) -> Option<ResolutionResult> {
        if let Some(result) = self.find_in_metadata(document).await {
            return Some(result);
        }
        if let Some(result) = self.find_in_doc_info(document).await {
            return Some(result);
        }
        if let Some(result) = self.find_in_title(document).await {
            return Some(result);
        }
        if let Some(result) = self.find_in_full_text(document).await {
            return Some(result);
        }
        self.find_by_web_search(document).await
    }

    /// Strategy 1: registered metadata keys, value taken verbatim.
    async fn find_in_metadata(&self, document: &Document) -> Option<ResolutionResult> {
        tracing::debug!("strategy 1: priority metadata keys");
        for key in PRIORITY_METADATA_KEYS {
            let Some(value) = document.metadata.get(key).filter(|v| !v.is_empty()) else {
                continue;
            };
            tracing::info!(key, value, "identifier found in document metadata");
            let kind = if key == "arxiv" {
                IdentifierKind::Arxiv
            } else {
                IdentifierKind::Doi
            };
            let identifier = Identifier::new(value.clone(), kind, value.clone());
            return Some(self.validated(identifier, ResolutionSource::Metadata).await);
        }
        None
    }

    /// Strategy 2: scan the remaining metadata values with the text search.
    async fn find_in_doc_info(&self, document: &Document) -> Option<ResolutionResult> {
        tracing::debug!("strategy 2: document-information values");
        for (key, value) in &document.metadata {
            if key.trim_start_matches('/') == NOISY_METADATA_KEY {
                continue;
            }
            if let Some(identifier) = find_identifier(value) {
                tracing::info!(key, %identifier, "identifier found in document info");
                return Some(self.validated(identifier, ResolutionSource::DocInfo).await);
            }
        }
        None
    }

    /// Strategy 3: the document title (or filename stem).
    async fn find_in_title(&self, document: &Document) -> Option<ResolutionResult> {
        tracing::debug!("strategy 3: title");
        let identifier = find_identifier(document.title_or_stem())?;
        tracing::info!(%identifier, "identifier found in title");
        Some(self.validated(identifier, ResolutionSource::Title).await)
    }

    /// Strategy 4: the full extracted text.
    async fn find_in_full_text(&self, document: &Document) -> Option<ResolutionResult> {
        tracing::debug!("strategy 4: full text");
        let identifier = find_identifier(&document.text)?;
        tracing::info!(%identifier, "identifier found in full text");
        Some(self.validated(identifier, ResolutionSource::FullText).await)
    }

    /// Strategy 5: web-search the opening snippet and scan each result URL,
    /// then its page body. One bad candidate never aborts the rest.
    async fn find_by_web_search(&self, document: &Document) -> Option<ResolutionResult> {
        let snippet: String = document
            .text
            .to_lowercase()
            .chars()
            .take(self.snippet_chars)
            .collect();
        if snippet.trim().is_empty() {
            tracing::warn!("no usable text for the web-search fallback");
            return None;
        }

        tracing::info!(
            chars = self.snippet_chars,
            results = self.search_results,
            "strategy 5: web search for opening snippet"
        );
        let urls = match self
            .search_provider
            .search(&snippet, self.search_results)
            .await
        {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(error = %e, "web search failed");
                return None;
            }
        };

        for url in urls {
            if let Some(identifier) = find_identifier(&url) {
                tracing::info!(url, %identifier, "identifier found in search result URL");
                return Some(self.validated(identifier, ResolutionSource::WebSearch).await);
            }
            let body = match self.search_provider.fetch(&url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(url, error = %e, "skipping unreachable search result");
                    continue;
                }
            };
            if let Some(identifier) = find_identifier(&body) {
                tracing::info!(url, %identifier, "identifier found in search result page");
                return Some(self.validated(identifier, ResolutionSource::WebSearch).await);
            }
        }
        None
    }

    /// Attach the advisory validation payload to a syntactic hit.
    async fn validated(&self, identifier: Identifier, source: ResolutionSource) -> ResolutionResult {
        let validation = self
            .validator
            .validate(&identifier.normalized, identifier.kind)
            .await;
        if validation.is_none() {
            tracing::debug!(%identifier, "identifier kept without registry confirmation");
        }
        ResolutionResult::new(identifier, source, validation)
    }
}
