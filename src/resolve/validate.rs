//! External identifier validation boundary.
//!
//! Validation is advisory: it confirms that an extracted identifier is
//! actually registered, but a failed or unreachable lookup never invalidates
//! the identifier. Every network and parse error is caught here, logged, and
//! downgraded to `None`.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::models::IdentifierKind;
use crate::utils::{with_retry, HttpClient, RetryConfig};

/// Seam for registry lookups, so the cascade can be exercised without
/// touching the network.
#[async_trait]
pub trait Validator: Send + Sync + std::fmt::Debug {
    /// Confirm an identifier against its registry. Returns the registry
    /// payload on success, `None` when the identifier could not be
    /// confirmed. Must not error.
    async fn validate(&self, identifier: &str, kind: IdentifierKind) -> Option<String>;
}

/// Validator backed by the public registries: doi.org for DOIs (citeproc
/// JSON) and the arXiv export API (Atom feed) for arXiv ids.
#[derive(Debug, Clone)]
pub struct RegistryValidator {
    client: Arc<HttpClient>,
    doi_base: String,
    arxiv_base: String,
}

impl RegistryValidator {
    pub fn new(client: Arc<HttpClient>, doi_base: &str, arxiv_base: &str) -> Self {
        Self {
            client,
            doi_base: doi_base.trim_end_matches('/').to_string(),
            arxiv_base: arxiv_base.to_string(),
        }
    }

    async fn validate_doi(&self, doi: &str) -> Option<String> {
        let url = format!("{}/{}", self.doi_base, doi);
        let client = Arc::clone(&self.client);
        let result = with_retry(RetryConfig::default(), || {
            let client = Arc::clone(&client);
            let url = url.clone();
            async move {
                let response = client
                    .get(&url)
                    .header("Accept", "application/citeproc+json")
                    .send()
                    .await?;
                if !response.status().is_success() {
                    return Err(crate::resolve::ResolveError::Api(format!(
                        "DOI registry returned status {}",
                        response.status()
                    )));
                }
                Ok(response.text().await?)
            }
        })
        .await;

        match result {
            Ok(body) if !body.is_empty() => Some(body),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(doi, error = %e, "DOI validation failed");
                None
            }
        }
    }

    async fn validate_arxiv(&self, id: &str) -> Option<String> {
        // The feed endpoint answers 200 with zero entries for unknown ids,
        // so presence of a first entry is the confirmation signal.
        let query = format!("id:{}", id.trim_end_matches(".pdf"));
        let url = format!("{}?search_query={}", self.arxiv_base, urlencoding::encode(&query));
        let client = Arc::clone(&self.client);
        let result = with_retry(RetryConfig::default(), || {
            let client = Arc::clone(&client);
            let url = url.clone();
            async move {
                let response = client
                    .get(&url)
                    .header("Accept", "application/atom+xml")
                    .send()
                    .await?;
                if !response.status().is_success() {
                    return Err(crate::resolve::ResolveError::Api(format!(
                        "arXiv export API returned status {}",
                        response.status()
                    )));
                }
                let bytes = response.bytes().await?;
                feed_rs::parser::parse(bytes.as_ref()).map_err(|e| {
                    crate::resolve::ResolveError::Parse(format!("Atom feed: {}", e))
                })
            }
        })
        .await;

        match result {
            Ok(feed) => feed.entries.first().map(|entry| {
                entry
                    .summary
                    .as_ref()
                    .map(|s| s.content.clone())
                    .unwrap_or_else(|| entry.id.clone())
            }),
            Err(e) => {
                tracing::warn!(arxiv = id, error = %e, "arXiv validation failed");
                None
            }
        }
    }
}

#[async_trait]
impl Validator for RegistryValidator {
    async fn validate(&self, identifier: &str, kind: IdentifierKind) -> Option<String> {
        match kind {
            IdentifierKind::Doi => self.validate_doi(identifier).await,
            IdentifierKind::Arxiv => self.validate_arxiv(identifier).await,
        }
    }
}

/// Test validator returning a canned payload and counting calls.
#[derive(Debug, Default)]
pub struct MockValidator {
    payload: Mutex<Option<String>>,
    calls: Mutex<u32>,
}

impl MockValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with the given payload
    pub fn with_payload(payload: &str) -> Self {
        Self {
            payload: Mutex::new(Some(payload.to_string())),
            calls: Mutex::new(0),
        }
    }

    /// How many times `validate` was invoked
    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Validator for MockValidator {
    async fn validate(&self, _identifier: &str, _kind: IdentifierKind) -> Option<String> {
        *self.calls.lock().unwrap() += 1;
        self.payload.lock().unwrap().clone()
    }
}
