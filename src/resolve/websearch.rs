//! Web-search provider for the last-resort resolution strategy.
//!
//! Searching the open web for a text snippet is scraping, not an API call:
//! result pages shift markup and providers rate-limit aggressively, so this
//! whole layer is best-effort. The cascade swallows per-candidate failures.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use crate::resolve::ResolveError;
use crate::utils::{with_retry, HttpClient, RetryConfig};

/// Seam for the web-search fallback, mockable for tests.
#[async_trait]
pub trait SearchProvider: Send + Sync + std::fmt::Debug {
    /// Search for a literal text snippet, returning up to `max_results`
    /// result URLs in ranking order.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, ResolveError>;

    /// Fetch the body of one result page.
    async fn fetch(&self, url: &str) -> Result<String, ResolveError>;
}

/// Search provider scraping result links out of an HTML search endpoint.
///
/// Works against any endpoint that renders results as anchor tags, e.g. the
/// DuckDuckGo HTML frontend. Redirect-wrapped hrefs (`uddg=` style) are
/// unwrapped to the destination URL.
#[derive(Debug, Clone)]
pub struct HtmlSearchProvider {
    client: Arc<HttpClient>,
    endpoint: String,
}

impl HtmlSearchProvider {
    pub fn new(client: Arc<HttpClient>, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Pull result links out of a search result page
    fn extract_links(html: &str, max_results: usize) -> Vec<String> {
        let document = Html::parse_document(html);
        let selector =
            Selector::parse("a.result__a, a[href]").expect("link selector must compile");

        let mut links = Vec::new();
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(target) = Self::resolve_href(href) else {
                continue;
            };
            if !links.contains(&target) {
                links.push(target);
            }
            if links.len() >= max_results {
                break;
            }
        }
        links
    }

    /// Unwrap redirect hrefs and drop anything that is not an http(s) link
    fn resolve_href(href: &str) -> Option<String> {
        let absolute = if href.starts_with("//") {
            format!("https:{}", href)
        } else {
            href.to_string()
        };
        let parsed = url::Url::parse(&absolute).ok()?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return None;
        }
        // DuckDuckGo wraps destinations in a redirect with a `uddg` param.
        if let Some((_, destination)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
            return Some(destination.into_owned());
        }
        Some(parsed.into())
    }
}

#[async_trait]
impl SearchProvider for HtmlSearchProvider {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, ResolveError> {
        let url = format!("{}?q={}", self.endpoint, urlencoding::encode(query));
        let client = Arc::clone(&self.client);
        let body = with_retry(RetryConfig::default(), || {
            let client = Arc::clone(&client);
            let url = url.clone();
            async move {
                let response = client.get(&url).send().await?;
                if !response.status().is_success() {
                    return Err(ResolveError::Api(format!(
                        "search endpoint returned status {}",
                        response.status()
                    )));
                }
                Ok(response.text().await?)
            }
        })
        .await?;

        Ok(Self::extract_links(&body, max_results))
    }

    async fn fetch(&self, url: &str) -> Result<String, ResolveError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ResolveError::Api(format!(
                "result page returned status {}",
                response.status()
            )));
        }
        Ok(response.text().await?)
    }
}

/// Test provider with canned result URLs and page bodies, counting calls.
#[derive(Debug, Default)]
pub struct MockSearchProvider {
    results: Mutex<Vec<String>>,
    pages: Mutex<VecDeque<Result<String, String>>>,
    search_calls: Mutex<u32>,
    fetch_calls: Mutex<u32>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result URLs returned by `search`
    pub fn with_results(urls: &[&str]) -> Self {
        Self {
            results: Mutex::new(urls.iter().map(|u| u.to_string()).collect()),
            ..Default::default()
        }
    }

    /// Queue one page body (or error message) for the next `fetch` call
    pub fn push_page(&self, page: Result<&str, &str>) {
        self.pages
            .lock()
            .unwrap()
            .push_back(page.map(str::to_string).map_err(str::to_string));
    }

    pub fn search_calls(&self) -> u32 {
        *self.search_calls.lock().unwrap()
    }

    pub fn fetch_calls(&self) -> u32 {
        *self.fetch_calls.lock().unwrap()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<String>, ResolveError> {
        *self.search_calls.lock().unwrap() += 1;
        let results = self.results.lock().unwrap();
        Ok(results.iter().take(max_results).cloned().collect())
    }

    async fn fetch(&self, _url: &str) -> Result<String, ResolveError> {
        *self.fetch_calls.lock().unwrap() += 1;
        match self.pages.lock().unwrap().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(ResolveError::Network(message)),
            None => Ok(String::new()),
        }
    }
}
