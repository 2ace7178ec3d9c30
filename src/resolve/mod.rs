//! Identifier resolution: pattern grammar, text search, and the ordered
//! strategy cascade with its external validation and web-search seams.
//!
//! "Not found" is a value (`None`), never an error. [`ResolveError`] only
//! surfaces from the I/O collaborators (validator, web search), and the
//! cascade downgrades those to advisory misses.

mod cascade;
mod patterns;
mod search;
mod validate;
mod websearch;

pub use cascade::{IdentifierResolver, DEFAULT_SEARCH_RESULTS, DEFAULT_SNIPPET_CHARS};
pub use patterns::{patterns_for, standardize};
pub use search::find_identifier;
pub use validate::{MockValidator, RegistryValidator, Validator};
pub use websearch::{HtmlSearchProvider, MockSearchProvider, SearchProvider};

/// Errors from the resolver's I/O collaborators
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (Atom, HTML)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Non-success answer from a remote endpoint
    #[error("API error: {0}")]
    Api(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::Network(err.to_string())
    }
}
