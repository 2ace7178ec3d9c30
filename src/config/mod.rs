//! Configuration management.
//!
//! Settings layer from defaults, then an optional TOML file, then
//! `SCISIFT_*` environment variables. Endpoint URLs are configuration, not
//! part of the resolver's contract.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote endpoint hosts
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Web-search fallback knobs
    #[serde(default)]
    pub websearch: WebSearchConfig,

    /// Word-list locations for scoring
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Batch-processing behavior
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Remote endpoints used for validation and the web-search fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// DOI resolution host, queried for citeproc JSON
    #[serde(default = "default_doi_resolver")]
    pub doi_resolver: String,

    /// arXiv export feed endpoint
    #[serde(default = "default_arxiv_feed")]
    pub arxiv_feed: String,

    /// HTML web-search endpoint for the fallback strategy
    #[serde(default = "default_search_endpoint")]
    pub web_search: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            doi_resolver: default_doi_resolver(),
            arxiv_feed: default_arxiv_feed(),
            web_search: default_search_endpoint(),
        }
    }
}

fn default_doi_resolver() -> String {
    "https://doi.org".to_string()
}

fn default_arxiv_feed() -> String {
    "http://export.arxiv.org/api/query".to_string()
}

fn default_search_endpoint() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

/// Web-search fallback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    /// How many leading characters of the document feed the search query
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,

    /// How many search results to examine
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            snippet_chars: default_snippet_chars(),
            max_results: default_max_results(),
        }
    }
}

fn default_snippet_chars() -> usize {
    50
}

fn default_max_results() -> usize {
    3
}

/// Word-list locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Target vocabulary file (one word per line)
    #[serde(default)]
    pub target_words: Option<PathBuf>,

    /// Bycatch vocabulary file (one word per line)
    #[serde(default)]
    pub bycatch_words: Option<PathBuf>,
}

/// Batch-processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Courtesy delay between documents that hit the network, in
    /// milliseconds. Caller policy, not a resolver invariant.
    #[serde(default = "default_courtesy_delay_ms")]
    pub courtesy_delay_ms: u64,

    /// Directory for export files
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            courtesy_delay_ms: default_courtesy_delay_ms(),
            export_dir: default_export_dir(),
        }
    }
}

fn default_courtesy_delay_ms() -> u64 {
    1000
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("./exports")
}

/// Find a configuration file in the conventional locations:
/// `./scisift.toml`, then `<config dir>/scisift/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("scisift.toml");
    if local.is_file() {
        return Some(local);
    }
    let global = dirs::config_dir()?.join("scisift").join("config.toml");
    global.is_file().then_some(global)
}

/// Load configuration from a file plus `SCISIFT_*` environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("SCISIFT").separator("__"))
        .build()?;

    settings.try_deserialize()
}
