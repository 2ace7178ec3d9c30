//! Utility modules backing the resolver and the CLI:
//!
//! - [`HttpClient`]: reqwest wrapper owning timeout policy
//! - [`with_retry`] / [`RetryConfig`]: backoff for the network collaborators
//! - [`extract_text`] / [`extract_metadata`] / [`load_document`]: PDF input
//! - [`export_csv`] / [`export_json`]: record export

mod export;
mod http;
mod pdf;
mod retry;

pub use export::{export_csv, export_json, timestamped_path, ExportError};
pub use http::HttpClient;
pub use pdf::{extract_metadata, extract_text, load_document, PdfExtractError};
pub use retry::{with_retry, RetryConfig};
