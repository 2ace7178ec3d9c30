//! # scisift
//!
//! Ingests scholarly documents (PDFs or abstract text), recovers a canonical
//! bibliographic identifier (DOI or arXiv id) when none is supplied, and
//! scores topical relevance from word-frequency evidence.
//!
//! ## Architecture
//!
//! - [`models`]: core data structures (Identifier, Document, records)
//! - [`resolve`]: pattern grammar, text search, and the ordered resolution
//!   cascade with its validation and web-search seams
//! - [`scoring`]: the term matcher and the two relevance scorers
//! - [`utils`]: HTTP client, retry, PDF extraction, record export
//! - [`config`]: configuration management

pub mod config;
pub mod models;
pub mod resolve;
pub mod scoring;
pub mod utils;

// Re-export commonly used types
pub use models::{Document, DocumentRecord, Identifier, IdentifierKind, ResolutionResult};
pub use resolve::{find_identifier, standardize, IdentifierResolver};
pub use scoring::{DocumentScorer, WordscoreCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
