//! Core data structures shared across the resolver and scorers.
//!
//! - [`Identifier`] / [`IdentifierKind`]: a recognized DOI or arXiv id
//! - [`ResolutionResult`] / [`ResolutionSource`]: outcome of the cascade
//! - [`Document`]: the extracted text, title and metadata of one input
//! - [`FrequencyProfile`] / [`Wordscore`]: relevance scoring outputs
//! - [`DocumentRecord`]: the flattened per-document export row

mod document;
mod identifier;
mod record;
mod score;

pub use document::Document;
pub use identifier::{Identifier, IdentifierKind, ResolutionResult, ResolutionSource};
pub use record::DocumentRecord;
pub use score::{FrequencyProfile, Wordscore};
