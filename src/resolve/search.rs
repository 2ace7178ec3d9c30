//! Text search for bibliographic identifiers.

use crate::models::{Identifier, IdentifierKind};
use crate::resolve::patterns::{patterns_for, standardize};

/// Kinds in resolution priority order. DOI wins when ambiguous text could
/// satisfy both grammars.
const KIND_PRIORITY: [IdentifierKind; 2] = [IdentifierKind::Doi, IdentifierKind::Arxiv];

/// Find the first syntactically valid identifier in arbitrary text.
///
/// Tries each kind in priority order and, within a kind, each pattern in
/// table order. The first pattern with a non-empty capture wins outright:
/// its capture is passed through [`standardize`] and the scan stops, even if
/// a later pattern would also have matched. Returns `None` when nothing in
/// either grammar matches, or when the winning capture fails to normalize.
pub fn find_identifier(text: &str) -> Option<Identifier> {
    let haystack = text.to_lowercase();
    for kind in KIND_PRIORITY {
        for pattern in patterns_for(kind) {
            let Some(captures) = pattern.captures(&haystack) else {
                continue;
            };
            let raw = captures
                .get(1)
                .map(|m| m.as_str())
                .unwrap_or_else(|| captures.get(0).map_or("", |m| m.as_str()));
            if raw.is_empty() {
                continue;
            }
            tracing::debug!(kind = kind.id(), raw, "pattern matched");
            let normalized = standardize(raw, kind);
            if normalized.is_empty() {
                // The winning capture did not survive normalization; the
                // first-match-wins contract means we stop here regardless.
                tracing::debug!(kind = kind.id(), raw, "capture failed to normalize");
                return None;
            }
            return Some(Identifier::new(raw, kind, normalized));
        }
    }
    None
}
