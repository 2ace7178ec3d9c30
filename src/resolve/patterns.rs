//! Identifier pattern grammar and normalization.
//!
//! Each identifier kind has an ordered pattern table (labelled forms first,
//! bare fallback forms last) used by the text search, plus one canonical
//! parsing regex with named capture groups used by [`standardize`]. All
//! tables are compiled once, process-wide.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::IdentifierKind;

/// Canonical DOI parser: optional `doi` marker, `10.<registrant>` prefix,
/// a separator, then the suffix body.
static DOI_CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)(?P<marker>doi[:/\s]{0,3})?(?P<namespace>10)[.](?P<registrant>\d{2,9})(?P<separator>[:\-/\s\]])(?P<suffix>[\-._;()/:a-z0-9]+[a-z0-9])(?P<trailing>[\s"<.]|$)"#,
    )
    .expect("DOI canonical pattern must compile")
});

/// Canonical arXiv parser: optional `arxiv` marker, `YYMM.NNNNN` identifier,
/// an optional version tag (discarded) and an optional `.pdf` trailing.
static ARXIV_CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<marker>arxiv[:\s]{0,3})?(?P<identifier>\d{4}\.\d+)(?:v\d+)?(?P<trailing>\.pdf)?")
        .expect("arXiv canonical pattern must compile")
});

/// DOI search patterns, most specific first: the `doi`-marked form, the bare
/// `10.NNNN` form, a digits-tail variant, the resolver-URL form, and an
/// anchored whole-string fallback.
static DOI_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"doi[\s.:]{0,2}(10\.\d{4}[\d:.\-/a-z]+)(?:[\s"<]|$)"#,
        r#"(10\.\d{4}[\d:.\-/a-z]+)(?:[\s"<]|$)"#,
        r#"(10\.\d{4}[:.\-/a-z]+[:.\-\d]+)(?:[\sa-z"<]|$)"#,
        r#"https?://[ -~]*doi[ -~]*/(10\.\d{4,9}/[-._;()/:a-z0-9]+)(?:[\s"<]|$)"#,
        r"^(10\.\d{4,9}/[-._;()/:a-z0-9]+)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("DOI search pattern must compile"))
    .collect()
});

/// arXiv search patterns: the `arxiv:`-marked form, the `.pdf`-suffixed form,
/// and an anchored bare fallback.
static ARXIV_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"arxiv\s*:\s*(\d{4}\.\d+)(?:v\d+)?(?:[\s"<]|$)"#,
        // The `.pdf` must stay inside the capture so normalization sees it
        // and can carry it through to the canonical form.
        r"(\d{4}\.\d+(?:v\d+)?\.pdf)",
        r"^(\d{4}\.\d+)(?:v\d+)?$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("arXiv search pattern must compile"))
    .collect()
});

/// The ordered search pattern table for one identifier kind
pub fn patterns_for(kind: IdentifierKind) -> &'static [Regex] {
    match kind {
        IdentifierKind::Doi => &DOI_PATTERNS,
        IdentifierKind::Arxiv => &ARXIV_PATTERNS,
    }
}

/// Normalize a raw match into canonical form.
///
/// Input is case-folded, then parsed against the kind's canonical regex. DOIs
/// come out as `10.<registrant>/<suffix>`, arXiv ids as
/// `<identifier>[.pdf]` with any version tag dropped. Returns an empty
/// string when the raw text does not parse; never panics. Normalization is
/// idempotent: feeding the output back in returns it unchanged.
pub fn standardize(raw: &str, kind: IdentifierKind) -> String {
    let raw = raw.trim().to_lowercase();
    match kind {
        IdentifierKind::Doi => DOI_CANONICAL
            .captures(&raw)
            .map(|caps| format!("10.{}/{}", &caps["registrant"], &caps["suffix"]))
            .unwrap_or_default(),
        IdentifierKind::Arxiv => ARXIV_CANONICAL
            .captures(&raw)
            .map(|caps| {
                let trailing = caps.name("trailing").map(|m| m.as_str()).unwrap_or("");
                format!("{}{}", &caps["identifier"], trailing)
            })
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_marked_doi() {
        assert_eq!(
            standardize("doi:10.1234/Test.ABC-2021", IdentifierKind::Doi),
            "10.1234/test.abc-2021"
        );
    }

    #[test]
    fn test_standardize_doi_with_separator_variants() {
        assert_eq!(
            standardize("10.1038/nphys1170", IdentifierKind::Doi),
            "10.1038/nphys1170"
        );
        assert_eq!(
            standardize("doi 10.1093-mind-fzp010", IdentifierKind::Doi),
            "10.1093/mind-fzp010"
        );
    }

    #[test]
    fn test_standardize_arxiv_drops_version() {
        assert_eq!(
            standardize("arxiv:2101.12345v2.pdf", IdentifierKind::Arxiv),
            "2101.12345.pdf"
        );
        assert_eq!(
            standardize("2101.12345v7", IdentifierKind::Arxiv),
            "2101.12345"
        );
    }

    #[test]
    fn test_standardize_is_idempotent() {
        for (raw, kind) in [
            ("doi:10.1234/Test.ABC-2021", IdentifierKind::Doi),
            ("10.5555/12345678", IdentifierKind::Doi),
            ("arxiv:2101.12345v2.pdf", IdentifierKind::Arxiv),
            ("2101.12345", IdentifierKind::Arxiv),
        ] {
            let once = standardize(raw, kind);
            assert!(!once.is_empty(), "expected {} to normalize", raw);
            assert_eq!(standardize(&once, kind), once);
        }
    }

    #[test]
    fn test_standardize_rejects_garbage() {
        assert_eq!(standardize("not an identifier", IdentifierKind::Doi), "");
        assert_eq!(standardize("", IdentifierKind::Doi), "");
        assert_eq!(standardize("v2.pdf", IdentifierKind::Arxiv), "");
    }

    #[test]
    fn test_pattern_tables_compile_in_order() {
        assert_eq!(patterns_for(IdentifierKind::Doi).len(), 5);
        assert_eq!(patterns_for(IdentifierKind::Arxiv).len(), 3);
    }
}
