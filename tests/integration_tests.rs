//! End-to-end tests wiring the public API together: resolution cascade with
//! mock collaborators, scoring against word-list files, and record export.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use scisift::models::ResolutionSource;
use scisift::resolve::{find_identifier, standardize, IdentifierResolver};
use scisift::resolve::{MockSearchProvider, MockValidator};
use scisift::scoring::DocumentScorer;
use scisift::utils::{export_csv, export_json};
use scisift::{Document, DocumentRecord, IdentifierKind};

fn resolver(
    validator: Arc<MockValidator>,
    provider: Arc<MockSearchProvider>,
) -> IdentifierResolver {
    IdentifierResolver::new(validator, provider)
}

fn word_list(words: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for word in words {
        writeln!(file, "{}", word).unwrap();
    }
    file
}

#[tokio::test]
async fn resolve_prefers_metadata_over_everything() {
    let mut metadata = BTreeMap::new();
    metadata.insert("doi".to_string(), "10.1234/Registered.Value".to_string());
    metadata.insert(
        "subject".to_string(),
        "also mentions doi:10.9999/in-subject".to_string(),
    );
    let document = Document::from_text("and the text cites doi:10.8888/in-text")
        .with_title("title with doi:10.7777/in-title")
        .with_metadata(metadata);

    let validator = Arc::new(MockValidator::with_payload("{\"type\":\"article\"}"));
    let provider = Arc::new(MockSearchProvider::new());
    let resolver = resolver(Arc::clone(&validator), Arc::clone(&provider));

    let result = resolver.resolve(&document).await.unwrap();
    assert_eq!(result.source, ResolutionSource::Metadata);
    assert_eq!(result.identifier.normalized, "10.1234/Registered.Value");
    assert_eq!(result.identifier.kind, IdentifierKind::Doi);
    assert!(result.validated());
    assert_eq!(validator.call_count(), 1);
    assert_eq!(provider.search_calls(), 0);
}

#[tokio::test]
async fn resolve_falls_through_to_web_search() {
    let document = Document::from_text("An Opening Sentence With No Identifier Anywhere.");

    let validator = Arc::new(MockValidator::new());
    let provider = Arc::new(MockSearchProvider::with_results(&[
        "https://publisher.example/article/view",
        "https://publisher.example/article/other",
    ]));
    provider.push_page(Ok("<html>cites arXiv:2101.12345v2</html>"));

    let resolver = resolver(validator, Arc::clone(&provider));
    let result = resolver.resolve(&document).await.unwrap();

    assert_eq!(result.source, ResolutionSource::WebSearch);
    assert_eq!(result.identifier.kind, IdentifierKind::Arxiv);
    assert_eq!(result.identifier.normalized, "2101.12345");
    assert!(!result.validated());
    assert_eq!(provider.search_calls(), 1);
    assert_eq!(provider.fetch_calls(), 1);
}

#[tokio::test]
async fn resolve_arxiv_metadata_key_sets_kind() {
    let mut metadata = BTreeMap::new();
    metadata.insert("arxiv".to_string(), "2101.12345".to_string());
    let document = Document::from_text("").with_metadata(metadata);

    let validator = Arc::new(MockValidator::new());
    let provider = Arc::new(MockSearchProvider::new());
    let resolver = resolver(validator, provider);

    let result = resolver.resolve(&document).await.unwrap();
    assert_eq!(result.identifier.kind, IdentifierKind::Arxiv);
    assert_eq!(result.identifier.normalized, "2101.12345");
}

#[test]
fn find_and_standardize_agree() {
    let identifier = find_identifier("published as DOI: 10.1234/Test.ABC-2021 and archived").unwrap();
    assert_eq!(identifier.normalized, "10.1234/test.abc-2021");
    // Standardization is idempotent.
    assert_eq!(
        standardize(&identifier.normalized, identifier.kind),
        identifier.normalized
    );
}

#[test]
fn score_pipeline_with_word_list_files() {
    let target = word_list(&["autism", "sensory", "perception"]);
    let bycatch = word_list(&["mouse", "rat", "murine"]);
    let scorer = DocumentScorer::from_files(target.path(), bycatch.path()).unwrap();

    let text = "sensory perception in autism differs from sensory gating in mouse models \
                (p < 0.05) as sensory thresholds shift";
    let report = scorer.score(text, None);

    assert_eq!(report.target.term_count, 5);
    assert_eq!(report.bycatch.term_count, 1);
    // "sensory" occurs three times and must lead the top terms.
    assert_eq!(report.target.top_terms[0], ("sensory".to_string(), 3));
    assert!((0.0..=1.0).contains(&report.weighted_score));
    assert!(report.weighted_score > 0.5);
    assert_eq!(report.parenthetical_count, 1);
    assert!(report.wordscore.is_some());
}

#[tokio::test]
async fn resolve_then_score_builds_one_record() {
    let target = word_list(&["autism"]);
    let bycatch = word_list(&["mouse"]);
    let scorer = DocumentScorer::from_files(target.path(), bycatch.path()).unwrap();

    let document = Document::from_text("autism research available at doi:10.1234/abc-def")
        .with_file_stem("paper_2021");

    let validator = Arc::new(MockValidator::new());
    let provider = Arc::new(MockSearchProvider::new());
    let resolver = resolver(validator, provider);

    let mut record = scorer.score_into_record(document.title_or_stem(), &document.text, None);
    if let Some(resolution) = resolver.resolve(&document).await {
        record = record.with_resolution(&resolution);
    }

    assert_eq!(record.title, "paper_2021");
    assert_eq!(record.identifier.as_deref(), Some("10.1234/abc-def"));
    assert_eq!(record.resolution_source.as_deref(), Some("full_text"));
    assert!(!record.validated);
    assert_eq!(record.target.term_count, 1);
}

#[test]
fn export_records_both_formats() {
    let record = DocumentRecord {
        title: "Integration Paper".to_string(),
        identifier: Some("10.1234/abc".to_string()),
        identifier_kind: Some("doi".to_string()),
        weighted_score: 0.75,
        ..DocumentRecord::default()
    };
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("records.csv");
    export_csv(std::slice::from_ref(&record), &csv_path).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "Integration Paper");

    let json_path = dir.path().join("records.json");
    export_json(std::slice::from_ref(&record), &json_path).unwrap();
    let body = std::fs::read_to_string(&json_path).unwrap();
    let parsed: Vec<DocumentRecord> = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed[0].weighted_score, 0.75);
}
