use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use scisift::config::{find_config_file, load_config, Config};
use scisift::models::{Document, DocumentRecord};
use scisift::resolve::{HtmlSearchProvider, IdentifierResolver, RegistryValidator};
use scisift::scoring::DocumentScorer;
use scisift::utils::{export_csv, export_json, load_document, timestamped_path, HttpClient};

/// scisift - recover DOI/arXiv identifiers from scholarly documents and
/// score their topical relevance
#[derive(Parser, Debug)]
#[command(name = "scisift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recover bibliographic identifiers and score document relevance", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn effective(self) -> OutputFormat {
        match self {
            OutputFormat::Auto => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Table
                } else {
                    OutputFormat::Json
                }
            }
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a bibliographic identifier for one document
    Resolve {
        /// PDF file to resolve
        file: Option<PathBuf>,

        /// Resolve from raw text instead of a PDF
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Title override (defaults to metadata title or filename stem)
        #[arg(long)]
        title: Option<String>,
    },

    /// Score a document's relevance against target/bycatch word lists
    Score {
        /// PDF file to score
        file: Option<PathBuf>,

        /// Score raw abstract text instead of a PDF
        #[arg(long, conflicts_with = "file")]
        r#abstract: Option<String>,

        /// Target word list (one word per line)
        #[arg(long)]
        target: Option<PathBuf>,

        /// Bycatch word list (one word per line)
        #[arg(long)]
        bycatch: Option<PathBuf>,

        /// Externally computed prior relevance estimate, blended at 15%
        #[arg(long)]
        implicature: Option<f64>,
    },

    /// Resolve and score every PDF in a directory, exporting one record per file
    Batch {
        /// Directory of PDF files
        dir: PathBuf,

        /// Target word list (one word per line)
        #[arg(long)]
        target: Option<PathBuf>,

        /// Bycatch word list (one word per line)
        #[arg(long)]
        bycatch: Option<PathBuf>,

        /// Export file path (defaults to a timestamped file in the export dir)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Export as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = resolve_config(cli.config.as_deref())?;
    let format = cli.output.effective();

    match cli.command {
        Commands::Resolve { file, text, title } => {
            let document = document_from_input(file.as_deref(), text.as_deref(), title)?;
            let resolver = build_resolver(&config)?;
            match resolver.resolve(&document).await {
                Some(result) => print_resolution(&result, format)?,
                None => {
                    eprintln!("no identifier found");
                    std::process::exit(1);
                }
            }
        }
        Commands::Score {
            file,
            r#abstract,
            target,
            bycatch,
            implicature,
        } => {
            let document = document_from_input(file.as_deref(), r#abstract.as_deref(), None)?;
            let scorer = build_scorer(&config, target.as_deref(), bycatch.as_deref())?;
            let record = scorer.score_into_record(
                document.title_or_stem(),
                &document.text,
                implicature,
            );
            print_record(&record, format)?;
        }
        Commands::Batch {
            dir,
            target,
            bycatch,
            out,
            json,
        } => {
            let scorer = build_scorer(&config, target.as_deref(), bycatch.as_deref())?;
            let resolver = build_resolver(&config)?;
            let records = process_directory(&dir, &resolver, &scorer, &config).await?;

            let extension = if json { "json" } else { "csv" };
            let out = match out {
                Some(path) => path,
                None => {
                    std::fs::create_dir_all(&config.batch.export_dir)?;
                    timestamped_path(&config.batch.export_dir, "scisift", extension)
                }
            };
            if json {
                export_json(&records, &out)?;
            } else {
                export_csv(&records, &out)?;
            }
            println!("{} records written to {}", records.len(), out.display());
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("scisift={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map(Path::to_path_buf).or_else(find_config_file);
    match path {
        Some(path) => {
            tracing::info!("using config file: {}", path.display());
            load_config(&path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn build_resolver(config: &Config) -> Result<IdentifierResolver> {
    let client = Arc::new(HttpClient::new()?);
    let validator = RegistryValidator::new(
        Arc::clone(&client),
        &config.endpoints.doi_resolver,
        &config.endpoints.arxiv_feed,
    );
    let provider = HtmlSearchProvider::new(client, &config.endpoints.web_search);
    Ok(IdentifierResolver::new(Arc::new(validator), Arc::new(provider))
        .with_snippet_chars(config.websearch.snippet_chars)
        .with_search_results(config.websearch.max_results))
}

fn build_scorer(
    config: &Config,
    target: Option<&Path>,
    bycatch: Option<&Path>,
) -> Result<DocumentScorer> {
    let target = target
        .or(config.scoring.target_words.as_deref())
        .context("no target word list given (--target or [scoring] target_words)")?;
    let bycatch = bycatch
        .or(config.scoring.bycatch_words.as_deref())
        .context("no bycatch word list given (--bycatch or [scoring] bycatch_words)")?;
    DocumentScorer::from_files(target, bycatch).context("failed to load word lists")
}

fn document_from_input(
    file: Option<&Path>,
    text: Option<&str>,
    title: Option<String>,
) -> Result<Document> {
    let mut document = match (file, text) {
        (Some(path), _) => {
            load_document(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        (None, Some(text)) => Document::from_text(text),
        (None, None) => anyhow::bail!("give either a PDF file or --text"),
    };
    if title.is_some() {
        document.title = title;
    }
    Ok(document)
}

async fn process_directory(
    dir: &Path,
    resolver: &IdentifierResolver,
    scorer: &DocumentScorer,
    config: &Config,
) -> Result<Vec<DocumentRecord>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let delay = Duration::from_millis(config.batch.courtesy_delay_ms);
    let mut records = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        tracing::info!(file = %path.display(), "processing document");
        let document = match load_document(path) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable PDF");
                continue;
            }
        };

        let mut record =
            scorer.score_into_record(document.title_or_stem(), &document.text, None);
        if let Some(resolution) = resolver.resolve(&document).await {
            record = record.with_resolution(&resolution);
        }
        records.push(record);

        // Courtesy pause between documents that may have hit the network.
        if index + 1 < paths.len() {
            tokio::time::sleep(delay).await;
        }
    }
    Ok(records)
}

fn print_resolution(result: &scisift::ResolutionResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Plain => {
            println!("{}", result.identifier.normalized);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(["field", "value"]);
            table.add_row(["identifier", result.identifier.normalized.as_str()]);
            table.add_row(["kind", result.identifier.kind.id()]);
            table.add_row(["source", result.source.id()]);
            table.add_row(["validated", result.validated().to_string().as_str()]);
            println!("{table}");
        }
    }
    Ok(())
}

fn print_record(record: &DocumentRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        OutputFormat::Plain => {
            println!("{}", record.weighted_score);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(["field", "value"]);
            table.add_row(["title", record.title.as_str()]);
            table.add_row(["weighted_score", record.weighted_score.to_string().as_str()]);
            if let Some(wordscore) = &record.wordscore {
                table.add_row(["probability", wordscore.probability.to_string().as_str()]);
                table.add_row(["expectation", wordscore.expectation.to_string().as_str()]);
                table.add_row([
                    "std_deviation",
                    wordscore.standard_deviation.to_string().as_str(),
                ]);
            }
            table.add_row(["target_terms", record.target.terms_summary().as_str()]);
            table.add_row(["bycatch_terms", record.bycatch.terms_summary().as_str()]);
            table.add_row(["total_words", record.total_word_count.to_string().as_str()]);
            println!("{table}");
        }
    }
    Ok(())
}
