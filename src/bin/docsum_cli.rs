//! Command-line entrypoint.
//!
//! Runs the same extract → normalize → summarize pipeline as the HTTP server against a local
//! file. The summary goes to stdout, or to a file with `--output`.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docsum::{
    config, logging,
    extraction::Document,
    processing::{PipelineError, SummaryService},
};

#[derive(Parser)]
#[command(name = "docsum-cli", about = "Summarize a text or PDF document")]
struct Cli {
    /// Emit debug logs on stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the text extracted from a document.
    Extract { path: PathBuf },
    /// Summarize a document.
    Summarize {
        path: PathBuf,
        /// Minimum summary length in model tokens (20-100).
        #[arg(long)]
        min_length: Option<usize>,
        /// Maximum summary length in model tokens (50-300).
        #[arg(long)]
        max_length: Option<usize>,
        /// Write the summary to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Exit status when the document has nothing to summarize.
const EXIT_UNUSABLE_INPUT: i32 = 2;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    config::init_config();
    logging::init_cli_tracing(cli.verbose);
    let service =
        SummaryService::from_config().context("failed to initialize summarization client")?;

    match cli.command {
        Command::Extract { path } => {
            let document = load_document(&path)?;
            let extracted = service.extract_document(Some(document))?;
            println!("{}", extracted.text);
        }
        Command::Summarize {
            path,
            min_length,
            max_length,
            output,
        } => {
            let bounds = service.settings().resolve_bounds(min_length, max_length)?;
            let document = load_document(&path)?;
            let summary = match service.summarize_document(Some(document), bounds).await {
                Ok(summary) => summary,
                Err(error) if is_unusable_input(&error) => {
                    eprintln!("{error}");
                    std::process::exit(EXIT_UNUSABLE_INPUT);
                }
                Err(error) => return Err(error.into()),
            };
            match output {
                Some(output) => {
                    let download = summary.download();
                    fs::write(&output, &download.bytes)
                        .with_context(|| format!("failed to write {}", output.display()))?;
                    eprintln!("Summary written to {}", output.display());
                }
                None => println!("{}", summary.text),
            }
        }
    }
    Ok(())
}

fn load_document(path: &Path) -> Result<Document> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path.file_name().and_then(|name| name.to_str());
    Document::from_upload(None, file_name, bytes)
        .with_context(|| format!("cannot summarize {}", path.display()))
}

fn is_unusable_input(error: &PipelineError) -> bool {
    matches!(error, PipelineError::NoInput | PipelineError::NoText)
}

#[cfg(test)]
#[path = "../../tests/common/pdf.rs"]
mod pdf_fixture;
