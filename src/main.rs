//! Entity redaction CLI application.
//!
//! This binary provides a command-line interface for the ner-redactor
//! library: analyze a PDF into highlight regions, plan redactions from
//! reviewed highlights, and burn them into a redacted copy.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ner_redactor::redaction::secure;
use ner_redactor::{
    AnalysisConfig, HighlightCollection, HighlightRegion, JsonTokenClassifier, MupdfDocument,
    NoopClassifier, PageSource, RedactionService, SecureRedactionWriter, TokenClassifier,
};

/// Entity Redaction Tool
///
/// Detect sensitive entities in PDF documents and securely redact them.
#[derive(Parser)]
#[command(name = "ner-redactor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect entities and write highlight regions as JSON
    Analyze {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Precomputed classifier tokens, one array per page (patterns only if omitted)
        #[arg(short, long, value_name = "FILE")]
        tokens: Option<PathBuf>,

        /// Output JSON file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Maximum search hits per entity and page
        #[arg(long, value_name = "N", default_value_t = ner_redactor::config::DEFAULT_MAX_HITS)]
        max_hits: u32,
    },

    /// Turn highlight regions into per-page redaction descriptors
    Plan {
        /// Highlight regions JSON file
        #[arg(long, value_name = "FILE")]
        highlights: PathBuf,

        /// Entity labels to leave unredacted (comma separated)
        #[arg(short, long, value_name = "LABEL", value_delimiter = ',')]
        exclude: Vec<String>,

        /// Output JSON file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Redact highlight regions from a PDF
    Redact {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Highlight regions JSON file
        #[arg(long, value_name = "FILE")]
        highlights: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Entity labels to leave unredacted (comma separated)
        #[arg(short, long, value_name = "LABEL", value_delimiter = ',')]
        exclude: Vec<String>,
    },

    /// Extract text from a PDF (for debugging and verification)
    Extract {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only extract this page (1-based)
        #[arg(short, long, value_name = "N")]
        page: Option<usize>,
    },
}

/// Command handler owning the configured redaction service.
struct RedactionHandler {
    config: AnalysisConfig,
    service: RedactionService,
    verbose: bool,
}

impl RedactionHandler {
    /// Creates a new handler with the secure redaction writer.
    fn new(config: AnalysisConfig, verbose: bool) -> Self {
        let service = RedactionService::new(&config, Box::new(SecureRedactionWriter::new()));
        Self {
            config,
            service,
            verbose,
        }
    }

    /// Analyzes every page, writing whatever was found even when a page fails.
    fn analyze(&self, input: &Path, tokens: Option<&Path>, output: Option<&Path>) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let document = MupdfDocument::open(input)
            .with_context(|| format!("Failed to open {}", input.display()))?
            .with_max_hits(self.config.max_hits);

        let classifier: Box<dyn TokenClassifier> = match tokens {
            Some(path) => Box::new(
                JsonTokenClassifier::from_path(path)
                    .with_context(|| format!("Failed to read tokens from {}", path.display()))?,
            ),
            None => Box::new(NoopClassifier),
        };

        let mut highlights = HighlightCollection::new();
        let mut pages = 0;
        let mut failure = None;
        for page in self.service.analyze(&document, classifier.as_ref()) {
            match page {
                Ok(page) => {
                    if self.verbose {
                        eprintln!(
                            "  Page {}: {} entit(ies), {} highlight(s)",
                            page.page_number(),
                            page.entities.len(),
                            page.highlights.len()
                        );
                    }
                    highlights.append_page(page.highlights);
                    pages += 1;
                }
                Err(e) => failure = Some(e),
            }
        }

        // Pages completed before a failure are still written out.
        write_json(highlights.regions(), output)?;

        if let Some(e) = failure {
            return Err(e).with_context(|| "Analysis failed");
        }

        if self.verbose {
            eprintln!("\nAnalysis Summary:");
            eprintln!("  Pages analyzed: {}", pages);
            eprintln!("  Highlights:     {}", highlights.len());
            for (label, count) in highlights.type_counts() {
                eprintln!("    {:<8} {}", label, count);
            }
        }

        if let Some(path) = output {
            println!(
                "✓ Found {} highlight(s) on {} page(s) → {}",
                highlights.len(),
                document.page_count(),
                path.display()
            );
        }

        Ok(())
    }

    /// Prints or writes the redaction plan for reviewed highlights.
    fn plan(&self, highlights: &Path, exclude: &[String], output: Option<&Path>) -> Result<()> {
        let regions = read_highlights(highlights)?;
        let excluded: HashSet<String> = exclude.iter().cloned().collect();

        let plan = self.service.plan(&regions, &excluded);
        write_json(&plan, output)?;

        if self.verbose {
            let rects: usize = plan.iter().map(|d| d.rects.len()).sum();
            eprintln!("Planned {} rect(s) on {} page(s)", rects, plan.len());
        }

        Ok(())
    }

    /// Executes a redaction operation.
    fn redact(
        &self,
        input: &Path,
        highlights: &Path,
        output: &Path,
        exclude: &[String],
    ) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let regions = read_highlights(highlights)?;
        let excluded: HashSet<String> = exclude.iter().cloned().collect();

        if self.verbose {
            println!("Input:  {}", input.display());
            println!("Output: {}", output.display());
            println!("Highlights: {} region(s)", regions.len());
        }

        let result = self
            .service
            .redact(input, output, &regions, &excluded)
            .with_context(|| "Redaction failed")?;

        if self.verbose {
            println!("\nRedaction Summary:");
            println!("  Pages processed: {}", result.pages_processed);
            println!("  Pages modified:  {}", result.pages_modified);
            println!("  Rects redacted:  {}", result.instances_redacted);
            println!(
                "  Secure: {}",
                if result.secure {
                    "Yes"
                } else {
                    "No (visual only)"
                }
            );
        }

        if result.has_redactions() {
            println!(
                "✓ Successfully redacted {} region(s) → {}",
                result.instances_redacted,
                output.display()
            );
        } else {
            println!("⚠ No regions to redact");
        }

        Ok(())
    }

    /// Extracts text from a PDF.
    fn extract(&self, input: &Path, output: Option<&Path>, page: Option<usize>) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let text = match page {
            Some(0) => anyhow::bail!("Pages are numbered from 1"),
            Some(n) => MupdfDocument::open(input)?.page_text(n - 1),
            None => secure::extract_text(input),
        }
        .with_context(|| "Text extraction failed")?;

        if let Some(output_path) = output {
            std::fs::write(output_path, &text)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            println!(
                "✓ Extracted {} characters → {}",
                text.chars().count(),
                output_path.display()
            );
        } else {
            println!("{}", text);
        }

        Ok(())
    }
}

fn read_highlights(path: &Path) -> Result<Vec<HighlightRegion>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid highlight file: {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write to {}", path.display())),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "ner_redactor=info"
    } else {
        "ner_redactor=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Analyze {
            input,
            tokens,
            output,
            max_hits,
        } => {
            let config = AnalysisConfig::default().with_max_hits(*max_hits);
            RedactionHandler::new(config, cli.verbose).analyze(
                input,
                tokens.as_deref(),
                output.as_deref(),
            )?;
        }
        Commands::Plan {
            highlights,
            exclude,
            output,
        } => {
            RedactionHandler::new(AnalysisConfig::default(), cli.verbose).plan(
                highlights,
                exclude,
                output.as_deref(),
            )?;
        }
        Commands::Redact {
            input,
            highlights,
            output,
            exclude,
        } => {
            RedactionHandler::new(AnalysisConfig::default(), cli.verbose).redact(
                input, highlights, output, exclude,
            )?;
        }
        Commands::Extract {
            input,
            output,
            page,
        } => {
            RedactionHandler::new(AnalysisConfig::default(), cli.verbose).extract(
                input,
                output.as_deref(),
                *page,
            )?;
        }
    }

    Ok(())
}
