use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use core_smx::{DEFAULT_LOG_SETTINGS, DocumentSet, MAX_SITEMAP_LENGTH, SitemapBuilder, parse_entries, setup_logging};

#[derive(Parser)]
#[command(name = "core-smx")]
#[command(about = "The Core Sitemap XML Toolkit", long_about = None)]
struct CoreCli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sitemap documents from a JSON file of URL entries
    Generate {
        /// Base origin that relative entries resolve under (e.g. https://example.com/docs)
        #[arg(short, long, value_parser = validate_url)]
        base: String,
        /// JSON array of URL entries.
        #[arg(short, long, value_parser = validate_input_file)]
        urls: PathBuf,
        /// Maximum number of URLs per sitemap document.
        #[arg(short, long, default_value_t = MAX_SITEMAP_LENGTH, value_parser = validate_size)]
        size: usize,
        /// Directory the documents are written to, named by their served path.
        #[arg(short, long, value_parser = validate_output_dir)]
        output: PathBuf,
    },

    /// Validate a JSON file of URL entries and report how it would be split.
    Check {
        #[arg(short, long, value_parser = validate_input_file)]
        urls: PathBuf,
        #[arg(short, long, default_value_t = MAX_SITEMAP_LENGTH, value_parser = validate_size)]
        size: usize,
    },
}

fn validate_url(s: &str) -> Result<String, String> {
    core_smx::Base::parse(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

fn validate_size(s: &str) -> Result<usize, String> {
    let size = s.trim().parse::<usize>().map_err(|e| format!("Invalid size: {}", e))?;
    core_smx::validate_size(size).map_err(|e| e.to_string())
}

fn validate_input_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Input path does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", path.display()));
    }

    Ok(path)
}

fn validate_output_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if path.exists() && !path.is_dir() {
        return Err(format!("Output path is not a directory: {}", path.display()));
    }

    Ok(path)
}

fn main() -> anyhow::Result<()> {
    setup_logging(DEFAULT_LOG_SETTINGS);
    let cli = CoreCli::parse();

    match cli.command {
        Commands::Generate {
            base,
            urls,
            size,
            output,
        } => {
            let entries = read_entries(&urls)?;
            let documents = SitemapBuilder::new(&base, size)?.build(&entries)?;
            write_documents(&documents, &output)?;
            println!(
                "Wrote {} sitemap document(s) for {} URL(s) to {}",
                documents.len(),
                entries.len(),
                output.display()
            );
        }

        Commands::Check { urls, size } => {
            let entries = read_entries(&urls)?;
            let chunks = if entries.len() <= size {
                0
            } else {
                entries.len().div_ceil(size)
            };
            println!("Valid URL entries file: {} URL(s)", entries.len());
            if chunks == 0 {
                println!("Would produce a single /sitemap.xml");
            } else {
                println!("Would produce /sitemap.xml (index) + {} chunk(s)", chunks);
            }
        }
    }

    Ok(())
}

fn read_entries(path: &Path) -> anyhow::Result<Vec<core_smx::UrlEntry>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("Cannot read file {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("Not valid JSON: {}", path.display()))?;
    Ok(parse_entries(value)?)
}

fn write_documents(documents: &DocumentSet, output: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(output).with_context(|| format!("Cannot create directory {}", output.display()))?;

    for document in documents.iter() {
        let file = output.join(document.path.trim_start_matches('/'));
        std::fs::write(&file, &document.xml).with_context(|| format!("Cannot write {}", file.display()))?;
        tracing::debug!(path = %document.path, file = %file.display(), "Wrote sitemap document");
    }

    Ok(())
}
