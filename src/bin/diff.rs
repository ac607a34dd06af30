//! OCSF schema difference CLI
//!
//! Prints every change between two schema versions.
//!
//! Usage:
//!   ocsf-diff 1.0.0 1.1.0 --cache ./schema_cache
//!   ocsf-diff ./old.json ./new.json --format json

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ocsf_tools::compare::{collect_changes, compare_schemas, render_changes};
use ocsf_tools::schema::{LocalSchemaSource, SchemaSource};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per change
    Text,
    /// Flat list of changes
    Json,
    /// The complete difference tree
    Tree,
}

#[derive(Parser)]
#[command(name = "ocsf-diff")]
#[command(about = "Show the differences between two OCSF schemas")]
struct Cli {
    /// Schema file or version before the change
    old: String,

    /// Schema file or version after the change
    new: String,

    /// Path to the schema cache directory
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("ocsf_tools=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let source = match cli.cache {
        Some(cache) => LocalSchemaSource::new(cache),
        None => LocalSchemaSource::with_default_cache(),
    };
    debug!(cache = %source.cache_dir().display(), "Using schema cache");
    let old = source
        .load(&cli.old)
        .with_context(|| format!("Failed to load old schema {}", cli.old))?;
    let new = source
        .load(&cli.new)
        .with_context(|| format!("Failed to load new schema {}", cli.new))?;

    let diff = compare_schemas(&old, &new);

    match cli.format {
        OutputFormat::Text => {
            let changes = collect_changes(&diff);
            if changes.is_empty() {
                println!("No changes");
            } else {
                print!("{}", render_changes(&changes));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&collect_changes(&diff))?);
        }
        OutputFormat::Tree => {
            println!("{}", serde_json::to_string_pretty(&diff)?);
        }
    }

    Ok(())
}
