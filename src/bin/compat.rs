//! OCSF compatibility CLI
//!
//! Compares two schema versions and reports backward-incompatible changes.
//!
//! Usage:
//!   ocsf-compat --before 1.0.0 --after ./schema.json
//!   ocsf-compat --before 1.0.0 --after 1.1.0 --cache ./schema_cache
//!   ocsf-compat --config ./ocsf-compat.toml --info RemovedEnumMember
//!
//! Exit status is 0 when the schemas are compatible, 2 when any finding has
//! error or fatal severity and 1 when the check could not run, including
//! command-line usage errors.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ocsf_tools::compatibility::{check_compatibility, ExitStatus};
use ocsf_tools::schema::{LocalSchemaSource, SchemaSource};
use ocsf_tools::validation::{Severity, ValidationFormatter};
use ocsf_tools::CompatConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ocsf-compat")]
#[command(about = "Validate compatibility between two OCSF schemas")]
struct Cli {
    /// Schema file or version before the change
    #[arg(short, long)]
    before: Option<String>,

    /// Schema file or version after the change
    #[arg(short, long)]
    after: Option<String>,

    /// Path to the schema cache directory
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Findings to assign an info severity to
    #[arg(long, num_args = 0..)]
    info: Vec<String>,

    /// Findings to assign a warning severity to
    #[arg(long, num_args = 0..)]
    warning: Vec<String>,

    /// Findings to assign an error severity to
    #[arg(long, num_args = 0..)]
    error: Vec<String>,

    /// Findings to assign a fatal severity to
    #[arg(long, num_args = 0..)]
    fatal: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(ExitStatus::Failed.code());
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("ocsf_tools=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(ExitStatus::Failed.code());
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitStatus> {
    let mut config = match cli.config.as_deref() {
        Some(path) => CompatConfig::load_from(Some(path)),
        None => CompatConfig::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(before) = cli.before {
        config.before = before;
    }
    if let Some(after) = cli.after {
        config.after = Some(after);
    }
    if let Some(cache) = cli.cache {
        config.cache = Some(cache);
    }
    config.set_severity(&cli.info, Severity::Info);
    config.set_severity(&cli.warning, Severity::Warning);
    config.set_severity(&cli.error, Severity::Error);
    config.set_severity(&cli.fatal, Severity::Fatal);

    let severities = config.severities()?;
    let after = config.after()?.to_string();

    let source = LocalSchemaSource::new(config.cache_dir());
    let before_schema = source
        .load(&config.before)
        .with_context(|| format!("Failed to load before schema {}", config.before))?;
    let after_schema = source
        .load(&after)
        .with_context(|| format!("Failed to load after schema {}", after))?;

    let results = check_compatibility(&before_schema, &after_schema, &severities);

    let formatter = ValidationFormatter::new(!cli.no_color);
    print!("{}", formatter.format(&results));
    println!("{}", formatter.summary(&results));

    Ok(ExitStatus::from_results(&results))
}
