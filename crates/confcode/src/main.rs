//! confcode CLI - sync local source files into Confluence code macros.
//!
//! For every configured page, finds headings whose next code macro appears
//! before any further heading, injects the mapped file's contents into
//! that macro as CDATA, and re-uploads the page with an incremented
//! version number.

mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use confcode_config::{CONFIG_FILENAME, SyncConfig};
use confcode_confluence::{ConfluenceClient, HeadingOutcome, PageSyncer};

use error::CliError;
use output::Output;

/// Sync local source files into Confluence code macros.
#[derive(Parser)]
#[command(name = "confcode", version, about)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = CONFIG_FILENAME)]
    config: PathBuf,

    /// Preview changes without uploading anything.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(&cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Process every configured page in order, halting on the first fatal
/// error. Heading and file mismatches only produce diagnostics.
fn run(cli: &Cli, output: &Output) -> Result<(), CliError> {
    let config = SyncConfig::load(&cli.config)?;

    let client = ConfluenceClient::new(&config.base_url, &config.user, &config.token);
    let space_key = client.resolve_space_key(&config.space)?;
    let syncer = PageSyncer::new(&client, space_key);

    for (title, files) in &config.pages {
        output.info(&format!(
            "Processing page \"{title}\" ({} file(s))",
            files.len()
        ));

        if cli.dry_run {
            let result = syncer.dry_run(title, files)?;
            print_outcomes(output, &result.outcomes);
            output.highlight(&format!(
                "  [DRY RUN] Would upload version {} (current: {})",
                result.current_version + 1,
                result.current_version
            ));
        } else {
            let result = syncer.sync(title, files)?;
            print_outcomes(output, &result.outcomes);
            output.success(&format!(
                "  Success. New version is {}",
                result.new_version()
            ));
        }
    }

    output.info("Done.");
    Ok(())
}

fn print_outcomes(output: &Output, outcomes: &[HeadingOutcome]) {
    for outcome in outcomes {
        match outcome {
            HeadingOutcome::Updated { heading, path } => {
                output.info(&format!(
                    "  Heading \"{heading}\" matched to file {}",
                    path.display()
                ));
            }
            HeadingOutcome::Unmatched { heading } => {
                output.warning(&format!("  Unmatched heading \"{heading}\""));
            }
            HeadingOutcome::FileError {
                heading,
                path,
                error,
            } => {
                output.warning(&format!(
                    "  Can't read file '{}' for heading \"{heading}\" ({error})",
                    path.display()
                ));
            }
        }
    }
}
