//! CLI entry point for `takeout-calc`.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use rust_decimal::Decimal;

use takeout_calc::{BatchSummary, mbox, process_batch};

/// Sum food-delivery receipts found in mbox archives
#[derive(Parser)]
#[command(name = "takeout-calc", version)]
struct Cli {
    /// Mbox files, or directories scanned for `.mbox` files
    #[arg(
        value_name = "PATH",
        required = true,
        env = "TAKEOUT_CALC_PATHS",
        value_delimiter = ','
    )]
    paths: Vec<PathBuf>,

    /// Print each archive's receipts as JSON
    #[arg(long)]
    json: bool,

    /// Fail if any record is not a valid mail message
    #[arg(long)]
    strict: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let archives = collect_archives(&cli.paths)?;
    if archives.is_empty() {
        bail!("No .mbox files found");
    }

    let mut totals: Vec<Decimal> = Vec::with_capacity(archives.len());
    for archive in &archives {
        let summary = summarize_archive(archive)?;

        if cli.strict && summary.rejected_count() > 0 {
            bail!(
                "{} record(s) in '{}' are not valid mail messages",
                summary.rejected_count(),
                archive.display()
            );
        }

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!(
                "{}\t{} receipts, {} skipped, {} rejected\t{}",
                archive.display(),
                summary.receipts().count(),
                summary.skipped_count(),
                summary.rejected_count(),
                summary.total
            );
        }
        totals.push(summary.total);
    }

    println!("Sum:\t{}", totals.iter().sum::<Decimal>());
    Ok(())
}

fn summarize_archive(path: &Path) -> anyhow::Result<BatchSummary> {
    let records =
        mbox::read_mbox(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "Processing archive");
    Ok(process_batch(&records))
}

/// Expand directories into the `.mbox` files they contain
fn collect_archives(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = mbox::find_mbox_files(path)
                .with_context(|| format!("Failed to scan '{}'", path.display()))?;
            archives.extend(found);
        } else {
            archives.push(path.clone());
        }
    }
    Ok(archives)
}

/// Initialize the tracing subscriber for stderr logging.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
