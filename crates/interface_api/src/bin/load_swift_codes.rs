//! SWIFT Directory - Bulk Import Binary
//!
//! Loads a SWIFT code spreadsheet export (CSV) into the database.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin load-swift-codes -- --file data/swift_codes.csv
//! ```
//!
//! The export must carry the columns `COUNTRY ISO2 CODE`, `SWIFT CODE`,
//! `NAME`, `ADDRESS`, `TOWN NAME` and `COUNTRY NAME`. Other columns are
//! ignored. Invalid and duplicate rows are skipped and listed at the end.
//!
//! Only CSV is read. The directory is published as an `.xlsx` workbook;
//! save its first sheet as CSV (UTF-8, comma separated, header row kept)
//! before loading, e.g.
//!
//! ```bash
//! libreoffice --headless --convert-to csv --outdir data data/swift_codes.xlsx
//! ```
//!
//! Logging follows `API_LOG_LEVEL` and `API_LOG_FORMAT` like the server.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;

use domain_directory::{missing_columns, DirectoryService, ImportReport, ImportRow};
use infra_db::{create_pool, run_migrations, PostgresBankStore};
use interface_api::{config::ApiConfig, logging::init_tracing};

#[derive(Parser)]
#[command(name = "load-swift-codes")]
#[command(about = "Load a SWIFT code spreadsheet export into the directory")]
struct Args {
    /// Path to the CSV export
    #[arg(short = 'f', long, default_value = "data/swift_codes.csv")]
    file: PathBuf,

    /// PostgreSQL connection string; overrides API_DATABASE_URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Print every skipped row
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = ApiConfig::from_env().context("Invalid API_* configuration")?;
    if let Some(url) = args.database_url.clone() {
        config.database_url = url;
    }

    init_tracing(&config).context("Failed to install tracing subscriber")?;

    let file = std::fs::File::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let rows = read_rows(file)?;
    tracing::info!(file = %args.file.display(), rows = rows.len(), "Parsed spreadsheet");

    let pool = create_pool(config.database_config())
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to apply migrations")?;

    let service = DirectoryService::new(
        Arc::new(PostgresBankStore::new(pool)),
        config.directory_config(),
    );
    let report = service.import(rows).await.context("Import failed")?;

    print_report(&report, args.verbose);
    Ok(())
}

/// Parses the export, checking the header row first
fn read_rows<R: Read>(reader: R) -> anyhow::Result<Vec<ImportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read header row")?.clone();
    let missing = missing_columns(headers.iter());
    if !missing.is_empty() {
        bail!("Missing required columns: {}", missing.join(", "));
    }

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<ImportRow>().enumerate() {
        let row = result.with_context(|| format!("Malformed row {}", index + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

fn print_report(report: &ImportReport, verbose: bool) {
    println!(
        "Processed {} rows: {} inserted, {} skipped",
        report.total_rows,
        report.inserted,
        report.skipped.len()
    );

    if verbose {
        for skipped in &report.skipped {
            println!(
                "  row {} ({}): {}",
                skipped.row_number, skipped.swift_code, skipped.reason
            );
        }
    }
}
