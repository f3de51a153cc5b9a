use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use slice_compare::logging;
use slice_compare::shared::config::CONFIG;
use slice_compare::{IntentError, SliceCompareQuery, Table};
use tracing::info;

#[derive(Parser)]
#[command(name = "slice_compare")]
#[command(about = "Run a slice-compare query over a JSON table", long_about = None)]
struct Args {
    /// JSON file holding an array of row objects
    #[arg(short, long)]
    table: PathBuf,

    /// JSON file holding the query (metric, dimensions, slices, ...)
    #[arg(short, long)]
    query: PathBuf,

    /// Pretty-print the resulting rows
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&CONFIG.logging)?;

    let raw_table = fs::read_to_string(&args.table)
        .with_context(|| format!("reading table {}", args.table.display()))?;
    let table = Table::from_json_str(&raw_table)
        .with_context(|| format!("parsing table {}", args.table.display()))?;

    let raw_query = fs::read_to_string(&args.query)
        .with_context(|| format!("reading query {}", args.query.display()))?;
    let query: SliceCompareQuery = serde_json::from_str(&raw_query)
        .with_context(|| format!("parsing query {}", args.query.display()))?;

    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "Running slice compare"
    );
    let result = query.execute(&table).inspect_err(IntentError::log_error)?;

    let records = result.to_records();
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{rendered}");
    Ok(())
}
