//! CLI entry point for Patlas.
//!
//! Loads one dataset payload, then runs a filter, aggregation, or grade
//! assignment over it. Grade assignments mutate the in-process store only;
//! persisting the result is the data source's concern.

mod display;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use patlas_analytics::{FilterCriteria, filter};
use patlas_core::Grade;
use patlas_store::Dataset;

#[derive(Parser)]
#[command(
    name = "patlas",
    version,
    about = "Patent portfolio classification and aggregation"
)]
struct Cli {
    /// Portfolio dataset payload (JSON).
    #[arg(long, value_name = "FILE")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Status and grade tallies with the derived portfolio metrics.
    Stats,
    /// The two-axis portfolio matrix.
    Matrix,
    /// List records matching the given filters.
    List {
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(long, default_value = "all")]
        detail_status: String,
        #[arg(long, default_value = "all")]
        category1: String,
        #[arg(long, default_value = "all")]
        category2: String,
        #[arg(long, default_value = "all")]
        grade: String,
        /// Case-insensitive match against title and application number.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one record as a vertical card.
    Show { id: String },
    /// Assign a grade (S/A/B/C/X) to one record.
    Grade {
        id: String,
        grade: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Both classification axes with recomputed per-category counts.
    Taxonomy,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("patlas v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let dataset = Dataset::from_json_file(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    let (taxonomy, mut store) = dataset.into_parts()?;

    match cli.command {
        Command::Stats => display::print_stats(store.records()),
        Command::Matrix => display::print_matrix(store.records(), &taxonomy),
        Command::List {
            status,
            detail_status,
            category1,
            category2,
            grade,
            search,
        } => {
            let criteria = FilterCriteria::from_options(
                &taxonomy,
                &[
                    ("status", status.as_str()),
                    ("detailStatus", detail_status.as_str()),
                    ("category1", category1.as_str()),
                    ("category2", category2.as_str()),
                    ("grade", grade.as_str()),
                    ("searchTerm", search.as_str()),
                ],
            )?;
            display::print_list(&filter(store.records(), &criteria));
        }
        Command::Show { id } => {
            let record = store
                .get(&id)
                .with_context(|| format!("patent not found: {id}"))?;
            display::print_record_card(record, &taxonomy);
        }
        Command::Grade { id, grade, reason } => {
            let grade: Grade = grade.parse()?;
            let updated = store.assign_grade(&id, grade, reason)?;
            display::print_record_card(updated, &taxonomy);
        }
        Command::Taxonomy => display::print_taxonomy(store.records(), &taxonomy),
    }

    Ok(())
}
