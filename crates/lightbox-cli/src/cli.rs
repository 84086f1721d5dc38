//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lightbox::ExportFormat;

/// Lightbox: human-in-the-loop image annotation tool
#[derive(Parser)]
#[command(name = "lightbox")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review a catalog interactively, classifying each item
    Review {
        /// Path to the catalog file (CSV/TSV)
        #[arg(value_name = "CATALOG")]
        file: PathBuf,

        /// Label file to resume from and save to (default: <catalog>.labels.json)
        #[arg(short, long)]
        labels: Option<PathBuf>,

        /// Number of new labels batched before an auto-save
        #[arg(long, default_value = "5", value_name = "N")]
        save_every: usize,

        /// Catalog column holding each item's image reference
        #[arg(long, default_value = "image_url", value_name = "COLUMN")]
        reference_column: String,
    },

    /// Show review progress and per-classification counts
    Status {
        /// Path to the catalog file (CSV/TSV)
        #[arg(value_name = "CATALOG")]
        file: PathBuf,

        /// Label file to inspect (default: <catalog>.labels.json)
        #[arg(short, long)]
        labels: Option<PathBuf>,

        /// Catalog column holding each item's image reference
        #[arg(long, default_value = "image_url", value_name = "COLUMN")]
        reference_column: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the label set as JSON or flattened CSV
    Export {
        /// Path to label file or catalog file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: label file with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
    },
}
