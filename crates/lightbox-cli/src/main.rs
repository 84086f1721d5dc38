//! Lightbox CLI - human-in-the-loop image annotation.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Review {
            file,
            labels,
            save_every,
            reference_column,
        } => commands::review::run(file, labels, save_every, reference_column, cli.verbose),

        Commands::Status {
            file,
            labels,
            reference_column,
            json,
        } => commands::status::run(file, labels, reference_column, json, cli.verbose),

        Commands::Export {
            file,
            output,
            format,
        } => commands::export::run(file, output, format, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
