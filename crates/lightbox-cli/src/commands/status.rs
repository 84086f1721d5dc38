//! Status command - show review progress and summary.

use std::path::PathBuf;

use colored::Colorize;
use lightbox::catalog::{Parser, ParserConfig};
use lightbox::sink::FileSink;
use lightbox::{summarize, LabelStore};

use super::default_labels_path;

pub fn run(
    file: PathBuf,
    labels: Option<PathBuf>,
    reference_column: String,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels_path = labels.unwrap_or_else(|| default_labels_path(&file));

    if !labels_path.exists() {
        return Err(format!(
            "Label file not found: {}\nRun 'lightbox review {}' first.",
            labels_path.display(),
            file.display()
        )
        .into());
    }

    let config = ParserConfig {
        reference_column,
        ..ParserConfig::default()
    };
    let catalog = Parser::with_config(config).parse_file(&file)?;

    let store = match LabelStore::load(&FileSink::new(&labels_path)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{} label file unreadable ({}); showing zero labels", "Warning:".yellow(), e);
            LabelStore::new()
        }
    };

    let stats = summarize(catalog.len(), &store);

    if json_output {
        let status = serde_json::json!({
            "catalog": file.display().to_string(),
            "labels": labels_path.display().to_string(),
            "progress": stats.progress(),
            "total": stats.total,
            "classified": stats.classified,
            "unclassified": stats.unclassified,
            "by_classification": {
                "has_feature": stats.has_feature,
                "no_feature": stats.no_feature,
                "skipped": stats.skipped,
            },
            "is_complete": stats.unclassified == 0,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!(
            "{} {}",
            "Review status for".cyan().bold(),
            file.display().to_string().white()
        );
        println!();

        // Progress bar
        let progress = stats.progress();
        let bar_width = 30;
        let filled = (progress * bar_width as f64).round() as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

        println!(
            "Progress: {} {}/{} ({:.0}%)",
            bar.cyan(),
            stats.classified.to_string().white().bold(),
            stats.total,
            progress * 100.0
        );
        println!();

        println!("{}", "Labels:".yellow().bold());
        println!(
            "  Has feature: {}",
            stats.has_feature.to_string().green()
        );
        println!("  No feature:  {}", stats.no_feature.to_string().red());
        println!("  Skipped:     {}", stats.skipped.to_string().yellow());
        println!(
            "  Unlabeled:   {}",
            stats.unclassified.to_string().white()
        );
        println!();

        // Next steps
        if stats.unclassified == 0 {
            println!(
                "All items reviewed. Run {} to export.",
                format!("lightbox export {}", labels_path.display())
                    .cyan()
                    .bold()
            );
        } else {
            println!(
                "Run {} to continue reviewing.",
                format!("lightbox review {}", file.display()).cyan().bold()
            );
        }
    }

    Ok(())
}
