//! Review command - interactive annotation loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::Colorize;
use lightbox::catalog::{Parser, ParserConfig};
use lightbox::session::{Event, Outcome, Session, SessionConfig};
use lightbox::sink::FileSink;
use lightbox::{Classification, ExportFormat};
use tracing::debug;

use super::default_labels_path;

pub fn run(
    file: PathBuf,
    labels: Option<PathBuf>,
    save_every: usize,
    reference_column: String,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ParserConfig {
        reference_column,
        ..ParserConfig::default()
    };
    let catalog = Parser::with_config(config).parse_file(&file)?;

    let labels_path = labels.unwrap_or_else(|| default_labels_path(&file));
    let sink = FileSink::new(&labels_path);
    let mut session = Session::start(
        catalog,
        sink,
        SessionConfig::with_auto_save_threshold(save_every),
    );

    println!(
        "{} {} ({} items)",
        "Reviewing".cyan().bold(),
        file.display(),
        session.catalog().len().to_string().white().bold()
    );
    if verbose {
        if let Some(source) = session.catalog().source() {
            println!("  format: {}, {}", source.format, source.hash.dimmed());
        }
    }
    println!("  labels: {}", labels_path.display());

    if !session.store().is_empty() {
        println!(
            "{} {} existing labels, resuming at item {}",
            "Loaded".green(),
            session.store().len().to_string().white().bold(),
            session.state().cursor + 1
        );
    }
    println!("Type {} for the command list.", "?".cyan().bold());

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))?;
    }

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        if interrupted.load(Ordering::SeqCst) {
            println!();
            return finish(&mut session, "interrupted");
        }

        print_screen(&session);
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => return finish(&mut session, "end of input"),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }

        let command = input.trim().to_lowercase();
        let event = match command.as_str() {
            "" => continue,
            "y" => Event::Classify(Classification::HasFeature),
            "n" => Event::Classify(Classification::NoFeature),
            "s" => Event::Classify(Classification::Skipped),
            "f" => Event::Next,
            "b" => Event::Prev,
            "e" => Event::ToggleLock,
            "i" => Event::ToggleInvert,
            "r" => Event::Restart,
            "w" => {
                match session.save() {
                    Ok(()) => println!(
                        "{} {} labels written",
                        "Saved:".green().bold(),
                        session.store().len()
                    ),
                    Err(e) => println!("{} {}", "Save failed:".red().bold(), e),
                }
                continue;
            }
            "x" => {
                export_csv(&session, &labels_path);
                continue;
            }
            "q" => return finish(&mut session, "quit"),
            "?" | "h" | "help" => {
                print_help();
                continue;
            }
            other => {
                println!(
                    "{} unknown command '{}' (? for help)",
                    "Note:".yellow(),
                    other
                );
                continue;
            }
        };

        debug!(?event, "applying reviewer event");
        report(session.apply(event), event);
    }
}

/// Flush and leave the loop.
fn finish(
    session: &mut Session<FileSink>,
    why: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    session.save()?;
    let stats = session.stats();
    println!(
        "{} ({}); {}/{} items labeled",
        "Session saved".green().bold(),
        why,
        stats.classified,
        stats.total
    );
    Ok(())
}

/// Show the item under review, or the completion summary.
fn print_screen(session: &Session<FileSink>) {
    let stats = session.stats();
    println!();

    let Some(item) = session.current_item() else {
        println!("{}", "Review pass complete!".green().bold());
        println!(
            "  {} total, {} has feature, {} no feature, {} skipped",
            stats.total.to_string().white().bold(),
            stats.has_feature.to_string().green(),
            stats.no_feature.to_string().red(),
            stats.skipped.to_string().yellow()
        );
        println!(
            "  '{}' export CSV, '{}' start another pass, '{}' quit",
            "x".cyan(),
            "r".cyan(),
            "q".cyan()
        );
        return;
    };

    let invert_marker = if session.state().display_inverted {
        " [inverted]".magenta().to_string()
    } else {
        String::new()
    };
    println!(
        "{} {} of {}{}",
        "Item".cyan().bold(),
        (item.position + 1).to_string().white().bold(),
        stats.total,
        invert_marker
    );
    println!("  {}", item.reference.white());
    for (key, value) in &item.metadata {
        println!("  {}: {}", key.dimmed(), value);
    }

    match session.current_record() {
        Some(record) => {
            let tag = match record.classification {
                Classification::HasFeature => record.classification.label().green(),
                Classification::NoFeature => record.classification.label().red(),
                Classification::Skipped => record.classification.label().yellow(),
            };
            println!(
                "  {} {} at {}{}",
                "Labeled:".bold(),
                tag,
                record.created_at.format("%Y-%m-%d %H:%M:%S"),
                if record.edited { " (edited)" } else { "" }
            );
            if session.state().lock_override {
                println!("  {}", "Edit mode on - classifying overwrites".yellow());
            } else {
                println!("  {}", "Locked - 'e' enables editing".dimmed());
            }
        }
        None => println!("  {}", "Unlabeled".dimmed()),
    }
}

/// Report the outcome of one event.
fn report(outcome: Outcome, event: Event) {
    let classified_as = match event {
        Event::Classify(c) => c.label(),
        _ => "",
    };

    match outcome {
        Outcome::Labeled { pending, threshold } => println!(
            "{} {} ({}/{} pending)",
            "Labeled:".green().bold(),
            classified_as,
            pending,
            threshold
        ),
        Outcome::LabeledAndSaved => println!(
            "{} {} (auto-saved)",
            "Labeled:".green().bold(),
            classified_as
        ),
        Outcome::EditedAndSaved => println!(
            "{} changed to {} and saved immediately",
            "Edited:".blue().bold(),
            classified_as
        ),
        Outcome::SaveFailed { pending, error } => println!(
            "{} {} ({} labels held in memory; retried on the next save)",
            "Save failed:".red().bold(),
            error,
            pending
        ),
        Outcome::Refused(reason) => println!("{} {}", "Refused:".yellow().bold(), reason),
        Outcome::LockToggled { enabled } => {
            if enabled {
                println!(
                    "{}",
                    "Edit mode enabled - existing labels can be overwritten".yellow()
                );
            } else {
                println!("{}", "Edit mode disabled - existing labels are locked".blue());
            }
        }
        Outcome::InvertToggled { inverted } => {
            if inverted {
                println!("{}", "Display inverted".magenta());
            } else {
                println!("{}", "Display back to normal".blue());
            }
        }
        Outcome::Restarted => println!("{}", "Starting another pass from the first item".cyan()),
        // Movement and completion show up in the next screen
        Outcome::Moved { .. } | Outcome::Completed => {}
    }
}

/// Export the working label set as CSV beside the label file.
fn export_csv(session: &Session<FileSink>, labels_path: &std::path::Path) {
    let out = labels_path.with_extension("csv");
    let mut sink = FileSink::new(&out);
    match session.export(&mut sink, ExportFormat::Csv) {
        Ok(()) => println!(
            "{} {} labels to {}",
            "Exported".green().bold(),
            session.store().len(),
            out.display()
        ),
        Err(e) => println!("{} {}", "Export failed:".red().bold(), e),
    }
}

fn print_help() {
    println!("{}", "Commands:".yellow().bold());
    println!("  y  label: has feature     n  label: no feature    s  skip");
    println!("  f  next item              b  previous item");
    println!("  e  toggle edit mode       i  toggle inverted display");
    println!("  w  save now               x  export CSV");
    println!("  r  restart (when complete)");
    println!("  q  save and quit          ?  this help");
}
