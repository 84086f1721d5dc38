//! Export command - write the label set as JSON or flattened CSV.

use std::path::PathBuf;

use colored::Colorize;
use lightbox::sink::FileSink;
use lightbox::{ExportFormat, LabelStore};

use super::default_labels_path;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: ExportFormat,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Accept either the label file itself or the catalog it sits beside
    let labels_path = if file.extension().map(|e| e == "json").unwrap_or(false) {
        file.clone()
    } else {
        default_labels_path(&file)
    };

    if !labels_path.exists() {
        return Err(format!(
            "Label file not found: {}\nRun 'lightbox review {}' first.",
            labels_path.display(),
            file.display()
        )
        .into());
    }

    let store = LabelStore::load(&FileSink::new(&labels_path))?;

    let out = output.unwrap_or_else(|| labels_path.with_extension(format.to_string()));
    let mut sink = FileSink::new(&out);
    store.export(&mut sink, format)?;

    println!(
        "{} {} labels to {}",
        "Exported".green().bold(),
        store.len().to_string().white().bold(),
        out.display()
    );

    Ok(())
}
