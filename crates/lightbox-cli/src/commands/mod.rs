//! CLI command implementations.

pub mod export;
pub mod review;
pub mod status;

use std::path::{Path, PathBuf};

/// Default label file for a catalog: `<stem>.labels.json` beside it.
pub fn default_labels_path(catalog: &Path) -> PathBuf {
    let stem = catalog.file_stem().unwrap_or_default().to_string_lossy();
    let parent = catalog.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.labels.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_path() {
        assert_eq!(
            default_labels_path(Path::new("data/galaxies.csv")).to_string_lossy(),
            "data/galaxies.labels.json"
        );
        assert_eq!(
            default_labels_path(Path::new("catalog.csv")).to_string_lossy(),
            "catalog.labels.json"
        );
    }
}
