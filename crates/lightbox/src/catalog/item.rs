//! Catalog items and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{LightboxError, Result};

/// One unit of review work: an image reference plus optional metadata.
///
/// Items are created at catalog load and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// 0-based position in catalog order.
    pub position: usize,
    /// Opaque locator for the image (e.g. a URL).
    pub reference: String,
    /// Remaining row columns, in source column order.
    pub metadata: IndexMap<String, String>,
}

/// Metadata about the catalog source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSource {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the catalog was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSource {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// The ordered, immutable-once-loaded list of annotatable items.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    source: Option<CatalogSource>,
}

impl Catalog {
    /// Build a catalog from already-parsed rows.
    ///
    /// `headers` names the columns; the column named `reference_column`
    /// supplies each item's reference and every other column lands in the
    /// item's metadata, in source order. Fails if the reference column is
    /// absent, or if any row has a blank reference.
    pub fn from_rows(
        headers: &[String],
        rows: Vec<Vec<String>>,
        reference_column: &str,
    ) -> Result<Self> {
        let ref_idx = headers
            .iter()
            .position(|h| h == reference_column)
            .ok_or_else(|| {
                LightboxError::Validation(format!(
                    "catalog is missing required column '{reference_column}'"
                ))
            })?;

        let mut items = Vec::with_capacity(rows.len());
        for (position, row) in rows.into_iter().enumerate() {
            let reference = row.get(ref_idx).map(|s| s.trim()).unwrap_or_default();
            if reference.is_empty() {
                return Err(LightboxError::Validation(format!(
                    "row {position} has no value in reference column '{reference_column}'"
                )));
            }

            let mut metadata = IndexMap::new();
            for (col, value) in headers.iter().zip(row.iter()) {
                if col != reference_column {
                    metadata.insert(col.clone(), value.clone());
                }
            }

            items.push(Item {
                position,
                reference: reference.to_string(),
                metadata,
            });
        }

        Ok(Self {
            items,
            source: None,
        })
    }

    /// Attach source file metadata (set by the file parser).
    pub(crate) fn with_source(mut self, source: CatalogSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by position, or `None` if out of bounds.
    pub fn item(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    /// Get an item by position, failing if out of bounds.
    pub fn get(&self, position: usize) -> Result<&Item> {
        self.items
            .get(position)
            .ok_or(LightboxError::PositionOutOfRange {
                position,
                len: self.items.len(),
            })
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Source file metadata, if the catalog was loaded from a file.
    pub fn source(&self) -> Option<&CatalogSource> {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["subject_id".into(), "image_url".into(), "hash".into()]
    }

    #[test]
    fn test_from_rows_builds_items_in_order() {
        let rows = vec![
            vec!["s1".into(), "http://a/1.png".into(), "h1".into()],
            vec!["s2".into(), "http://a/2.png".into(), "h2".into()],
        ];
        let catalog = Catalog::from_rows(&headers(), rows, "image_url").unwrap();

        assert_eq!(catalog.len(), 2);
        let item = catalog.get(1).unwrap();
        assert_eq!(item.position, 1);
        assert_eq!(item.reference, "http://a/2.png");
        assert_eq!(
            item.metadata.keys().collect::<Vec<_>>(),
            vec!["subject_id", "hash"]
        );
        assert_eq!(item.metadata["subject_id"], "s2");
    }

    #[test]
    fn test_missing_reference_column_fails() {
        let rows = vec![vec!["s1".into(), "u".into(), "h".into()]];
        let err = Catalog::from_rows(&headers(), rows, "url").unwrap_err();
        assert!(matches!(err, LightboxError::Validation(_)));
    }

    #[test]
    fn test_blank_reference_value_fails() {
        let rows = vec![
            vec!["s1".into(), "http://a/1.png".into(), "h1".into()],
            vec!["s2".into(), "  ".into(), "h2".into()],
        ];
        let err = Catalog::from_rows(&headers(), rows, "image_url").unwrap_err();
        assert!(matches!(err, LightboxError::Validation(_)));
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = Catalog::from_rows(&headers(), vec![], "image_url").unwrap();
        let err = catalog.get(0).unwrap_err();
        assert!(matches!(
            err,
            LightboxError::PositionOutOfRange { position: 0, len: 0 }
        ));
        assert!(catalog.item(0).is_none());
    }
}
