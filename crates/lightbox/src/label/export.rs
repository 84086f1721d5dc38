//! Terminal export of the label set.

use indexmap::IndexSet;

use crate::error::Result;
use crate::sink::DurableSink;

use super::store::LabelStore;

/// Output format for label export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// The native position-keyed JSON mapping.
    #[default]
    Json,
    /// One row per record, metadata flattened into columns.
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use json or csv.", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl LabelStore {
    /// Write the label set to a sink in the given format.
    ///
    /// Distinct from [`LabelStore::flush`]: flush maintains the working
    /// label file, export produces a deliverable at the end of a pass.
    pub fn export(&self, sink: &mut dyn DurableSink, format: ExportFormat) -> Result<()> {
        let bytes = match format {
            ExportFormat::Json => self.to_json_bytes()?,
            ExportFormat::Csv => self.to_csv_bytes()?,
        };
        sink.write(&bytes)
    }

    /// Flatten the mapping into CSV, one row per record.
    ///
    /// Fixed columns first, then metadata columns in first-seen order
    /// across records.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut metadata_columns: IndexSet<String> = IndexSet::new();
        for record in self.records() {
            for key in record.metadata.keys() {
                metadata_columns.insert(key.clone());
            }
        }

        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec![
            "position".to_string(),
            "reference".to_string(),
            "classification".to_string(),
            "created_at".to_string(),
            "edited".to_string(),
        ];
        header.extend(metadata_columns.iter().cloned());
        writer.write_record(&header)?;

        for record in self.records() {
            let mut row = vec![
                record.position.to_string(),
                record.reference.clone(),
                record.classification.as_str().to_string(),
                record.created_at.to_rfc3339(),
                record.edited.to_string(),
            ];
            for column in &metadata_columns {
                row.push(record.metadata.get(column).cloned().unwrap_or_default());
            }
            writer.write_record(&row)?;
        }

        writer
            .into_inner()
            .map_err(|e| crate::error::LightboxError::Persistence(format!(
                "failed to finalize CSV export: {e}"
            )))
    }
}
