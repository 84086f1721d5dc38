//! Classification decisions for catalog items.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::Item;

/// The reviewer's verdict on one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The feature of interest is present.
    HasFeature,
    /// The feature of interest is absent.
    NoFeature,
    /// The reviewer declined to decide.
    Skipped,
}

impl Classification {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::HasFeature => "Has feature",
            Classification::NoFeature => "No feature",
            Classification::Skipped => "Skipped",
        }
    }

    /// The serialized (snake_case) form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::HasFeature => "has_feature",
            Classification::NoFeature => "no_feature",
            Classification::Skipped => "skipped",
        }
    }

    /// Whether the reviewer made a positive/negative call (not a skip).
    pub fn is_decided(&self) -> bool {
        !matches!(self, Classification::Skipped)
    }
}

/// A classification recorded for one item.
///
/// Serialized with the field names the label file uses on disk: the item
/// position is stored as `index` and the creation time as `timestamp`.
/// `reference` also accepts the legacy `url` key on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    /// The item's reference at label time.
    #[serde(alias = "url")]
    pub reference: String,

    /// The verdict.
    pub classification: Classification,

    /// 0-based catalog position.
    #[serde(rename = "index")]
    pub position: usize,

    /// When the label was created (or last overwritten).
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// Snapshot of the item's metadata at label time.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, String>,

    /// True when the record overwrote an earlier decision.
    #[serde(default, skip_serializing_if = "is_false")]
    pub edited: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl LabelRecord {
    /// Create a fresh record for an unlabeled item.
    pub fn new(item: &Item, classification: Classification) -> Self {
        Self {
            reference: item.reference.clone(),
            classification,
            position: item.position,
            created_at: Utc::now(),
            metadata: item.metadata.clone(),
            edited: false,
        }
    }

    /// Create a record that overwrites an earlier decision.
    pub fn edited(item: &Item, classification: Classification) -> Self {
        Self {
            edited: true,
            ..Self::new(item, classification)
        }
    }
}
