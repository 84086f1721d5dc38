//! Summary statistics over a catalog and its label store.

use serde::{Deserialize, Serialize};

use crate::label::{Classification, LabelStore};

/// Counts of review progress, recomputed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Items in the catalog.
    pub total: usize,
    /// Items with a label record.
    pub classified: usize,
    /// Items still awaiting review.
    pub unclassified: usize,
    /// Labeled as having the feature.
    pub has_feature: usize,
    /// Labeled as not having the feature.
    pub no_feature: usize,
    /// Skipped by the reviewer.
    pub skipped: usize,
}

impl SummaryStats {
    /// Fraction of the catalog reviewed, in `0.0..=1.0`. An empty catalog
    /// counts as fully reviewed.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.classified as f64 / self.total as f64
    }
}

/// Derive summary statistics. Pure; no side effects.
pub fn summarize(catalog_len: usize, store: &LabelStore) -> SummaryStats {
    let mut stats = SummaryStats {
        total: catalog_len,
        classified: store.len(),
        unclassified: catalog_len.saturating_sub(store.len()),
        ..SummaryStats::default()
    };

    for record in store.records() {
        match record.classification {
            Classification::HasFeature => stats.has_feature += 1,
            Classification::NoFeature => stats.no_feature += 1,
            Classification::Skipped => stats.skipped += 1,
        }
    }

    stats
}
