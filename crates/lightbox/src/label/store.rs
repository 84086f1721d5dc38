//! The in-memory label store and its durable flush/load cycle.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{LightboxError, Result};
use crate::sink::DurableSink;

use super::record::LabelRecord;

/// Mapping from item position to the label recorded for it.
///
/// Records are keyed by position; serialization uses decimal string keys in
/// ascending order so the persisted file is deterministic.
#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    records: BTreeMap<usize, LabelRecord>,
}

impl LabelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a sink.
    ///
    /// Absent content yields an empty store. Malformed content fails with
    /// [`LightboxError::CorruptStore`]; callers are expected to warn and
    /// continue with an empty store rather than abort the session.
    pub fn load(sink: &dyn DurableSink) -> Result<Self> {
        match sink.read()? {
            None => Ok(Self::new()),
            Some(bytes) => Self::from_json_bytes(&bytes),
        }
    }

    /// Parse the persisted JSON mapping.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: BTreeMap<String, LabelRecord> =
            serde_json::from_slice(bytes).map_err(|e| {
                LightboxError::CorruptStore(format!("not a position-keyed mapping: {e}"))
            })?;

        let mut records = BTreeMap::new();
        for (key, record) in raw {
            let position: usize = key.parse().map_err(|_| {
                LightboxError::CorruptStore(format!("non-numeric position key '{key}'"))
            })?;
            records.insert(position, record);
        }

        Ok(Self { records })
    }

    /// Serialize the full mapping, decimal string keys in ascending order.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let keyed: BTreeMap<String, &LabelRecord> = self
            .records
            .iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect();
        let mut bytes = serde_json::to_vec_pretty(&keyed)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Insert or overwrite the record at its position. Pure in-memory.
    pub fn upsert(&mut self, record: LabelRecord) {
        self.records.insert(record.position, record);
    }

    /// Get the record at a position.
    pub fn get(&self, position: usize) -> Option<&LabelRecord> {
        self.records.get(&position)
    }

    /// Whether a position has a record.
    pub fn contains(&self, position: usize) -> bool {
        self.records.contains_key(&position)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in ascending position order.
    pub fn records(&self) -> impl Iterator<Item = &LabelRecord> {
        self.records.values()
    }

    /// All labeled positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.records.keys().copied()
    }

    /// Write the entire current mapping to the sink.
    ///
    /// Atomic from the caller's perspective: the sink either keeps its prior
    /// content or receives the new content in full.
    pub fn flush(&self, sink: &mut dyn DurableSink) -> Result<()> {
        let bytes = self.to_json_bytes()?;
        sink.write(&bytes)?;
        debug!(records = self.records.len(), "label store flushed");
        Ok(())
    }

    /// Drop records whose position falls outside `0..len`.
    ///
    /// Returns how many were dropped. Used when a label file is loaded
    /// against a catalog shorter than the one it was written for.
    pub(crate) fn retain_in_range(&mut self, len: usize) -> usize {
        let before = self.records.len();
        self.records.retain(|&p, _| p < len);
        before - self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;
    use crate::label::record::Classification;
    use crate::sink::MemorySink;
    use indexmap::IndexMap;

    fn record(position: usize) -> LabelRecord {
        let item = Item {
            position,
            reference: format!("http://img/{position}.png"),
            metadata: IndexMap::new(),
        };
        LabelRecord::new(&item, Classification::HasFeature)
    }

    #[test]
    fn test_load_absent_is_empty() {
        let sink = MemorySink::new();
        let store = LabelStore::load(&sink).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_upsert_overwrites() {
        let mut store = LabelStore::new();
        store.upsert(record(2));
        let mut edited = record(2);
        edited.classification = Classification::NoFeature;
        edited.edited = true;
        store.upsert(edited);

        assert_eq!(store.len(), 1);
        let rec = store.get(2).unwrap();
        assert_eq!(rec.classification, Classification::NoFeature);
        assert!(rec.edited);
    }

    #[test]
    fn test_flush_load_roundtrip() {
        let mut store = LabelStore::new();
        store.upsert(record(0));
        store.upsert(record(3));

        let mut sink = MemorySink::new();
        store.flush(&mut sink).unwrap();

        let loaded = LabelStore::load(&sink).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.positions().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(loaded.get(3).unwrap().reference, "http://img/3.png");
    }

    #[test]
    fn test_flush_uses_string_position_keys() {
        let mut store = LabelStore::new();
        store.upsert(record(7));

        let mut sink = MemorySink::new();
        store.flush(&mut sink).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(sink.contents().unwrap()).unwrap();
        assert!(value.get("7").is_some());
        assert_eq!(value["7"]["index"], 7);
    }

    #[test]
    fn test_corrupt_content_is_corrupt_store() {
        let err = LabelStore::from_json_bytes(b"not json at all").unwrap_err();
        assert!(matches!(err, LightboxError::CorruptStore(_)));

        let err = LabelStore::from_json_bytes(b"{\"abc\": {}}").unwrap_err();
        assert!(matches!(err, LightboxError::CorruptStore(_)));
    }

    #[test]
    fn test_retain_in_range_drops_stale_records() {
        let mut store = LabelStore::new();
        store.upsert(record(0));
        store.upsert(record(4));
        store.upsert(record(9));

        let dropped = store.retain_in_range(5);
        assert_eq!(dropped, 1);
        assert_eq!(store.positions().collect::<Vec<_>>(), vec![0, 4]);
    }
}
