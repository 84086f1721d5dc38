//! Integration tests for full annotation sessions.

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use lightbox::catalog::{Catalog, Parser};
use lightbox::session::{Event, Outcome, RefusalReason, Session, SessionConfig};
use lightbox::sink::{FileSink, MemorySink};
use lightbox::{Classification, ExportFormat, LabelStore};

/// Helper to create a temporary catalog file with given content.
fn create_catalog_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn test_catalog(n: usize) -> Catalog {
    let headers = vec!["image_url".to_string(), "subject_id".to_string()];
    let rows = (0..n)
        .map(|i| vec![format!("http://img/{i}.png"), format!("s{i}")])
        .collect();
    Catalog::from_rows(&headers, rows, "image_url").unwrap()
}

// =============================================================================
// Auto-save Scenario (catalog of 3, threshold 2)
// =============================================================================

#[test]
fn test_auto_save_scenario() {
    let mut session = Session::start(
        test_catalog(3),
        MemorySink::new(),
        SessionConfig::with_auto_save_threshold(2),
    );

    // Classify item 0: below threshold, no flush
    let outcome = session.apply(Event::Classify(Classification::HasFeature));
    assert_eq!(
        outcome,
        Outcome::Labeled {
            pending: 1,
            threshold: 2
        }
    );
    assert_eq!(session.sink().write_count(), 0);

    // Classify item 1: threshold reached, flush, counter resets
    session.apply(Event::Next);
    let outcome = session.apply(Event::Classify(Classification::NoFeature));
    assert_eq!(outcome, Outcome::LabeledAndSaved);
    assert_eq!(session.sink().write_count(), 1);
    assert_eq!(session.state().unsaved_count, 0);

    let persisted = LabelStore::from_json_bytes(session.sink().contents().unwrap()).unwrap();
    assert_eq!(persisted.len(), 2);

    // Advance to item 2, then try to advance past it while unlabeled
    session.apply(Event::Next);
    assert_eq!(session.state().cursor, 2);
    let outcome = session.apply(Event::Next);
    assert_eq!(outcome, Outcome::Refused(RefusalReason::NotClassified));
    assert_eq!(session.state().cursor, 2);

    // Classify item 2: count 1, no flush
    let outcome = session.apply(Event::Classify(Classification::Skipped));
    assert_eq!(
        outcome,
        Outcome::Labeled {
            pending: 1,
            threshold: 2
        }
    );
    assert_eq!(session.sink().write_count(), 1);

    // Next moves past the last item into the terminal state
    assert_eq!(session.apply(Event::Next), Outcome::Completed);
    assert!(session.is_complete());
}

// =============================================================================
// Edit Scenario (lock override, immediate flush)
// =============================================================================

#[test]
fn test_edit_scenario_flushes_regardless_of_pending_count() {
    let mut session = Session::start(
        test_catalog(3),
        MemorySink::new(),
        SessionConfig::with_auto_save_threshold(50),
    );

    session.apply(Event::Classify(Classification::HasFeature));
    assert_eq!(session.sink().write_count(), 0);

    // Locked without the override
    let outcome = session.apply(Event::Classify(Classification::NoFeature));
    assert_eq!(
        outcome,
        Outcome::Refused(RefusalReason::LabelLocked { position: 0 })
    );

    // Enable editing and re-classify: edited flag set, flushed immediately
    session.apply(Event::ToggleLock);
    let outcome = session.apply(Event::Classify(Classification::NoFeature));
    assert_eq!(outcome, Outcome::EditedAndSaved);
    assert_eq!(session.sink().write_count(), 1);

    let persisted = LabelStore::from_json_bytes(session.sink().contents().unwrap()).unwrap();
    let record = persisted.get(0).unwrap();
    assert!(record.edited);
    assert_eq!(record.classification, Classification::NoFeature);
}

// =============================================================================
// Resume Across Sessions (file-backed)
// =============================================================================

#[test]
fn test_resume_from_label_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let labels_path = dir.path().join("labels.json");

    {
        let sink = FileSink::new(&labels_path);
        let mut session = Session::start(
            test_catalog(5),
            sink,
            SessionConfig::with_auto_save_threshold(1),
        );

        // Label 0, 1, 2; the file is then rewritten below so that the
        // stored positions are {0, 1, 3}, leaving 2 as the first gap.
        session.apply(Event::Classify(Classification::HasFeature));
        session.apply(Event::Next);
        session.apply(Event::Classify(Classification::NoFeature));
        session.apply(Event::Next);
        session.apply(Event::Classify(Classification::Skipped));
        session.apply(Event::ToggleLock);
        session.save().expect("manual save failed");
    }

    // Tamper: re-write the store with only positions {0, 1, 3}
    let stored = std::fs::read(&labels_path).unwrap();
    let mut value: serde_json::Value = serde_json::from_slice(&stored).unwrap();
    let map = value.as_object_mut().unwrap();
    let mut moved = map.remove("2").unwrap();
    moved["index"] = serde_json::json!(3);
    map.insert("3".to_string(), moved);
    std::fs::write(&labels_path, serde_json::to_vec(&value).unwrap()).unwrap();

    let sink = FileSink::new(&labels_path);
    let session = Session::start(test_catalog(5), sink, SessionConfig::default());

    // Resume lands on the first unlabeled position, lock override resets
    assert_eq!(session.state().cursor, 2);
    assert!(!session.state().lock_override);
    assert_eq!(session.store().len(), 3);
}

#[test]
fn test_resume_fully_labeled_lands_on_last_item() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let labels_path = dir.path().join("labels.json");

    {
        let sink = FileSink::new(&labels_path);
        let mut session = Session::start(
            test_catalog(5),
            sink,
            SessionConfig::with_auto_save_threshold(1),
        );
        for _ in 0..5 {
            session.apply(Event::Classify(Classification::HasFeature));
            session.apply(Event::Next);
        }
        assert!(session.is_complete());
    }

    let sink = FileSink::new(&labels_path);
    let session = Session::start(test_catalog(5), sink, SessionConfig::default());

    // Never resumes directly into the terminal state
    assert_eq!(session.state().cursor, 4);
    assert!(!session.is_complete());
}

// =============================================================================
// Corrupt Store Recovery
// =============================================================================

#[test]
fn test_corrupt_label_file_starts_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let labels_path = dir.path().join("labels.json");
    std::fs::write(&labels_path, b"{ not valid json").unwrap();

    let sink = FileSink::new(&labels_path);
    let mut session = Session::start(test_catalog(2), sink, SessionConfig::default());

    assert!(session.store().is_empty());
    assert_eq!(session.state().cursor, 0);

    // The session remains usable and the next flush replaces the file
    session.apply(Event::Classify(Classification::HasFeature));
    session.save().unwrap();

    let reloaded = LabelStore::load(&FileSink::new(&labels_path)).unwrap();
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn test_labels_beyond_catalog_are_dropped() {
    let mut oversized = Session::start(
        test_catalog(5),
        MemorySink::new(),
        SessionConfig::with_auto_save_threshold(1),
    );
    for _ in 0..5 {
        oversized.apply(Event::Classify(Classification::NoFeature));
        oversized.apply(Event::Next);
    }
    let bytes = oversized.sink().contents().unwrap().to_vec();

    // Same label file against a catalog that shrank to 3 items
    let session = Session::start(
        test_catalog(3),
        MemorySink::with_contents(bytes),
        SessionConfig::default(),
    );
    assert_eq!(session.store().len(), 3);
    assert_eq!(session.state().cursor, 2);
}

// =============================================================================
// Flush Failure (at-least-once durability)
// =============================================================================

#[test]
fn test_flush_failure_retries_on_next_trigger() {
    let mut sink = MemorySink::new();
    sink.set_fail_writes(true);
    let mut session = Session::start(
        test_catalog(3),
        sink,
        SessionConfig::with_auto_save_threshold(2),
    );

    session.apply(Event::Classify(Classification::HasFeature));
    session.apply(Event::Next);
    let outcome = session.apply(Event::Classify(Classification::NoFeature));
    assert!(matches!(outcome, Outcome::SaveFailed { pending: 2, .. }));

    // In-memory labels survive the failure
    assert_eq!(session.store().len(), 2);

    // A manual save still fails while the sink is down
    assert!(session.save().is_err());
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_terminal_export_csv_and_json() {
    let mut session = Session::start(
        test_catalog(2),
        MemorySink::new(),
        SessionConfig::default(),
    );
    session.apply(Event::Classify(Classification::HasFeature));
    session.apply(Event::Next);
    session.apply(Event::Classify(Classification::Skipped));
    session.apply(Event::Next);
    assert!(session.is_complete());

    let mut csv_sink = MemorySink::new();
    session.export(&mut csv_sink, ExportFormat::Csv).unwrap();
    let text = String::from_utf8(csv_sink.contents().unwrap().to_vec()).unwrap();
    assert!(text.starts_with("position,reference,classification,created_at,edited"));
    assert_eq!(text.lines().count(), 3);

    let mut json_sink = MemorySink::new();
    session.export(&mut json_sink, ExportFormat::Json).unwrap();
    let reloaded = LabelStore::from_json_bytes(json_sink.contents().unwrap()).unwrap();
    assert_eq!(reloaded.len(), 2);
}

// =============================================================================
// File-backed Catalog End to End
// =============================================================================

#[test]
fn test_catalog_file_to_completed_session() {
    let catalog_file = create_catalog_file(
        "subject_id,image_url,hash\n\
         s1,http://img/1.png,aa\n\
         s2,http://img/2.png,bb\n",
    );
    let catalog = Parser::new()
        .parse_file(catalog_file.path())
        .expect("catalog load failed");

    assert_eq!(catalog.len(), 2);
    let source = catalog.source().expect("source metadata missing");
    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 2);
    assert!(source.hash.starts_with("sha256:"));

    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(dir.path().join("labels.json"));
    let mut session = Session::start(catalog, sink, SessionConfig::with_auto_save_threshold(1));

    session.apply(Event::Classify(Classification::HasFeature));
    session.apply(Event::Next);
    session.apply(Event::Classify(Classification::NoFeature));
    session.apply(Event::Next);

    assert!(session.is_complete());
    let stats = session.stats();
    assert_eq!(stats.classified, 2);
    assert_eq!(stats.has_feature, 1);
    assert_eq!(stats.no_feature, 1);
    assert_eq!(stats.progress(), 1.0);

    // Metadata snapshot rode along into the persisted record
    let reloaded = LabelStore::load(&FileSink::new(dir.path().join("labels.json"))).unwrap();
    assert_eq!(reloaded.get(0).unwrap().metadata["subject_id"], "s1");
}
