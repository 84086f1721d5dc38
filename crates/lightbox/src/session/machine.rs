//! The session machine: one reducer over reviewer events.

use tracing::warn;

use crate::catalog::{Catalog, Item};
use crate::error::{LightboxError, Result};
use crate::label::{Classification, ExportFormat, LabelRecord, LabelStore};
use crate::sink::DurableSink;
use crate::stats::{summarize, SummaryStats};

use super::cursor::resume_position;
use super::event::{Event, Outcome, RefusalReason};
use super::state::{SessionConfig, SessionState};

/// Which side of the terminal boundary the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `cursor < catalog.len()`: an item is under review.
    Browsing,
    /// `cursor == catalog.len()`: the pass is finished.
    Complete,
}

/// One review pass over a catalog.
///
/// Owns the catalog, the label store, and the sink exclusively; every
/// event runs to completion before the next is accepted.
pub struct Session<S: DurableSink> {
    catalog: Catalog,
    store: LabelStore,
    state: SessionState,
    config: SessionConfig,
    sink: S,
}

impl<S: DurableSink> Session<S> {
    /// Start (or resume) a session.
    ///
    /// Loads any existing labels from the sink; unreadable or corrupt
    /// content is logged and treated as an empty store rather than
    /// aborting. Records outside the catalog bounds are dropped. The
    /// cursor lands on the first unlabeled position.
    pub fn start(catalog: Catalog, sink: S, config: SessionConfig) -> Self {
        let mut store = match LabelStore::load(&sink) {
            Ok(store) => store,
            Err(e) => {
                warn!("existing labels unreadable, starting empty: {e}");
                LabelStore::new()
            }
        };

        let dropped = store.retain_in_range(catalog.len());
        if dropped > 0 {
            warn!(dropped, "dropped label records outside the catalog bounds");
        }

        let cursor = resume_position(catalog.len(), &store);

        Self {
            catalog,
            store,
            state: SessionState::at(cursor),
            config,
            sink,
        }
    }

    /// Handle one reviewer event.
    pub fn apply(&mut self, event: Event) -> Outcome {
        match event {
            Event::Classify(classification) => self.classify(classification),
            Event::Prev => self.prev(),
            Event::Next => self.next(),
            Event::ToggleLock => {
                self.state.lock_override = !self.state.lock_override;
                Outcome::LockToggled {
                    enabled: self.state.lock_override,
                }
            }
            Event::ToggleInvert => {
                self.state.display_inverted = !self.state.display_inverted;
                Outcome::InvertToggled {
                    inverted: self.state.display_inverted,
                }
            }
            Event::Restart => self.restart(),
        }
    }

    /// Classify the item at the current cursor.
    ///
    /// New labels are batched toward the auto-save threshold; overwrites
    /// require the lock override and flush immediately so a correction is
    /// never lost to an unflushed batch. A failed flush never rolls back
    /// the in-memory write.
    fn classify(&mut self, classification: Classification) -> Outcome {
        let position = self.state.cursor;
        let Some(item) = self.catalog.item(position) else {
            return Outcome::Refused(RefusalReason::SessionComplete);
        };

        let already_labeled = self.store.contains(position);
        if self.validate_writable(position).is_err() {
            return Outcome::Refused(RefusalReason::LabelLocked { position });
        }

        let record = if already_labeled {
            LabelRecord::edited(item, classification)
        } else {
            LabelRecord::new(item, classification)
        };
        self.store.upsert(record);

        if already_labeled {
            // Edits bypass the batch entirely.
            match self.store.flush(&mut self.sink) {
                Ok(()) => {
                    self.state.unsaved_count = 0;
                    Outcome::EditedAndSaved
                }
                Err(e) => {
                    self.state.unsaved_count += 1;
                    Outcome::SaveFailed {
                        pending: self.state.unsaved_count,
                        error: e.to_string(),
                    }
                }
            }
        } else {
            self.state.unsaved_count += 1;
            if self.state.unsaved_count >= self.config.auto_save_threshold {
                match self.store.flush(&mut self.sink) {
                    Ok(()) => {
                        self.state.unsaved_count = 0;
                        Outcome::LabeledAndSaved
                    }
                    Err(e) => Outcome::SaveFailed {
                        pending: self.state.unsaved_count,
                        error: e.to_string(),
                    },
                }
            } else {
                Outcome::Labeled {
                    pending: self.state.unsaved_count,
                    threshold: self.config.auto_save_threshold,
                }
            }
        }
    }

    /// Move back one item. Refused only at the first position.
    fn prev(&mut self) -> Outcome {
        if self.state.cursor == 0 {
            return Outcome::Refused(RefusalReason::AtStart);
        }
        self.state.display_inverted = false;
        self.state.cursor -= 1;
        Outcome::Moved {
            cursor: self.state.cursor,
        }
    }

    /// Advance past the current item, which must be labeled. Advancing
    /// past the last item enters the terminal state.
    fn next(&mut self) -> Outcome {
        let len = self.catalog.len();
        if self.state.cursor >= len {
            return Outcome::Refused(RefusalReason::SessionComplete);
        }
        if !self.store.contains(self.state.cursor) {
            return Outcome::Refused(RefusalReason::NotClassified);
        }

        self.state.display_inverted = false;
        self.state.cursor += 1;
        if self.state.cursor == len {
            Outcome::Completed
        } else {
            Outcome::Moved {
                cursor: self.state.cursor,
            }
        }
    }

    /// From the terminal state, begin another pass at the first item.
    fn restart(&mut self) -> Outcome {
        if self.state.cursor < self.catalog.len() {
            return Outcome::Refused(RefusalReason::NotComplete);
        }
        self.state.cursor = 0;
        self.state.display_inverted = false;
        Outcome::Restarted
    }

    /// A position is writable when it is unlabeled or the lock override
    /// is on.
    fn validate_writable(&self, position: usize) -> Result<()> {
        if self.store.contains(position) && !self.state.lock_override {
            return Err(LightboxError::LockedLabel { position });
        }
        Ok(())
    }

    /// Flush the label store now, outside any auto-save trigger.
    pub fn save(&mut self) -> Result<()> {
        self.store.flush(&mut self.sink)?;
        self.state.unsaved_count = 0;
        Ok(())
    }

    /// Export the label set to another sink.
    pub fn export(&self, sink: &mut dyn DurableSink, format: ExportFormat) -> Result<()> {
        self.store.export(sink, format)
    }

    /// Summary statistics for the current store.
    pub fn stats(&self) -> SummaryStats {
        summarize(self.catalog.len(), &self.store)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if self.state.cursor >= self.catalog.len() {
            Phase::Complete
        } else {
            Phase::Browsing
        }
    }

    /// Whether the pass is finished.
    pub fn is_complete(&self) -> bool {
        self.phase() == Phase::Complete
    }

    /// The item under the cursor, absent in the terminal state.
    pub fn current_item(&self) -> Option<&Item> {
        self.catalog.item(self.state.cursor)
    }

    /// The label for the item under the cursor, if any.
    pub fn current_record(&self) -> Option<&LabelRecord> {
        self.store.get(self.state.cursor)
    }

    /// The catalog under review.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The label store.
    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    /// The session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The durable sink (e.g. to report its path).
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
