//! Reviewer intents and the outcomes of applying them.

use crate::label::Classification;

/// A discrete reviewer intent delivered to the state machine.
///
/// Events may originate from pointer clicks, keyboard shortcuts, or a
/// terminal prompt; the machine is indifferent to origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Classify the item at the current cursor.
    Classify(Classification),
    /// Move to the previous item.
    Prev,
    /// Move to the next item (requires the current item to be labeled).
    Next,
    /// Flip the session-wide lock override.
    ToggleLock,
    /// Flip the transient display-transform flag.
    ToggleInvert,
    /// From the terminal state, return the cursor to the first item.
    Restart,
}

/// Why an event was refused. Refusals never change session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// Classify on an already-labeled item without lock override.
    LabelLocked { position: usize },
    /// Next on an item that has no label yet.
    NotClassified,
    /// Prev at the first item.
    AtStart,
    /// The review pass is already complete.
    SessionComplete,
    /// Restart outside the terminal state.
    NotComplete,
}

impl std::fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefusalReason::LabelLocked { position } => write!(
                f,
                "item {} is already labeled; enable edit mode to change it",
                position + 1
            ),
            RefusalReason::NotClassified => {
                write!(f, "must classify the current item before advancing")
            }
            RefusalReason::AtStart => write!(f, "already at the first item"),
            RefusalReason::SessionComplete => write!(f, "the review pass is complete"),
            RefusalReason::NotComplete => {
                write!(f, "restart is only available once the review pass is complete")
            }
        }
    }
}

/// What applying an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new label was recorded; not yet flushed.
    Labeled { pending: usize, threshold: usize },
    /// A new label was recorded and the threshold flush succeeded.
    LabeledAndSaved,
    /// An existing label was overwritten and flushed immediately.
    EditedAndSaved,
    /// The label was recorded in memory but the flush failed; it stays
    /// counted toward the next flush attempt.
    SaveFailed { pending: usize, error: String },
    /// The cursor moved to a new item.
    Moved { cursor: usize },
    /// The cursor advanced past the last item; the pass is complete.
    Completed,
    /// The event was refused; nothing changed.
    Refused(RefusalReason),
    /// The lock override was flipped.
    LockToggled { enabled: bool },
    /// The display-transform flag was flipped.
    InvertToggled { inverted: bool },
    /// The cursor returned to the first item for another pass.
    Restarted,
}
