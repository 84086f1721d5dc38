//! Session state and configuration.

use serde::{Deserialize, Serialize};

/// Default number of new labels batched before an auto-save flush.
pub const DEFAULT_AUTO_SAVE_THRESHOLD: usize = 5;

/// The mutable state of one review pass.
///
/// Owned by the session machine; there are no ambient globals. `cursor`
/// satisfies `0 <= cursor <= catalog.len()`, where equality with the length
/// is the terminal "review complete" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current item position.
    pub cursor: usize,
    /// Label writes since the last successful flush.
    pub unsaved_count: usize,
    /// Session-wide toggle permitting edits to already-labeled items.
    pub lock_override: bool,
    /// Transient display-transform flag; cleared on navigation.
    pub display_inverted: bool,
}

impl SessionState {
    /// Fresh state at the given cursor.
    pub fn at(cursor: usize) -> Self {
        Self {
            cursor,
            unsaved_count: 0,
            lock_override: false,
            display_inverted: false,
        }
    }
}

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// New labels batched before a durability flush. Clamped to at least 1.
    pub auto_save_threshold: usize,
}

impl SessionConfig {
    /// Config with a specific auto-save threshold.
    pub fn with_auto_save_threshold(threshold: usize) -> Self {
        Self {
            auto_save_threshold: threshold.max(1),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_save_threshold: DEFAULT_AUTO_SAVE_THRESHOLD,
        }
    }
}
