//! The first-unlabeled resume rule.

use crate::label::LabelStore;

/// Where a session resumes given an existing label store.
///
/// Scans positions in catalog order and lands on the first one without a
/// record. When every position is labeled the cursor lands on the *last
/// item*, not the completion state: completion is only ever reached by
/// navigating forward past the last item, so resuming always presents a
/// reviewable item.
pub fn resume_position(len: usize, store: &LabelStore) -> usize {
    for position in 0..len {
        if !store.contains(position) {
            return position;
        }
    }
    len.saturating_sub(1)
}
