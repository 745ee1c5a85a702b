//! Window selection of records.

use crate::api::{ContentRecord, TimeWindow};

/// Keep the records created at or after the window cutoff.
///
/// Records newer than the anchor are kept; the source clock is allowed to run
/// slightly ahead of ours.
pub fn filter_window(records: Vec<ContentRecord>, window: &TimeWindow) -> Vec<ContentRecord> {
    let cutoff = window.cutoff();
    let total = records.len();
    let kept: Vec<ContentRecord> = records
        .into_iter()
        .filter(|r| r.created_at >= cutoff)
        .collect();
    log::debug!(
        "Window {} kept {} of {} records (cutoff {})",
        window.range,
        kept.len(),
        total,
        cutoff
    );
    kept
}
