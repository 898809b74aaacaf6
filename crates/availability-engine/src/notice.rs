//! Minimum-notice filtering.

use chrono::{DateTime, Duration, Utc};

use crate::interval::TimeSlot;

/// Drop every slot that does not start strictly after `now + notice_minutes`.
///
/// This is a hard drop: failing slots are removed, not flagged. `now` is
/// supplied by the caller and read once per computation, so the cut-off is
/// the same for every slot. A cut-off past the last representable instant
/// drops everything.
pub fn filter_by_notice(
    slots: Vec<TimeSlot>,
    now: DateTime<Utc>,
    notice_minutes: u32,
) -> Vec<TimeSlot> {
    let cutoff = now
        .checked_add_signed(Duration::minutes(i64::from(notice_minutes)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    slots.into_iter().filter(|s| s.start > cutoff).collect()
}
