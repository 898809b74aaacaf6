//! DST transition policies for local rule boundaries.
//!
//! A rule's clock times are wall-clock values in the owner's timezone. On a
//! spring-forward day a boundary such as 02:30 may not exist; on a fall-back
//! day it may exist twice. This module turns a local datetime into an
//! instant under an explicit policy.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Policy for local boundaries that fall inside a DST gap.
///
/// Ambiguous (repeated) local times always resolve to the earliest occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// The rule yields no slots on a day where one of its boundaries does not exist.
    Skip,
    /// Move the boundary to the first local minute after the gap.
    #[default]
    ShiftForward,
}

// Longest real-world gap is one hour; two leaves headroom for historical zones.
const MAX_GAP_MINUTES: i64 = 120;

/// Resolve a local wall-clock datetime in `tz` to an absolute instant.
///
/// Returns `None` when `local` falls in a gap and either `policy` is
/// [`DstPolicy::Skip`] or the gap is longer than the forward scan (a zone
/// that skipped a whole calendar day, such as Pacific/Apia on 2011-12-30).
pub fn resolve_local(tz: &Tz, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Skip => None,
            DstPolicy::ShiftForward => (1..=MAX_GAP_MINUTES).find_map(|step| {
                local
                    .checked_add_signed(Duration::minutes(step))
                    .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
                    .map(|dt| dt.with_timezone(&Utc))
            }),
        },
    }
}
