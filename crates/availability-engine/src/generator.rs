//! Expand a weekly rule into fixed-length candidate slots for one date.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;

use crate::config::EventTypeConfig;
use crate::dst::{resolve_local, DstPolicy};
use crate::error::Result;
use crate::interval::TimeSlot;
use crate::rule::WeeklyRule;

/// Generate every candidate slot for `rule` on `date` in the owner's zone `tz`.
///
/// Slots are `config.length` minutes long, start at the rule's local start
/// time and advance by [`EventTypeConfig::step_minutes`]. A slot is kept
/// while its end is at or before the rule's local end time. Every returned
/// slot is available; conflicts are decided later. A slot or step that would
/// run past the last representable instant ends the walk like any slot past
/// the window end.
///
/// Rule boundaries are resolved to instants once, under `policy`; stepping
/// between them is absolute-minute arithmetic, so a DST change inside the
/// window shortens or lengthens it by the offset change.
///
/// # Errors
/// Returns [`crate::AvailabilityError::InvalidConfig`] if the length or step
/// is zero, before any slot is produced.
pub fn generate_slots(
    rule: &WeeklyRule,
    date: NaiveDate,
    config: &EventTypeConfig,
    tz: &Tz,
    policy: DstPolicy,
) -> Result<Vec<TimeSlot>> {
    config.validate()?;

    let window = resolve_local(tz, date.and_time(rule.start()), policy)
        .zip(resolve_local(tz, date.and_time(rule.end()), policy));
    let Some((window_start, window_end)) = window else {
        tracing::warn!(
            %date,
            timezone = %tz,
            start = %rule.start(),
            end = %rule.end(),
            ?policy,
            "rule boundary cannot be resolved in this zone, no slots for this date"
        );
        return Ok(Vec::new());
    };

    let step = Duration::minutes(i64::from(config.step_minutes()));
    let mut slots = Vec::new();
    let mut cursor = window_start;

    while cursor < window_end {
        let Some(slot) = TimeSlot::starting_at(cursor, config.length) else {
            break;
        };
        if slot.end > window_end {
            break;
        }
        slots.push(slot);
        match cursor.checked_add_signed(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    Ok(slots)
}
