//! Top-level availability computation for one date and one event type.
//!
//! Runs the five stages in order: rule selection, slot generation, conflict
//! resolution, notice filtering and timezone projection. Every stage is a
//! pure function; the only outside value, "now", is passed in by the caller.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::EventTypeConfig;
use crate::conflict::resolve_conflicts;
use crate::dst::DstPolicy;
use crate::error::Result;
use crate::generator::generate_slots;
use crate::interval::{BookedInterval, TimeSlot};
use crate::notice::filter_by_notice;
use crate::projector::{parse_timezone, project_slots};
use crate::rule::WeeklyRule;
use crate::selector::select_rules;

/// Compute the bookable slots for `date`.
///
/// Returns slots in chronological order of start (slots from different rules
/// with the same start keep rule order), each flagged available or
/// unavailable, labeled in
/// `target_timezone` (or the owner's zone when `None`). Slots failing the
/// minimum notice are absent from the result.
///
/// # Arguments
///
/// * `date` — Calendar date in the owner's timezone.
/// * `rules` — The owner's weekly working-hour rules.
/// * `bookings` — Committed bookings that occupy the owner's calendar.
/// * `config` — Event-type length, buffers, step and notice.
/// * `owner_timezone` — IANA zone the rules and "now" are anchored in.
/// * `target_timezone` — Optional IANA zone for labeling the output.
/// * `now` — The current instant, read once by the caller.
///
/// # Errors
///
/// Returns [`crate::AvailabilityError::InvalidTimezone`] for an unknown zone
/// or [`crate::AvailabilityError::InvalidConfig`] for a zero length or step.
/// No partial result is returned on error.
///
/// # Examples
///
/// ```
/// use availability_engine::{compute_availability, EventTypeConfig, WeeklyRule};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let rules = vec![WeeklyRule::new(&[1, 2, 3, 4, 5], "09:00", "17:00").unwrap()];
/// let monday = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
/// let now = Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap();
///
/// let slots = compute_availability(
///     monday,
///     &rules,
///     &[],
///     &EventTypeConfig::with_length(30),
///     "UTC",
///     None,
///     now,
/// )
/// .unwrap();
/// assert_eq!(slots.len(), 16);
/// ```
pub fn compute_availability(
    date: NaiveDate,
    rules: &[WeeklyRule],
    bookings: &[BookedInterval],
    config: &EventTypeConfig,
    owner_timezone: &str,
    target_timezone: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Vec<TimeSlot<Tz>>> {
    compute_availability_with_policy(
        date,
        rules,
        bookings,
        config,
        owner_timezone,
        target_timezone,
        now,
        DstPolicy::default(),
    )
}

/// [`compute_availability`] with an explicit policy for rule boundaries
/// that fall inside a DST gap.
#[allow(clippy::too_many_arguments)]
pub fn compute_availability_with_policy(
    date: NaiveDate,
    rules: &[WeeklyRule],
    bookings: &[BookedInterval],
    config: &EventTypeConfig,
    owner_timezone: &str,
    target_timezone: Option<&str>,
    now: DateTime<Utc>,
    policy: DstPolicy,
) -> Result<Vec<TimeSlot<Tz>>> {
    // Zones and config are checked before any slot is generated.
    let owner_tz = parse_timezone(owner_timezone)?;
    let display_tz = match target_timezone {
        Some(name) => parse_timezone(name)?,
        None => owner_tz,
    };
    config.validate()?;

    let applicable = select_rules(date, rules);
    if applicable.is_empty() {
        tracing::debug!(%date, rules = rules.len(), "no weekly rule applies");
        return Ok(Vec::new());
    }

    let mut candidates: Vec<TimeSlot> = Vec::new();
    for rule in &applicable {
        candidates.extend(generate_slots(rule, date, config, &owner_tz, policy)?);
    }
    // Stable: slots with equal starts keep rule order.
    candidates.sort_by_key(|s| s.start);
    let generated = candidates.len();

    let resolved = resolve_conflicts(
        candidates,
        bookings,
        config.before_buffer,
        config.after_buffer,
    );
    let unavailable = resolved.iter().filter(|s| !s.available).count();

    let kept = filter_by_notice(resolved, now, config.minimum_booking_notice);

    tracing::debug!(
        %date,
        owner_timezone,
        applicable_rules = applicable.len(),
        generated,
        unavailable,
        dropped_by_notice = generated - kept.len(),
        "computed availability"
    );

    Ok(project_slots(&kept, &display_tz))
}

/// [`compute_availability`] anchored at the system clock, read once.
pub fn compute_availability_now(
    date: NaiveDate,
    rules: &[WeeklyRule],
    bookings: &[BookedInterval],
    config: &EventTypeConfig,
    owner_timezone: &str,
    target_timezone: Option<&str>,
) -> Result<Vec<TimeSlot<Tz>>> {
    let now = Utc::now();
    compute_availability(
        date,
        rules,
        bookings,
        config,
        owner_timezone,
        target_timezone,
        now,
    )
}
