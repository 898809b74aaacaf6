//! Timezone projection and display formatting of resolved slots.
//!
//! Projection is a relabeling: the instants stay fixed and only their local
//! representation changes.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};
use crate::interval::TimeSlot;

/// Parse an IANA timezone name (e.g. `"America/New_York"`).
///
/// # Errors
/// Returns [`AvailabilityError::InvalidTimezone`] if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AvailabilityError::InvalidTimezone(name.to_string()))
}

/// Check that `name` is a known IANA zone without keeping the parsed value.
///
/// Used where instants are zone-independent but an unknown owner zone must
/// still be rejected the same way the full computation rejects it.
pub fn validate_timezone(name: &str) -> Result<()> {
    parse_timezone(name).map(|_| ())
}

/// Relabel every slot into `tz`. Instants and availability are unchanged.
pub fn project_slots(slots: &[TimeSlot<Utc>], tz: &Tz) -> Vec<TimeSlot<Tz>> {
    slots.iter().map(|s| s.with_timezone(tz)).collect()
}

/// Clock style for [`format_slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    /// `9:00 AM - 9:30 AM`
    #[default]
    TwelveHour,
    /// `09:00 - 09:30`
    TwentyFourHour,
}

impl ClockFormat {
    fn pattern(self) -> &'static str {
        match self {
            ClockFormat::TwelveHour => "%-I:%M %p",
            ClockFormat::TwentyFourHour => "%H:%M",
        }
    }
}

/// Render a slot's local start and end times in `tz`, e.g. `"9:00 AM - 9:30 AM"`.
pub fn format_slot<Z: TimeZone>(slot: &TimeSlot<Z>, tz: &Tz, format: ClockFormat) -> String {
    let pattern = format.pattern();
    format!(
        "{} - {}",
        slot.start.with_timezone(tz).format(pattern),
        slot.end.with_timezone(tz).format(pattern)
    )
}
