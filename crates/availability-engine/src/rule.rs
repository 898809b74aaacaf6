//! Recurring weekly working-hour rules.
//!
//! A [`WeeklyRule`] is a set of weekdays plus a local start/end clock time.
//! Clock times carry no date and no timezone; they only become instants once
//! combined with a calendar date and the owner's timezone (see
//! [`crate::generator`]).

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Set of weekdays, numbered 0–6 with Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySet(u8);

impl DaySet {
    /// Build a day set from Sunday-based weekday numbers.
    ///
    /// # Errors
    /// Returns [`AvailabilityError::InvalidRule`] for any number above 6.
    pub fn from_numbers(days: &[u8]) -> Result<Self> {
        let mut bits = 0u8;
        for &day in days {
            if day > 6 {
                return Err(AvailabilityError::InvalidRule(format!(
                    "weekday {} is outside 0-6 (Sunday = 0)",
                    day
                )));
            }
            bits |= 1 << day;
        }
        Ok(Self(bits))
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Sunday-based weekday numbers in ascending order.
    pub fn numbers(&self) -> Vec<u8> {
        (0u8..7).filter(|d| self.0 & (1 << d) != 0).collect()
    }
}

/// Parse a local clock string in `H:mm` or `HH:mm` form (hour 0–23, minute 00–59).
///
/// # Errors
/// Returns [`AvailabilityError::InvalidClockTime`] for anything else,
/// including seconds, whitespace, or a single-digit minute.
pub fn parse_clock(s: &str) -> Result<NaiveTime> {
    let invalid = || AvailabilityError::InvalidClockTime(s.to_string());

    let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
        return Err(invalid());
    }

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// A recurring weekly availability window for one owner.
///
/// Invariant: `start < end` on the same day; a rule never spans midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord", into = "RuleRecord")]
pub struct WeeklyRule {
    days: DaySet,
    start: NaiveTime,
    end: NaiveTime,
}

/// The stored shape of a rule: `{ "days": [1,2,3], "startTime": "09:00", "endTime": "17:00" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleRecord {
    days: Vec<u8>,
    start_time: String,
    end_time: String,
}

impl TryFrom<RuleRecord> for WeeklyRule {
    type Error = AvailabilityError;

    fn try_from(record: RuleRecord) -> Result<Self> {
        WeeklyRule::new(&record.days, &record.start_time, &record.end_time)
    }
}

impl From<WeeklyRule> for RuleRecord {
    fn from(rule: WeeklyRule) -> Self {
        RuleRecord {
            days: rule.days.numbers(),
            start_time: rule.start.format("%H:%M").to_string(),
            end_time: rule.end.format("%H:%M").to_string(),
        }
    }
}

impl WeeklyRule {
    /// Parse and validate a rule from weekday numbers and `HH:mm` clock strings.
    ///
    /// # Errors
    /// - [`AvailabilityError::InvalidRule`] if a weekday is outside 0–6 or start ≥ end.
    /// - [`AvailabilityError::InvalidClockTime`] if a clock string is malformed.
    pub fn new(days: &[u8], start: &str, end: &str) -> Result<Self> {
        let days = DaySet::from_numbers(days)?;
        let start = parse_clock(start)?;
        let end = parse_clock(end)?;
        Self::from_parts(days, start, end)
    }

    /// Build a rule from already-parsed parts, still enforcing `start < end`.
    pub fn from_parts(days: DaySet, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(AvailabilityError::InvalidRule(format!(
                "start {} is not before end {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }
        Ok(Self { days, start, end })
    }

    pub fn days(&self) -> DaySet {
        self.days
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn applies_on(&self, weekday: Weekday) -> bool {
        self.days.contains(weekday)
    }

    /// Length of the window in whole minutes.
    pub fn span_minutes(&self) -> u32 {
        let minutes = |t: NaiveTime| t.hour() * 60 + t.minute();
        minutes(self.end) - minutes(self.start)
    }
}
