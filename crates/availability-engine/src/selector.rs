//! Pick the weekly rules that apply to a calendar date.
//!
//! The target date is a timezone-naive calendar date already expressed in
//! the owner's timezone, so its weekday is read directly from the date.

use chrono::{Datelike, NaiveDate};

use crate::error::{AvailabilityError, Result};
use crate::projector::validate_timezone;
use crate::rule::WeeklyRule;

/// Return every rule whose day set contains `date`'s weekday, in input order.
///
/// Several rules may apply to the same weekday (e.g. a morning and an
/// afternoon block); each is returned separately and never merged.
pub fn select_rules(date: NaiveDate, rules: &[WeeklyRule]) -> Vec<&WeeklyRule> {
    let weekday = date.weekday();
    rules.iter().filter(|r| r.applies_on(weekday)).collect()
}

/// List the dates of a month on which at least one rule applies.
///
/// Intended for calendar-widget highlighting: it does not look at bookings
/// or notice, so a listed date may still have no bookable slot.
///
/// # Arguments
///
/// * `year` — Calendar year.
/// * `month` — Month number, 1 = January.
/// * `rules` — The owner's weekly rules.
/// * `owner_timezone` — IANA timezone the rules are interpreted in.
///
/// # Errors
///
/// Returns [`AvailabilityError::InvalidDate`] if `year`/`month` is not a
/// valid month, or [`AvailabilityError::InvalidTimezone`] for an unknown zone.
pub fn dates_with_availability(
    year: i32,
    month: u32,
    rules: &[WeeklyRule],
    owner_timezone: &str,
) -> Result<Vec<NaiveDate>> {
    validate_timezone(owner_timezone)?;

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        AvailabilityError::InvalidDate(format!("{}-{:02} is not a valid month", year, month))
    })?;

    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .filter(|d| !select_rules(*d, rules).is_empty())
        .collect())
}
