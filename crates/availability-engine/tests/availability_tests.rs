//! End-to-end tests for the full availability pipeline.

use availability_engine::error::AvailabilityError;
use availability_engine::{
    compute_availability, compute_availability_with_policy, BookedInterval, DstPolicy,
    EventTypeConfig, WeeklyRule,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn utc(d: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, h, m, 0).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

fn weekdays_nine_to_five() -> Vec<WeeklyRule> {
    vec![WeeklyRule::new(&[1, 2, 3, 4, 5], "09:00", "17:00").unwrap()]
}

fn booking(sh: u32, sm: u32, eh: u32, em: u32) -> BookedInterval {
    BookedInterval::new(utc(16, sh, sm), utc(16, eh, em)).unwrap()
}

// ── Reference scenarios ─────────────────────────────────────────────────────

#[test]
fn open_monday_has_sixteen_half_hour_slots() {
    let slots = compute_availability(
        monday(),
        &weekdays_nine_to_five(),
        &[],
        &EventTypeConfig::with_length(30),
        "UTC",
        None,
        utc(16, 8, 0),
    )
    .unwrap();

    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0].start, utc(16, 9, 0));
    assert_eq!(slots[0].end, utc(16, 9, 30));
    assert_eq!(slots[15].start, utc(16, 16, 30));
    assert_eq!(slots[15].end, utc(16, 17, 0));
    assert!(slots.iter().all(|s| s.available));
    assert!(slots.iter().all(|s| s.duration_minutes() == 30));
}

#[test]
fn booking_with_after_buffer_blocks_its_slot_and_the_next() {
    let config = EventTypeConfig::with_length(30).buffers(0, 15);
    let slots = compute_availability(
        monday(),
        &weekdays_nine_to_five(),
        &[booking(10, 0, 10, 30)],
        &config,
        "UTC",
        None,
        utc(16, 8, 0),
    )
    .unwrap();

    let status = |h: u32, m: u32| {
        slots
            .iter()
            .find(|s| s.start == utc(16, h, m))
            .map(|s| s.available)
            .unwrap()
    };

    assert!(status(9, 0));
    // Ends exactly where the envelope starts: half-open edges do not touch.
    assert!(status(9, 30));
    assert!(!status(10, 0));
    // The envelope runs to 10:45, covering this slot's start.
    assert!(!status(10, 30));
    assert!(status(11, 0));
    assert_eq!(slots.iter().filter(|s| !s.available).count(), 2);
}

#[test]
fn before_buffer_blocks_the_preceding_slot() {
    let config = EventTypeConfig::with_length(30).buffers(15, 15);
    let slots = compute_availability(
        monday(),
        &weekdays_nine_to_five(),
        &[booking(10, 0, 10, 30)],
        &config,
        "UTC",
        None,
        utc(16, 8, 0),
    )
    .unwrap();

    let blocked: Vec<DateTime<Utc>> = slots
        .iter()
        .filter(|s| !s.available)
        .map(|s| s.start.with_timezone(&Utc))
        .collect();
    assert_eq!(blocked, vec![utc(16, 9, 30), utc(16, 10, 0), utc(16, 10, 30)]);
}

#[test]
fn minimum_notice_drops_early_slots_entirely() {
    let config = EventTypeConfig::with_length(30).notice(120);
    let slots = compute_availability(
        monday(),
        &weekdays_nine_to_five(),
        &[],
        &config,
        "UTC",
        None,
        utc(16, 8, 30),
    )
    .unwrap();

    // Cut-off is 10:30; 10:30 itself is not strictly after it.
    assert!(slots.iter().all(|s| s.start > utc(16, 10, 30)));
    assert_eq!(slots[0].start, utc(16, 11, 0));
    assert_eq!(slots.len(), 12);
    assert!(slots.iter().all(|s| s.start != utc(16, 9, 0)));
}

#[test]
fn sunday_against_weekday_rule_is_empty() {
    let slots = compute_availability(
        sunday(),
        &weekdays_nine_to_five(),
        &[],
        &EventTypeConfig::with_length(30),
        "UTC",
        None,
        utc(15, 0, 0),
    )
    .unwrap();
    assert!(slots.is_empty());
}

// ── Composition ─────────────────────────────────────────────────────────────

#[test]
fn split_day_rules_expand_independently_in_rule_order() {
    let rules = vec![
        WeeklyRule::new(&[1], "09:00", "10:00").unwrap(),
        WeeklyRule::new(&[1], "14:00", "15:00").unwrap(),
    ];
    let slots = compute_availability(
        monday(),
        &rules,
        &[],
        &EventTypeConfig::with_length(30),
        "UTC",
        None,
        utc(16, 0, 0),
    )
    .unwrap();

    let starts: Vec<DateTime<Utc>> = slots.iter().map(|s| s.start.with_timezone(&Utc)).collect();
    assert_eq!(
        starts,
        vec![utc(16, 9, 0), utc(16, 9, 30), utc(16, 14, 0), utc(16, 14, 30)]
    );
}

#[test]
fn everything_in_the_past_yields_empty_not_error() {
    let slots = compute_availability(
        monday(),
        &weekdays_nine_to_five(),
        &[],
        &EventTypeConfig::with_length(30),
        "UTC",
        None,
        utc(16, 18, 0),
    )
    .unwrap();
    assert!(slots.is_empty());
}

#[test]
fn owner_timezone_anchors_rule_times() {
    let slots = compute_availability(
        monday(),
        &weekdays_nine_to_five(),
        &[],
        &EventTypeConfig::with_length(60),
        "America/New_York",
        None,
        utc(16, 0, 0),
    )
    .unwrap();
    // 09:00 EDT = 13:00 UTC; labeled in the owner's zone.
    assert_eq!(slots[0].start, utc(16, 13, 0));
    assert_eq!(slots[0].start.format("%H:%M").to_string(), "09:00");
    assert_eq!(slots.len(), 8);
}

#[test]
fn target_timezone_relabels_without_moving_instants() {
    let rules = weekdays_nine_to_five();
    let config = EventTypeConfig::with_length(30);
    let owner_view =
        compute_availability(monday(), &rules, &[], &config, "UTC", None, utc(16, 0, 0)).unwrap();
    let visitor_view = compute_availability(
        monday(),
        &rules,
        &[],
        &config,
        "UTC",
        Some("Asia/Tokyo"),
        utc(16, 0, 0),
    )
    .unwrap();

    assert_eq!(owner_view.len(), visitor_view.len());
    for (a, b) in owner_view.iter().zip(&visitor_view) {
        assert_eq!(a.start, b.start);
        assert_eq!(a.end, b.end);
    }
    assert_eq!(visitor_view[0].start.format("%H:%M").to_string(), "18:00");
}

#[test]
fn identical_inputs_identical_output() {
    let rules = weekdays_nine_to_five();
    let bookings = vec![booking(11, 0, 12, 0)];
    let config = EventTypeConfig::with_length(45).interval(15).buffers(5, 10);
    let run = || {
        compute_availability(monday(), &rules, &bookings, &config, "Europe/Berlin", Some("UTC"), utc(16, 6, 0))
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn skip_policy_drops_rule_on_gap_day() {
    // 2026-03-08 is a Sunday and the US spring-forward date.
    let rules = vec![WeeklyRule::new(&[0], "02:30", "05:00").unwrap()];
    let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let config = EventTypeConfig::with_length(30);
    let now = utc(1, 0, 0);

    let shifted = compute_availability_with_policy(
        date, &rules, &[], &config, "America/New_York", None, now, DstPolicy::ShiftForward,
    )
    .unwrap();
    let skipped = compute_availability_with_policy(
        date, &rules, &[], &config, "America/New_York", None, now, DstPolicy::Skip,
    )
    .unwrap();

    assert_eq!(shifted.len(), 4);
    assert!(skipped.is_empty());
}

// ── Errors ──────────────────────────────────────────────────────────────────

#[test]
fn unknown_owner_timezone_is_an_error() {
    let result = compute_availability(
        monday(),
        &weekdays_nine_to_five(),
        &[],
        &EventTypeConfig::with_length(30),
        "Not/AZone",
        None,
        utc(16, 0, 0),
    );
    assert!(matches!(result, Err(AvailabilityError::InvalidTimezone(_))));
}

#[test]
fn unknown_target_timezone_is_an_error_even_on_empty_days() {
    let result = compute_availability(
        sunday(),
        &weekdays_nine_to_five(),
        &[],
        &EventTypeConfig::with_length(30),
        "UTC",
        Some("Not/AZone"),
        utc(15, 0, 0),
    );
    assert!(matches!(result, Err(AvailabilityError::InvalidTimezone(_))));
}

#[test]
fn zero_interval_is_a_config_error() {
    let result = compute_availability(
        monday(),
        &weekdays_nine_to_five(),
        &[],
        &EventTypeConfig::with_length(30).interval(0),
        "UTC",
        None,
        utc(16, 0, 0),
    );
    assert!(matches!(result, Err(AvailabilityError::InvalidConfig(_))));
}

#[test]
fn last_representable_date_with_month_long_event_is_empty() {
    let every_day = vec![WeeklyRule::new(&[0, 1, 2, 3, 4, 5, 6], "09:00", "17:00").unwrap()];
    let slots = compute_availability(
        NaiveDate::MAX,
        &every_day,
        &[],
        &EventTypeConfig::with_length(43_200),
        "UTC",
        None,
        utc(16, 8, 0),
    )
    .unwrap();
    assert!(slots.is_empty());
}
