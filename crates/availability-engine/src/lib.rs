//! # availability-engine
//!
//! Deterministic bookable-slot computation for calendar scheduling.
//!
//! Given an owner's recurring weekly working hours, their committed bookings,
//! an event type's length/buffer/step/notice rules and timezone information,
//! the engine produces the ordered list of slots a visitor may book, each
//! flagged available or unavailable. Every function is pure; the current
//! instant is always passed in by the caller.
//!
//! ## Modules
//!
//! - [`interval`] — Booked intervals, buffered envelopes, time slots
//! - [`rule`] — Weekly working-hour rules and `HH:mm` clock parsing
//! - [`config`] — Event-type length, buffers, step and notice
//! - [`dst`] — DST gap policies for local rule boundaries
//! - [`selector`] — Rules applicable to a date; dates of a month with any rule
//! - [`generator`] — Rule → fixed-length candidate slots
//! - [`conflict`] — Buffered conflict marking; single-slot availability check
//! - [`notice`] — Minimum-notice filtering
//! - [`projector`] — Timezone relabeling and display formatting
//! - [`availability`] — The full pipeline for one date
//! - [`wire`] — Request documents and the available-slots response
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod generator;
pub mod interval;
pub mod notice;
pub mod projector;
pub mod rule;
pub mod selector;
pub mod wire;

pub use availability::{
    compute_availability, compute_availability_now, compute_availability_with_policy,
};
pub use config::EventTypeConfig;
pub use conflict::{is_slot_available, resolve_conflicts};
pub use dst::DstPolicy;
pub use error::AvailabilityError;
pub use generator::generate_slots;
pub use interval::{BookedInterval, BufferedEnvelope, TimeSlot};
pub use notice::filter_by_notice;
pub use projector::{format_slot, parse_timezone, project_slots, validate_timezone, ClockFormat};
pub use rule::{parse_clock, DaySet, WeeklyRule};
pub use selector::{dates_with_availability, select_rules};
pub use wire::{AvailabilityRequest, AvailabilityResponse, BookingRecord, BookingStatus, SlotDto};
