//! Time-interval primitives shared by every pipeline stage.
//!
//! Two notions of time never mix here: absolute instants are
//! `DateTime<Utc>` (or a relabeled `DateTime<Tz>` after projection), while
//! local wall-clock values live in [`crate::rule`] as `NaiveTime`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// An existing committed reservation that occupies the owner's calendar.
///
/// Invariant: `start < end`. Build one with [`BookedInterval::new`] or
/// deserialize it; both paths enforce the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct BookedInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for BookedInterval {
    type Error = AvailabilityError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        BookedInterval::new(raw.start, raw.end)
    }
}

impl BookedInterval {
    /// Create a booked interval, rejecting empty or inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(AvailabilityError::InvalidInterval(format!(
                "start {} is not before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The interval widened by `before` minutes on its start and `after`
    /// minutes on its end.
    ///
    /// Edges that would leave chrono's representable range saturate at
    /// `DateTime::<Utc>::MIN_UTC` and `DateTime::<Utc>::MAX_UTC`.
    pub fn buffered(&self, before: u32, after: u32) -> BufferedEnvelope {
        BufferedEnvelope {
            start: self
                .start
                .checked_sub_signed(Duration::minutes(i64::from(before)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: self
                .end
                .checked_add_signed(Duration::minutes(i64::from(after)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

/// A booked interval after buffer expansion: `[start − before, end + after]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedEnvelope {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BufferedEnvelope {
    /// Three-way conflict test against a slot `[slot_start, slot_end]`.
    ///
    /// The slot conflicts when its start lies in `[start, end)`, when its end
    /// lies in `(start, end]`, or when it contains the whole envelope.
    /// Touching edges (slot ends exactly at `start`, or starts exactly at
    /// `end`) do not conflict.
    pub fn conflicts_with(&self, slot_start: DateTime<Utc>, slot_end: DateTime<Utc>) -> bool {
        let start_inside = slot_start >= self.start && slot_start < self.end;
        let end_inside = slot_end > self.start && slot_end <= self.end;
        let contains = slot_start <= self.start && slot_end >= self.end;
        start_inside || end_inside || contains
    }
}

/// A candidate or resolved booking window.
///
/// The type parameter is the timezone the instants are labeled with. The
/// pipeline works on `TimeSlot<Utc>`; [`crate::projector`] relabels the
/// survivors into the display zone without moving the instants.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot<Z: TimeZone = Utc> {
    pub start: DateTime<Z>,
    pub end: DateTime<Z>,
    pub available: bool,
}

impl TimeSlot<Utc> {
    /// A fresh, available slot of `duration_minutes` starting at `start`.
    ///
    /// Returns `None` when the end would fall past the last representable
    /// instant.
    pub fn starting_at(start: DateTime<Utc>, duration_minutes: u32) -> Option<Self> {
        let end = start.checked_add_signed(Duration::minutes(i64::from(duration_minutes)))?;
        Some(Self {
            start,
            end,
            available: true,
        })
    }
}

impl<Z: TimeZone> TimeSlot<Z> {
    /// Slot length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end.clone() - self.start.clone()).num_minutes()
    }

    /// The same slot labeled in another timezone.
    pub fn with_timezone<Z2: TimeZone>(&self, tz: &Z2) -> TimeSlot<Z2> {
        TimeSlot {
            start: self.start.with_timezone(tz),
            end: self.end.with_timezone(tz),
            available: self.available,
        }
    }
}

