//! Booking-rule parameters for one offerable event type.

use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Duration, buffer, step and notice settings for one event type.
///
/// All values are whole minutes. Deserializes from the stored event-type
/// shape (`length`, `beforeBuffer`, `afterBuffer`, `slotInterval`,
/// `minimumBookingNotice`) with every field but `length` optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeConfig {
    /// Event duration.
    pub length: u32,
    /// Padding before an existing booking during which no slot may start or end.
    #[serde(default)]
    pub before_buffer: u32,
    /// Padding after an existing booking during which no slot may start or end.
    #[serde(default)]
    pub after_buffer: u32,
    /// Step between candidate slot starts. `None` means "same as `length`".
    #[serde(default)]
    pub slot_interval: Option<u32>,
    /// How far ahead of "now" a slot must start.
    #[serde(default)]
    pub minimum_booking_notice: u32,
}

impl EventTypeConfig {
    /// A config with the given length and every optional field at its default.
    pub fn with_length(length: u32) -> Self {
        Self {
            length,
            before_buffer: 0,
            after_buffer: 0,
            slot_interval: None,
            minimum_booking_notice: 0,
        }
    }

    pub fn buffers(mut self, before: u32, after: u32) -> Self {
        self.before_buffer = before;
        self.after_buffer = after;
        self
    }

    pub fn interval(mut self, minutes: u32) -> Self {
        self.slot_interval = Some(minutes);
        self
    }

    pub fn notice(mut self, minutes: u32) -> Self {
        self.minimum_booking_notice = minutes;
        self
    }

    /// The step between consecutive candidate starts.
    pub fn step_minutes(&self) -> u32 {
        self.slot_interval.unwrap_or(self.length)
    }

    /// Reject configurations that would make slot generation loop forever.
    ///
    /// # Errors
    /// Returns [`AvailabilityError::InvalidConfig`] if `length` or an explicit
    /// `slot_interval` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(AvailabilityError::InvalidConfig(
                "length must be positive".to_string(),
            ));
        }
        if self.slot_interval == Some(0) {
            return Err(AvailabilityError::InvalidConfig(
                "slotInterval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
