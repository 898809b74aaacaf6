//! Error types for availability-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid clock time: {0}")]
    InvalidClockTime(String),

    #[error("Invalid weekly rule: {0}")]
    InvalidRule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid event type configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid booked interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Request parse error: {0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
