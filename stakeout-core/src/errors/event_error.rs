//! Event ingestion errors.

/// Errors raised while validating input events.
///
/// These are the only hard failures in the engine: malformed input is
/// rejected up front, every later numeric edge case resolves to a
/// deterministic fallback instead.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Event set is empty")]
    Empty,

    #[error("Invalid coordinates ({lat}, {lng}): lat must be in [-90, 90] and lng in [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Hour {hour} out of range 0-23")]
    InvalidHour { hour: u8 },

    #[error("Day of week {day_of_week} out of range 0-6 (Monday-first)")]
    InvalidDayOfWeek { day_of_week: u8 },

    #[error("Month {month} out of range 1-12")]
    InvalidMonth { month: u8 },

    #[error("Day of month {day_of_month} out of range 1-31")]
    InvalidDayOfMonth { day_of_month: u8 },
}
