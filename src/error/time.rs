//! Date/time input parsing errors.
//!
//! All variants are recoverable user-input conditions and are surfaced
//! verbatim to the caller.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures while turning compact date/time input into an instant.
#[derive(Error, Debug, PartialEq)]
pub enum TimeParseError {
    /// Input did not reduce to exactly four digits after stripping separators.
    #[error("invalid date format '{0}', expected DDMM, DD/MM or DD.MM")]
    InvalidDateFormat(String),

    /// Input did not reduce to exactly four digits after stripping separators.
    #[error("invalid time format '{0}', expected HHMM or HH:MM")]
    InvalidTimeFormat(String),

    /// Month component outside 1-12.
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),

    /// Day component outside 1-31.
    #[error("day must be between 1 and 31, got {0}")]
    DayOutOfRange(u32),

    /// Hour component outside 0-23.
    #[error("hour must be between 0 and 23, got {0}")]
    HourOutOfRange(u32),

    /// Minute component outside 0-59.
    #[error("minute must be between 0 and 59, got {0}")]
    MinuteOutOfRange(u32),

    /// Components passed the bounds check but name no real calendar day,
    /// e.g. `31/02`. Only raised where a concrete instant is required.
    #[error("{day:02}.{month:02} is not a valid calendar date")]
    InvalidDate {
        /// Day component
        day: u32,
        /// Month component
        month: u32,
    },

    /// The composed instant lies in the recent past (within 14 days), which
    /// is treated as a likely typo rather than a request for next year.
    #[error("the start date/time cannot be in the past, please check your input")]
    PastDateRejected {
        /// The instant that was rejected
        instant: DateTime<Utc>,
    },
}
