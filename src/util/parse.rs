//! Parsing helpers for ids and compact user-entered dates and times.
//!
//! Dates arrive as `DDMM` (with `.` or `/` separators allowed), times as
//! `HHMM` (with `:` allowed) — the shapes the command layer collects. Years
//! are never entered: a composed instant that is far enough in the past is
//! assumed to mean next year, so members can enter January dates in December
//! without thinking about the year boundary.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::error::{internal::InternalError, time::TimeParseError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// A bounds-checked day/month pair resolved against the current year.
///
/// Only the component ranges are validated (day 1-31, month 1-12); whether the
/// day exists in that particular month is deliberately not cross-checked here.
/// Composing an impossible pair into an instant fails later, in
/// [`parse_datetime_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    /// The current year at parse time; dates are entered without a year.
    pub year: i32,
    /// Month component, 1-12.
    pub month: u32,
    /// Day component, 1-31.
    pub day: u32,
}

/// Parses a compact date string into day and month components.
///
/// Accepts `DDMM`, `DD/MM` or `DD.MM`: separators are stripped and exactly
/// four digits must remain.
///
/// # Arguments
/// - `date_text` - Date string in format DDMM, DD/MM or DD.MM
///
/// # Returns
/// - `Ok(ParsedDate)` - Parsed components with the current year
/// - `Err(TimeParseError)` - Malformed input or out-of-range components
pub fn parse_date(date_text: &str) -> Result<ParsedDate, TimeParseError> {
    let digits = date_text.replace(['.', '/'], "");

    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(TimeParseError::InvalidDateFormat(date_text.to_string()));
    }

    let day: u32 = digits[..2]
        .parse()
        .map_err(|_| TimeParseError::InvalidDateFormat(date_text.to_string()))?;
    let month: u32 = digits[2..]
        .parse()
        .map_err(|_| TimeParseError::InvalidDateFormat(date_text.to_string()))?;

    if !(1..=12).contains(&month) {
        return Err(TimeParseError::MonthOutOfRange(month));
    }
    if !(1..=31).contains(&day) {
        return Err(TimeParseError::DayOutOfRange(day));
    }

    Ok(ParsedDate {
        year: Utc::now().year(),
        month,
        day,
    })
}

/// Parses a compact time string into hour and minute.
///
/// Accepts `HHMM` or `HH:MM`: separators are stripped and exactly four digits
/// must remain.
///
/// # Arguments
/// - `time_text` - Time string in format HHMM or HH:MM
///
/// # Returns
/// - `Ok((hour, minute))` - Parsed components
/// - `Err(TimeParseError)` - Malformed input or out-of-range components
pub fn parse_time(time_text: &str) -> Result<(u32, u32), TimeParseError> {
    let digits = time_text.replace(':', "");

    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(TimeParseError::InvalidTimeFormat(time_text.to_string()));
    }

    let hour: u32 = digits[..2]
        .parse()
        .map_err(|_| TimeParseError::InvalidTimeFormat(time_text.to_string()))?;
    let minute: u32 = digits[2..]
        .parse()
        .map_err(|_| TimeParseError::InvalidTimeFormat(time_text.to_string()))?;

    if hour > 23 {
        return Err(TimeParseError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(TimeParseError::MinuteOutOfRange(minute));
    }

    Ok((hour, minute))
}

/// Parses date and time strings into a single UTC instant, relative to now.
///
/// See [`parse_datetime_at`] for the resolution rules.
pub fn parse_datetime(date_text: &str, time_text: &str) -> Result<DateTime<Utc>, TimeParseError> {
    parse_datetime_at(date_text, time_text, Utc::now())
}

/// Parses date and time strings into a single UTC instant, relative to `now`.
///
/// The composed instant is resolved against `now`'s year, then:
/// - an instant up to 14 days in the past is rejected as a likely typo
///   (`PastDateRejected`);
/// - an instant more than 14 days in the past is assumed to mean next year and
///   the year is advanced by one.
///
/// # Arguments
/// - `date_text` - Date string in format DDMM, DD/MM or DD.MM
/// - `time_text` - Time string in format HHMM or HH:MM
/// - `now` - Reference instant for year resolution
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - The resolved instant
/// - `Err(TimeParseError)` - Malformed input, impossible calendar date, or a
///   recent-past instant
pub fn parse_datetime_at(
    date_text: &str,
    time_text: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, TimeParseError> {
    let date = parse_date(date_text)?;
    let (hour, minute) = parse_time(time_text)?;

    let candidate = compose_utc(now.year(), date.month, date.day, hour, minute)?;

    if candidate >= now {
        return Ok(candidate);
    }

    let days_in_past = (now - candidate).num_days();
    if days_in_past <= 14 {
        return Err(TimeParseError::PastDateRejected { instant: candidate });
    }

    compose_utc(now.year() + 1, date.month, date.day, hour, minute)
}

/// Composes validated components into a UTC instant.
///
/// Fails with `InvalidDate` when the day does not exist in the month for the
/// given year (e.g. `31/02`, or `29/02` outside a leap year).
fn compose_utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Utc>, TimeParseError> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .ok_or(TimeParseError::InvalidDate { day, month })?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// The last second of the day the given instant falls on.
pub fn end_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    match instant.date_naive().and_hms_opt(23, 59, 59) {
        Some(naive) => Utc.from_utc_datetime(&naive),
        // 23:59:59 exists on every calendar day
        None => instant,
    }
}

/// Formats a duration into a human-readable string.
///
/// # Arguments
/// - `duration` - The duration to format
///
/// # Returns
/// - Formatted duration string, e.g. `"2 days, 3 hours and 5 minutes"`
pub fn format_duration(duration: Duration) -> String {
    let days = duration.num_days();
    let hours = duration.num_hours() - days * 24;
    let minutes = duration.num_minutes() - duration.num_hours() * 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} {}", days, if days == 1 { "day" } else { "days" }));
    }
    if hours > 0 {
        parts.push(format!(
            "{} {}",
            hours,
            if hours == 1 { "hour" } else { "hours" }
        ));
    }
    if minutes > 0 {
        parts.push(format!(
            "{} {}",
            minutes,
            if minutes == 1 { "minute" } else { "minutes" }
        ));
    }

    let Some((last, rest)) = parts.split_last() else {
        return "less than a minute".to_string();
    };

    if rest.is_empty() {
        last.clone()
    } else {
        format!("{} and {}", rest.join(", "), last)
    }
}
