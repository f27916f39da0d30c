//! Permissive ISO-8601 instants.
//!
//! SES producers are not consistent about the shape of their timestamps, so
//! parsing accepts the whole ISO-8601 date-opt-time grammar:
//!
//! - calendar (`2023`, `2023-01`, `2023-01-02`), week (`2023-W01`,
//!   `2023-W01-1`) and ordinal (`2023-002`) dates;
//! - an optional time after `T` (or a space) of `HH`, `HH:mm` or
//!   `HH:mm:ss`, where the last element may carry a `.` or `,` fraction;
//! - an optional offset after the time: `Z`, `±HH`, `±HH:mm` or `±HHmm`.
//!
//! Values without an offset are taken to be UTC. Formatting always produces
//! RFC 3339 in UTC with the shortest fractional second that is still exact.

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, TimeDelta, Utc};

const NANOS_PER_UNIT: [i128; 3] = [3_600_000_000_000, 60_000_000_000, 1_000_000_000];
const MAX_PER_UNIT: [u32; 3] = [23, 59, 59];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ISO-8601 timestamp {input:?}")]
pub struct TimestampError {
    input: String,
}

impl TimestampError {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parses an ISO-8601 date or date-time into an absolute instant.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    parse_date_opt_time(input.trim()).ok_or_else(|| TimestampError {
        input: input.to_string(),
    })
}

/// Canonical string form of an instant, e.g. `2023-01-02T03:04:05.678Z`.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_date_opt_time(input: &str) -> Option<DateTime<Utc>> {
    let (date, time) = match input.split_once(['T', 't', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (input, None),
    };

    let midnight = parse_date(date)?.and_hms_opt(0, 0, 0)?;
    let Some(time) = time else {
        return Some(midnight.and_utc());
    };

    let (clock, offset_seconds) = split_offset(time)?;
    let local = midnight.checked_add_signed(parse_clock(clock)?)?;
    let utc = local.checked_sub_signed(TimeDelta::try_seconds(offset_seconds)?)?;
    Some(utc.and_utc())
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('-');
    let year = parse_digits(parts.next()?, 4)? as i32;

    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => NaiveDate::from_ymd_opt(year, 1, 1),
        (Some(week), day, None) if week.starts_with(['W', 'w']) => {
            let week = parse_digits(&week[1..], 2)?;
            let day = match day {
                Some(day) => parse_digits(day, 1)?,
                None => 1,
            };
            if !(1..=7).contains(&day) {
                return None;
            }
            NaiveDate::from_isoywd_opt(year, week, chrono::Weekday::Mon)?
                .checked_add_days(Days::new(u64::from(day - 1)))
        }
        (Some(ordinal), None, _) if ordinal.len() == 3 => {
            NaiveDate::from_yo_opt(year, parse_digits(ordinal, 3)?)
        }
        (Some(month), None, _) => NaiveDate::from_ymd_opt(year, parse_digits(month, 2)?, 1),
        (Some(month), Some(day), None) => {
            NaiveDate::from_ymd_opt(year, parse_digits(month, 2)?, parse_digits(day, 2)?)
        }
        _ => None,
    }
}

/// Splits a trailing offset off a time, returning the offset east of UTC in
/// seconds.
fn split_offset(time: &str) -> Option<(&str, i64)> {
    if let Some(clock) = time.strip_suffix(['Z', 'z']) {
        return Some((clock, 0));
    }

    let Some(at) = time.find(['+', '-']) else {
        return Some((time, 0));
    };
    let sign = if time[at..].starts_with('-') { -1 } else { 1 };
    let offset = &time[at + 1..];
    let (hours, minutes) = match offset.len() {
        2 => (offset, "00"),
        4 => offset.split_at(2),
        5 if offset.as_bytes()[2] == b':' => (&offset[..2], &offset[3..]),
        _ => return None,
    };
    let hours = parse_digits(hours, 2)?;
    let minutes = parse_digits(minutes, 2)?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    Some((&time[..at], sign * i64::from(hours * 3600 + minutes * 60)))
}

/// `HH[:mm[:ss]]` with an optional fraction on the last element.
fn parse_clock(clock: &str) -> Option<TimeDelta> {
    if clock.is_empty() {
        return Some(TimeDelta::zero());
    }

    let (whole, fraction) = match clock.find(['.', ',']) {
        Some(at) => (&clock[..at], Some(&clock[at + 1..])),
        None => (clock, None),
    };

    let elements: Vec<&str> = whole.split(':').collect();
    if elements.len() > NANOS_PER_UNIT.len() {
        return None;
    }

    let mut nanos: i128 = 0;
    for (unit, element) in elements.iter().enumerate() {
        let value = parse_digits(element, 2)?;
        if value > MAX_PER_UNIT[unit] {
            return None;
        }
        nanos += i128::from(value) * NANOS_PER_UNIT[unit];
    }

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Digits past nanosecond precision are dropped.
        let digits = &fraction[..fraction.len().min(9)];
        let numerator: i128 = digits.parse().ok()?;
        let denominator = 10i128.pow(digits.len() as u32);
        nanos += NANOS_PER_UNIT[elements.len() - 1] * numerator / denominator;
    }

    Some(TimeDelta::nanoseconds(i64::try_from(nanos).ok()?))
}

fn parse_digits(s: &str, len: usize) -> Option<u32> {
    if s.len() != len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Serde adapter for optional instant fields.
///
/// Absent and `null` both read as `None`; a string that does not parse is an
/// error, never `None`.
pub mod option {
    use super::{format_instant, parse_instant};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) => serializer.serialize_str(&format_instant(instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse_instant(&s).map_err(D::Error::custom))
            .transpose()
    }
}
