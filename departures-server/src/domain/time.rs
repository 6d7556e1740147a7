//! Timestamp handling for the transit provider's wire format.
//!
//! The provider sends times as `YYYY-MM-DDTHH:MM:SS` strings, with no zone
//! suffix and no sub-second part. Times are naive: they carry whatever local
//! time the provider reports and are never converted between zones.
//!
//! [`parse_timestamp`]/[`format_timestamp`] work on bare strings and back the
//! serde adapter in [`wire`]; [`decode_quoted`]/[`encode_quoted`] are the same
//! codec for complete JSON string literals, quotes included.

use chrono::{NaiveDateTime, Timelike};
use std::fmt;

/// The `chrono` format string matching the wire pattern.
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Length of a well-formed wire timestamp, e.g. `2024-01-15T08:30:00`.
const WIRE_LEN: usize = 19;

/// Error returned when a timestamp does not match the wire pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct FormatError {
    reason: &'static str,
}

impl FormatError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A departure time at second precision.
///
/// Ordering is chronological. The value is opaque: the only ways in and out
/// of text are [`parse_timestamp`] and [`format_timestamp`] (or their quoted
/// variants).
///
/// # Examples
///
/// ```
/// use departures_server::domain::{format_timestamp, parse_timestamp};
///
/// let ts = parse_timestamp("2024-01-15T08:30:00").unwrap();
/// assert_eq!(ts.hh_mm(), "08:30");
/// assert_eq!(format_timestamp(ts), "2024-01-15T08:30:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Wrap a date-time, discarding any sub-second part.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// Hour and minute as `HH:MM`.
    pub fn hh_mm(&self) -> String {
        format!("{:02}:{:02}", self.0.hour(), self.0.minute())
    }

    /// Whole minutes elapsed since `earlier`, rounded towards negative
    /// infinity.
    ///
    /// Negative when `earlier` is actually later than `self`.
    ///
    /// ```
    /// use departures_server::domain::parse_timestamp;
    ///
    /// let scheduled = parse_timestamp("2024-01-15T08:00:00").unwrap();
    /// let expected = parse_timestamp("2024-01-15T07:59:30").unwrap();
    /// assert_eq!(expected.minutes_since(scheduled), -1);
    /// ```
    pub fn minutes_since(&self, earlier: Self) -> i64 {
        self.0
            .signed_duration_since(earlier.0)
            .num_seconds()
            .div_euclid(60)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0.format(WIRE_FORMAT))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

/// Parse an unquoted `YYYY-MM-DDTHH:MM:SS` string.
///
/// The shape is checked byte by byte before any calendar validation, so
/// variants that `chrono` would otherwise tolerate (single-digit fields,
/// signs, fractional seconds, zone suffixes) are rejected.
pub fn parse_timestamp(s: &str) -> Result<Timestamp, FormatError> {
    let bytes = s.as_bytes();

    if bytes.len() != WIRE_LEN {
        return Err(FormatError::new("expected YYYY-MM-DDTHH:MM:SS"));
    }

    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err(FormatError::new("unexpected character in timestamp"));
        }
    }

    NaiveDateTime::parse_from_str(s, WIRE_FORMAT)
        .map(Timestamp)
        .map_err(|_| FormatError::new("date or time out of range"))
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_string()
}

/// Parse a JSON string literal such as `"2024-01-15T08:30:00"`, quotes
/// included.
///
/// Input too short to hold both quote characters is rejected rather than
/// sliced.
pub fn decode_quoted(raw: &str) -> Result<Timestamp, FormatError> {
    if raw.len() < 2 {
        return Err(FormatError::new("too short to be a quoted timestamp"));
    }

    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| FormatError::new("expected surrounding quotes"))?;

    parse_timestamp(inner)
}

/// Format a timestamp as a quoted JSON string literal.
pub fn encode_quoted(ts: Timestamp) -> String {
    format!("\"{}\"", format_timestamp(ts))
}

/// Serde adapter for [`Timestamp`] fields, for use with `#[serde(with = ...)]`.
pub mod wire {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Timestamp, format_timestamp, parse_timestamp};

    pub fn serialize<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(*ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}
