//! Scalar classification.
//!
//! A flat value is, in order of precedence:
//!
//! 1. a color, `rgb(R,G,B)` with channels in 0..=255
//! 2. a timestamp, exactly `YYYY-MM-DD HH:MM:SS`
//! 3. text
//!
//! A value that starts like a color literal is committed to being one, so a
//! bad channel is a format error. Timestamps are never an error here: text
//! that only resembles a date is just text.

use chrono::{NaiveDateTime, Timelike};

use crate::core::{Color, ParseError, ParseResult, Timestamp, Value};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `YYYY-MM-DD HH:MM:SS`, `D` = digit.
const TIMESTAMP_SHAPE: &[u8; 19] = b"DDDD-DD-DD DD:DD:DD";

/// Classify a flat value found on `line`.
pub fn classify(raw: &str, line: usize) -> ParseResult<Value> {
    let value = raw.trim();

    if is_color_literal(value) {
        return parse_color(value)
            .map(Value::Color)
            .map_err(|reason| ParseError::InvalidColor {
                line,
                text: value.to_string(),
                reason,
            });
    }

    if let Some(ts) = parse_timestamp(value) {
        return Ok(Value::Timestamp(ts));
    }

    Ok(Value::String(value.to_string()))
}

fn is_color_literal(value: &str) -> bool {
    value.starts_with("rgb(") && value.ends_with(')')
}

/// Parse an `rgb(R,G,B)` literal.
pub fn parse_color(value: &str) -> Result<Color, &'static str> {
    let inner = value
        .trim()
        .strip_prefix("rgb(")
        .and_then(|v| v.strip_suffix(')'))
        .ok_or("not an rgb(...) literal")?;

    let mut channels = [0u8; 3];
    let mut parts = inner.split(',');
    for channel in &mut channels {
        let part = parts.next().ok_or("expected three channels")?.trim();
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err("channel is not an integer");
        }
        *channel = part.parse().map_err(|_| "channel out of range 0-255")?;
    }
    if parts.next().is_some() {
        return Err("expected three channels");
    }

    let [r, g, b] = channels;
    Ok(Color::new(r, g, b))
}

/// Parse a timestamp in the exact `YYYY-MM-DD HH:MM:SS` form.
///
/// Returns `None` for anything else, including impossible dates and
/// leap seconds (`:60`).
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let bytes = value.as_bytes();
    if bytes.len() != TIMESTAMP_SHAPE.len() {
        return None;
    }
    let shaped = bytes
        .iter()
        .zip(TIMESTAMP_SHAPE)
        .all(|(&b, &s)| if s == b'D' { b.is_ascii_digit() } else { b == s });
    if !shaped {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .filter(|ts| ts.nanosecond() == 0)
}
