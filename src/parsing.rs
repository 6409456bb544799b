//! Locale-tolerant numeric and HH:MM time parsing
//!
//! Operators type on numeric keypads with either decimal separator, and
//! enter times as `1630`, `16.30` or `16:30`. Everything here normalizes that
//! input or fails with a [`ParseError`] whose message is shown to the user.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Canonical midnight-rollover time (end of the day).
pub const HHMM_ROLLOVER: &str = "24:00";

/// Leaf parse failures. Validators convert these into user-facing strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Numeric value is required.")]
    NumberRequired,

    #[error("Invalid numeric value.")]
    InvalidNumber,

    #[error("Time value is required.")]
    TimeRequired,

    #[error("Invalid time format.")]
    InvalidTime,

    #[error("Hour must be between 00 and 24.")]
    HourOutOfRange,

    #[error("Minute must be between 00 and 59.")]
    MinuteOutOfRange,
}

// ============================================================================
// Decimals
// ============================================================================

/// Parse a decimal allowing comma or dot as separator.
///
/// `"108,6"` -> 108.6, `" 0 "` -> 0.0, `"-1,5"` -> -1.5
///
/// `NaN` and infinities are not measurements and fail as [`ParseError::InvalidNumber`].
pub fn parse_decimal(raw: &str) -> Result<f64, ParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ParseError::NumberRequired);
    }
    let s = s.replace(' ', "").replace(',', ".");
    match s.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(ParseError::InvalidNumber),
    }
}

/// Fixed-point formatting for display fields.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Normalize a decimal entry the way the entry widgets do when editing finishes.
///
/// Spaces removed, `,` -> `.`, only the first `.` kept, a trailing `.` dropped,
/// and the value re-rendered without trailing zeros. Text that still does not
/// parse is returned in its normalized form so the rule layer can report it.
pub fn normalize_decimal_text(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let mut s = raw.replace(' ', "").replace(',', ".");
    if let Some(first) = s.find('.') {
        let (head, tail) = s.split_at(first + 1);
        s = format!("{head}{}", tail.replace('.', ""));
    }
    if s.ends_with('.') {
        s.pop();
    }

    let x = match s.parse::<f64>() {
        Ok(x) if x.is_finite() => x,
        _ => return s,
    };

    let fixed = format!("{x:.6}");
    let out = fixed.trim_end_matches('0').trim_end_matches('.');
    if out == "-0" {
        "0".to_string()
    } else {
        out.to_string()
    }
}

// ============================================================================
// Dates
// ============================================================================

/// Parse a date typed as ISO `YYYY-MM-DD` or `DD.MM.YYYY`.
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d.%m.%Y"))
        .ok()
}

// ============================================================================
// HH:MM
// ============================================================================

fn digits_value(s: &str) -> u32 {
    // All-digit input that overflows is out of range anyway.
    s.parse::<u32>().unwrap_or(u32::MAX)
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Normalize user time input to `HH:MM` (24-hour).
///
/// Accepted shapes:
/// - `H:M`, `HH:MM` (or `.` instead of `:`)
/// - 1-2 digits: hour only (`"5"` -> `05:00`)
/// - 3 digits: `HH0` when the trailing digit is 0 and `HH` <= 24
///   (`"010"` -> `01:00`), otherwise `H:MM` (`"930"` -> `09:30`, `"123"` -> `01:23`)
/// - 4 digits: `HHMM`
///
/// `24:00` is valid (midnight rollover); any other hour 24 is rejected.
pub fn normalize_hhmm(raw: &str) -> Result<String, ParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ParseError::TimeRequired);
    }

    let s = s.replace('.', ":").replace(' ', "");

    let (hh, mm) = if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 || !is_all_digits(parts[0]) || !is_all_digits(parts[1]) {
            return Err(ParseError::InvalidTime);
        }
        (digits_value(parts[0]), digits_value(parts[1]))
    } else {
        if !is_all_digits(&s) {
            return Err(ParseError::InvalidTime);
        }
        match s.len() {
            1 | 2 => (digits_value(&s), 0),
            3 => {
                let hh_candidate = digits_value(&s[0..2]);
                if s.ends_with('0') && hh_candidate <= 24 {
                    (hh_candidate, 0)
                } else {
                    (digits_value(&s[0..1]), digits_value(&s[1..3]))
                }
            }
            4 => (digits_value(&s[0..2]), digits_value(&s[2..4])),
            _ => return Err(ParseError::InvalidTime),
        }
    };

    if hh == 24 && mm == 0 {
        return Ok(HHMM_ROLLOVER.to_string());
    }
    if hh > 23 {
        return Err(ParseError::HourOutOfRange);
    }
    if mm > 59 {
        return Err(ParseError::MinuteOutOfRange);
    }

    Ok(format!("{hh:02}:{mm:02}"))
}

/// Convert HH:MM input into a time of day.
///
/// `24:00` maps to `00:00` with the rollover flag set; the caller must move
/// the instant to the following day.
pub fn hhmm_to_time(raw: &str) -> Result<(NaiveTime, bool), ParseError> {
    let s = normalize_hhmm(raw)?;
    if s == HHMM_ROLLOVER {
        return Ok((NaiveTime::MIN, true));
    }
    let (h, m) = s.split_once(':').ok_or(ParseError::InvalidTime)?;
    let time = NaiveTime::from_hms_opt(digits_value(h), digits_value(m), 0)
        .ok_or(ParseError::InvalidTime)?;
    Ok((time, false))
}
