//! Field-level checkers shared by the hole-section groups.
//!
//! Each checker reads one raw value, appends at most one message to
//! `errors`, and returns the normalized value (`""` / `None` on failure).

use chrono::NaiveDate;

use crate::parsing::{normalize_hhmm, parse_decimal};
use crate::types::RawValue;

/// Lower bound for a decimal field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Minimum {
    Unbounded,
    /// value >= bound
    Inclusive(f64),
    /// value > bound
    Exclusive(f64),
}

/// Trimmed text of an optional raw value.
pub fn text_of(value: Option<&RawValue>) -> String {
    value.map(RawValue::as_text).unwrap_or_default()
}

pub fn is_blank(value: Option<&RawValue>) -> bool {
    value.map_or(true, RawValue::is_blank)
}

/// Non-empty once rendered as text (zero and empty lists count as content).
pub fn has_content(value: Option<&RawValue>) -> bool {
    !text_of(value).is_empty()
}

pub fn require_choice(
    value: Option<&RawValue>,
    allowed: &[&str],
    label: &str,
    errors: &mut Vec<String>,
) -> String {
    let s = text_of(value);
    if s.is_empty() {
        errors.push(format!("{label} is required."));
        return String::new();
    }
    if !allowed.contains(&s.as_str()) {
        errors.push(format!("{label} must be selected from the list."));
        return String::new();
    }
    s
}

pub fn require_text(value: Option<&RawValue>, label: &str, errors: &mut Vec<String>) -> String {
    let s = text_of(value);
    if s.is_empty() {
        errors.push(format!("{label} is required."));
    }
    s
}

/// Required decimal with comma/dot tolerance and an optional lower bound.
///
/// Non-finite text (`NaN`, `inf`) fails as "must be a valid number".
pub fn require_decimal(
    value: Option<&RawValue>,
    label: &str,
    minimum: Minimum,
    empty_msg: Option<&str>,
    errors: &mut Vec<String>,
) -> Option<f64> {
    if is_blank(value) {
        errors.push(empty_msg.map_or_else(|| format!("{label} is required."), str::to_string));
        return None;
    }
    let Ok(x) = parse_decimal(&text_of(value)) else {
        errors.push(format!("{label} must be a valid number."));
        return None;
    };

    match minimum {
        Minimum::Exclusive(min) if x <= min => {
            errors.push(format!("{label} must be greater than {min:?}."));
            None
        }
        Minimum::Inclusive(min) if x < min => {
            errors.push(format!("{label} must be {min:?} or greater."));
            None
        }
        _ => Some(x),
    }
}

/// Blank is fine; anything present must parse.
pub fn optional_decimal(value: Option<&RawValue>, label: &str, errors: &mut Vec<String>) -> Option<f64> {
    if is_blank(value) {
        return None;
    }
    match parse_decimal(&text_of(value)) {
        Ok(x) => Some(x),
        Err(_) => {
            errors.push(format!("{label} must be a valid number."));
            None
        }
    }
}

/// Missing and unparseable dates share the same message.
pub fn require_date(
    value: Option<&RawValue>,
    label: &str,
    empty_msg: Option<&str>,
    errors: &mut Vec<String>,
) -> Option<NaiveDate> {
    let date = value.and_then(RawValue::as_date);
    if date.is_none() {
        errors.push(empty_msg.map_or_else(|| format!("{label} is required."), str::to_string));
    }
    date
}

/// Required time of day, returned normalized as `HH:MM`.
pub fn require_time_hhmm(
    value: Option<&RawValue>,
    label: &str,
    empty_msg: Option<&str>,
    errors: &mut Vec<String>,
) -> Option<String> {
    if is_blank(value) {
        errors.push(empty_msg.map_or_else(|| format!("{label} is required."), str::to_string));
        return None;
    }
    match normalize_hhmm(&text_of(value)) {
        Ok(hhmm) => Some(hhmm),
        Err(_) => {
            errors.push(format!("{label} must be in HH:MM format (24-hour)."));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &str) -> RawValue {
        RawValue::from(s)
    }

    #[test]
    fn test_require_choice() {
        let mut errors = Vec::new();
        let allowed = ["PDC", "TRICONE"];
        assert_eq!(require_choice(Some(&raw(" PDC ")), &allowed, "BIT-1 / PDC/TRICONE", &mut errors), "PDC");
        assert_eq!(require_choice(None, &allowed, "BIT-1 / PDC/TRICONE", &mut errors), "");
        assert_eq!(require_choice(Some(&raw("pdc")), &allowed, "BIT-1 / PDC/TRICONE", &mut errors), "");
        assert_eq!(
            errors,
            vec![
                "BIT-1 / PDC/TRICONE is required.",
                "BIT-1 / PDC/TRICONE must be selected from the list."
            ]
        );
    }

    #[test]
    fn test_require_decimal_messages() {
        let mut errors = Vec::new();
        let shoe = Minimum::Exclusive(0.0);
        assert_eq!(require_decimal(Some(&raw("12,5")), "X", shoe, None, &mut errors), Some(12.5));
        assert_eq!(require_decimal(Some(&raw("0")), "X", shoe, None, &mut errors), None);
        assert_eq!(require_decimal(Some(&raw("-1")), "Y", Minimum::Inclusive(0.0), None, &mut errors), None);
        assert_eq!(require_decimal(Some(&raw("abc")), "Z", Minimum::Unbounded, None, &mut errors), None);
        assert_eq!(require_decimal(Some(&RawValue::Null), "W", shoe, Some("W needed."), &mut errors), None);
        assert_eq!(
            errors,
            vec![
                "X must be greater than 0.0.",
                "Y must be 0.0 or greater.",
                "Z must be a valid number.",
                "W needed."
            ]
        );
    }

    #[test]
    fn test_require_decimal_accepts_numbers() {
        let mut errors = Vec::new();
        let v = RawValue::from(0.0);
        assert_eq!(require_decimal(Some(&v), "R", Minimum::Inclusive(0.0), None, &mut errors), Some(0.0));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_decimal() {
        let mut errors = Vec::new();
        assert_eq!(optional_decimal(Some(&raw("  ")), "IBS", &mut errors), None);
        assert_eq!(optional_decimal(Some(&raw("8.5")), "IBS", &mut errors), Some(8.5));
        assert_eq!(optional_decimal(Some(&raw("8.5in")), "IBS", &mut errors), None);
        assert_eq!(errors, vec!["IBS must be a valid number."]);
    }

    #[test]
    fn test_require_time_hhmm() {
        let mut errors = Vec::new();
        assert_eq!(require_time_hhmm(Some(&raw("930")), "T", None, &mut errors).as_deref(), Some("09:30"));
        assert_eq!(require_time_hhmm(Some(&raw("2401")), "T", None, &mut errors), None);
        assert_eq!(require_time_hhmm(None, "T", Some("T please."), &mut errors), None);
        assert_eq!(errors, vec!["T must be in HH:MM format (24-hour).", "T please."]);
    }

    #[test]
    fn test_require_date_bad_text_reads_as_missing() {
        let mut errors = Vec::new();
        assert!(require_date(Some(&raw("2025-13-01")), "D", None, &mut errors).is_none());
        assert_eq!(errors, vec!["D is required."]);
    }

    #[test]
    fn test_has_content() {
        assert!(has_content(Some(&RawValue::from(0.0))));
        assert!(!has_content(Some(&raw("   "))));
        assert!(!has_content(None));
    }
}
