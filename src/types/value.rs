//! Raw form input: the coerce-or-reject boundary between UI/persisted data
//! and the rule engine.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use super::NozzleLine;
use crate::config::validation::{suggest_correction, ValidationWarning};
use crate::parsing::parse_date_text;

/// Failures at the JSON input boundary.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Form input must be a JSON object")]
    NotAnObject,
}

/// One raw form value, as typed in the UI or loaded from storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Nozzle(NozzleLine),
    List(Vec<RawValue>),
    Record(BTreeMap<String, RawValue>),
}

/// Render a number the way it was most likely typed (`8` not `8.0`).
fn number_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

impl RawValue {
    /// Absent-equivalent: null or whitespace-only text. Numbers, dates and
    /// lists are never blank, even when zero or empty.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Falsy in the sense of the legacy key fallback: null, `false`, zero,
    /// the empty string, or an empty list/record.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Number(x) => *x == 0.0,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Record(fields) => fields.is_empty(),
            Self::Date(_) | Self::DateTime(_) | Self::Nozzle(_) => false,
        }
    }

    /// Trimmed text form; null is `""`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Number(x) => number_text(*x),
            Self::Text(s) => s.trim().to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Nozzle(n) => format!("{}x{}", n.count, n.size_32nds),
            Self::List(_) | Self::Record(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }

    /// Integer coercion: numbers truncate toward zero, text must hold an integer.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Number(x) if x.is_finite() => Some(x.trunc() as i64),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Calendar date from a date, a date-time, or `YYYY-MM-DD` / `DD.MM.YYYY` text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::DateTime(dt) => Some(dt.date()),
            Self::Text(s) => parse_date_text(s),
            _ => None,
        }
    }

    /// Checkbox-style flag: `true`, non-zero, or `1`/`true`/`yes`/`y` text.
    pub fn as_flag(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(x) => *x == 1.0,
            Self::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "y"
            ),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(fields) => Self::Record(
                fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<i64> for RawValue {
    fn from(x: i64) -> Self {
        Self::Number(x as f64)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Vec<NozzleLine>> for RawValue {
    fn from(lines: Vec<NozzleLine>) -> Self {
        Self::List(lines.into_iter().map(Self::Nozzle).collect())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// Form Input
// ============================================================================

/// A flat snapshot of form values keyed by field name.
///
/// Missing keys read as absent; unknown keys are carried but never consulted
/// by the rules.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct FormInput {
    values: BTreeMap<String, RawValue>,
}

impl From<BTreeMap<String, serde_json::Value>> for FormInput {
    fn from(map: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            values: map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect(),
        }
    }
}

impl Serialize for FormInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object snapshot.
    pub fn from_json_str(raw: &str) -> Result<Self, InputError> {
        match serde_json::from_str::<serde_json::Value>(raw)? {
            serde_json::Value::Object(fields) => Ok(Self {
                values: fields
                    .into_iter()
                    .map(|(k, v)| (k, RawValue::from(v)))
                    .collect(),
            }),
            _ => Err(InputError::NotAnObject),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<RawValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<RawValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    /// Trimmed text of a key; missing keys read as `""`.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(RawValue::as_text).unwrap_or_default()
    }

    pub fn is_blank(&self, key: &str) -> bool {
        self.get(key).map_or(true, RawValue::is_blank)
    }

    /// Legacy fallback chain: the first value that is not falsy, in key order.
    ///
    /// When every candidate is falsy the last key's value is returned, so an
    /// explicit `0` or `""` on the current key still falls through to the
    /// legacy key.
    pub fn pick_first(&self, keys: &[&str]) -> Option<&RawValue> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.is_falsy())
            .or_else(|| keys.last().and_then(|k| self.get(k)))
    }

    /// Precedence lookup: the first key that is present and not null.
    pub fn pick_present(&self, keys: &[&str]) -> Option<&RawValue> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !matches!(v, RawValue::Null))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Warnings for keys outside `known`, with "did you mean" suggestions.
    pub fn unknown_keys(&self, known: &HashSet<&str>) -> Vec<ValidationWarning> {
        self.keys()
            .filter(|k| !known.contains(k))
            .map(|k| ValidationWarning {
                field: k.to_string(),
                message: format!("Unknown form key '{k}'"),
                suggestion: suggest_correction(k, known),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_semantics() {
        assert!(RawValue::Null.is_blank());
        assert!(RawValue::from("  ").is_blank());
        assert!(!RawValue::from(0.0).is_blank());
        assert!(!RawValue::List(vec![]).is_blank());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(RawValue::from(" NOV ").as_text(), "NOV");
        assert_eq!(RawValue::from(8_i64).as_text(), "8");
        assert_eq!(RawValue::from(8.3).as_text(), "8.3");
        assert_eq!(RawValue::Null.as_text(), "");
        let d = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(RawValue::from(d).as_text(), "2025-02-01");
    }

    #[test]
    fn test_to_int() {
        assert_eq!(RawValue::from(" 12 ").to_int(), Some(12));
        assert_eq!(RawValue::from(-3.7).to_int(), Some(-3));
        assert_eq!(RawValue::from("1.5").to_int(), None);
        assert_eq!(RawValue::Null.to_int(), None);
    }

    #[test]
    fn test_as_date() {
        let d = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(RawValue::from("2025-02-01").as_date(), Some(d));
        assert_eq!(RawValue::from("01.02.2025").as_date(), Some(d));
        assert_eq!(RawValue::from(d.and_hms_opt(6, 0, 0).unwrap()).as_date(), Some(d));
        assert_eq!(RawValue::from(20250201_i64).as_date(), None);
    }

    #[test]
    fn test_flags() {
        assert!(RawValue::from(true).as_flag());
        assert!(RawValue::from("Yes").as_flag());
        assert!(RawValue::from(1_i64).as_flag());
        assert!(!RawValue::from("0").as_flag());
        assert!(!RawValue::Null.as_flag());
    }

    #[test]
    fn test_pick_first_falls_through_falsy_values() {
        let input = FormInput::new()
            .with("mud_motor1_brand", "")
            .with("mud_motor_brand", "NOV");
        assert_eq!(
            input.pick_first(&["mud_motor1_brand", "mud_motor_brand"]),
            Some(&RawValue::from("NOV"))
        );

        let zero = FormInput::new()
            .with("a", 0.0)
            .with("b", 2.0);
        assert_eq!(zero.pick_first(&["a", "b"]), Some(&RawValue::from(2.0)));

        let current_only = FormInput::new().with("a", "SLB");
        assert_eq!(current_only.pick_first(&["a", "b"]), Some(&RawValue::from("SLB")));
        assert_eq!(FormInput::new().pick_first(&["a", "b"]), None);
    }

    #[test]
    fn test_pick_present_prefers_first_non_null() {
        let input = FormInput::new()
            .with("ta_brt_hrs_run1", "")
            .with("ta_brt_hrs", "12");
        // Blank but present wins over the legacy key.
        assert_eq!(
            input.pick_present(&["ta_brt_hrs_run1", "ta_brt_hrs"]),
            Some(&RawValue::from(""))
        );

        let legacy = FormInput::new()
            .with("ta_brt_hrs_run1", RawValue::Null)
            .with("ta_brt_hrs", "12");
        assert_eq!(
            legacy.pick_present(&["ta_brt_hrs_run1", "ta_brt_hrs"]),
            Some(&RawValue::from("12"))
        );
    }

    #[test]
    fn test_from_json_str() {
        let input = FormInput::from_json_str(r#"{"bit1_brand": "SMITH", "info_section_md": 1250.5}"#)
            .unwrap();
        assert_eq!(input.text("bit1_brand"), "SMITH");
        assert_eq!(input.get("info_section_md"), Some(&RawValue::Number(1250.5)));
        assert!(matches!(
            FormInput::from_json_str("[1, 2]"),
            Err(InputError::NotAnObject)
        ));
        assert!(matches!(FormInput::from_json_str("{"), Err(InputError::Json(_))));
    }

    #[test]
    fn test_deserialize_via_serde() {
        let input: FormInput = serde_json::from_value(json!({"a": [1, 2], "b": null})).unwrap();
        assert_eq!(input.len(), 2);
        assert!(input.is_blank("b"));
        assert!(input.is_blank("missing"));
    }

    #[test]
    fn test_unknown_keys_with_suggestion() {
        let known: HashSet<&str> = ["bit1_brand", "bit1_serial"].into_iter().collect();
        let input = FormInput::new().with("bit1_brnad", "NOV").with("bit1_serial", "X1");
        let warnings = input.unknown_keys(&known);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "bit1_brnad");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("bit1_brand"));
    }
}
