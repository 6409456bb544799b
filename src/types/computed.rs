//! Derived and normalized values surfaced to the caller

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::NozzleLine;
use crate::calculations::nozzle_summary;
use crate::parsing::format_decimal;

/// One computed entry. `Null` marks a value that could not be derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComputedValue {
    Null,
    Number(f64),
    Text(String),
    Nozzles(Vec<NozzleLine>),
}

impl ComputedValue {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text for a read-only display box.
    pub fn display(&self, decimals: usize) -> String {
        match self {
            Self::Null => String::new(),
            Self::Number(x) => format_decimal(*x, decimals),
            Self::Text(s) => s.clone(),
            Self::Nozzles(lines) => nozzle_summary(lines),
        }
    }
}

impl From<f64> for ComputedValue {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<Option<f64>> for ComputedValue {
    fn from(x: Option<f64>) -> Self {
        x.map_or(Self::Null, Self::Number)
    }
}

impl From<String> for ComputedValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ComputedValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<NozzleLine>> for ComputedValue {
    fn from(lines: Vec<NozzleLine>) -> Self {
        Self::Nozzles(lines)
    }
}

/// Key -> computed value. Keys absent from the map were never derived
/// (e.g. `bit1_tfa_in2` when no nozzles were entered), which is distinct
/// from a present `Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComputedFields(BTreeMap<String, ComputedValue>);

impl ComputedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ComputedValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ComputedValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Numeric value of a key, `None` when absent, null or non-numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ComputedValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ComputedValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComputedValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every entry rendered for display with `decimals` fraction digits.
    pub fn display_map(&self, decimals: usize) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.display(decimals)))
            .collect()
    }
}
