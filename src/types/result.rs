//! Validation outcomes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ComputedFields;

/// Outcome of a step validator.
///
/// `ok` is false as soon as any error or field error is recorded; warnings
/// never block. Field errors keep one message per field (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    ok: bool,
    errors: Vec<String>,
    field_errors: BTreeMap<String, String>,
    warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            field_errors: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok_result() -> Self {
        Self::default()
    }

    /// Single-error result, attached to `field` when given.
    pub fn error_result(message: &str, field: Option<&str>) -> Self {
        let mut r = Self::default();
        match field {
            Some(name) if !name.is_empty() => r.add_field_error(name, message),
            _ => r.add_error(message),
        }
        r
    }

    pub const fn ok(&self) -> bool {
        self.ok
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub const fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Form-level error. Empty messages are ignored.
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !message.is_empty() {
            self.errors.push(message);
            self.ok = false;
        }
    }

    pub fn add_field_error(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        if !field.is_empty() && !message.is_empty() {
            self.field_errors.insert(field.to_string(), message);
            self.ok = false;
        }
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !message.is_empty() {
            self.warnings.push(message);
        }
    }

    /// Fold `other` into `self`: errors and warnings append, field errors
    /// overlay (other wins per key).
    pub fn merge(&mut self, other: Self) -> &mut Self {
        self.ok &= other.ok;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.field_errors.extend(other.field_errors);
        self
    }
}

/// Outcome of the hole-section validator.
///
/// `computed` is populated even when `ok` is false so the caller can show
/// every derivable value next to the errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleSectionValidationResult {
    ok: bool,
    errors: Vec<String>,
    computed: ComputedFields,
}

impl HoleSectionValidationResult {
    pub fn new(errors: Vec<String>, computed: ComputedFields) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            computed,
        }
    }

    pub const fn ok(&self) -> bool {
        self.ok
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub const fn computed(&self) -> &ComputedFields {
        &self.computed
    }

    /// Whether any error message contains `needle`.
    pub fn has_error_containing(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }

    pub fn into_parts(self) -> (bool, Vec<String>, ComputedFields) {
        (self.ok, self.errors, self.computed)
    }
}
