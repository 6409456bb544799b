//! Step 1: well identity

use tracing::debug;

use crate::canonical::{canonical_text, canonical_well_name, is_well_key_format_ok};
use crate::types::{FormInput, ValidationResult};

/// Required identity fields and their labels, in form order.
pub const REQUIRED_FIELDS: [(&str, &str); 8] = [
    ("well_name", "Well Name"),
    ("operator", "Operator"),
    ("contractor", "Contractor"),
    ("well_purpose", "Well Purpose"),
    ("well_type", "Well Type"),
    ("dd_well_type", "DD Well Type"),
    ("province", "Province"),
    ("rig_name", "Rig Name"),
];

/// Combo-box placeholders that mean "nothing selected" (canonical form).
pub const PLACEHOLDER_VALUES: [&str; 3] = [
    "SELECT OR ENTER MANUALLY",
    "SELECT FROM LIST",
    "AUTOMATICALLY GENERATED",
];

pub const WELL_KEY_FORMAT_MESSAGE: &str = "Well Name must end with a dash followed by digits, \
     optionally followed by letters or digits (e.g., YAPRAKLI-4, YAPRAKLI-4S, YAPRAKLI-4ST, YAPRAKLI-1K2).";

/// Blank or a placeholder once canonicalized.
pub fn is_unset(raw: &str) -> bool {
    let canon = canonical_text(raw);
    canon.is_empty() || PLACEHOLDER_VALUES.contains(&canon.as_str())
}

pub fn validate_step1(input: &FormInput) -> ValidationResult {
    let mut r = ValidationResult::new();

    for (field, label) in REQUIRED_FIELDS {
        if is_unset(&input.text(field)) {
            r.add_field_error(field, format!("{label} is required."));
        }
    }

    // The key check runs only once both name and key are present.
    let well_key = canonical_well_name(&input.text("well_key"));
    let well_name = canonical_well_name(&input.text("well_name"));
    if !well_name.is_empty() && !well_key.is_empty() && !is_well_key_format_ok(&well_key) {
        r.add_field_error("well_name", WELL_KEY_FORMAT_MESSAGE);
    }

    debug!(ok = r.ok(), field_errors = r.field_errors().len(), "step 1 validated");
    r
}
