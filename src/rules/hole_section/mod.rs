//! Hole Section Validator
//!
//! `validate_hole_section()` is a pure function over one form snapshot. It is
//! composed of independent field groups that share only the error list and
//! the computed map held by a [`SectionAccumulator`]. Each group:
//!
//! 1. decides whether it is active (`is_active`-style predicate),
//! 2. if active, validates every member field and records normalized values,
//! 3. if inactive, records empty/null placeholders so `computed` always has
//!    the full schema.
//!
//! Error order follows the form: motors, bits, personnel, info, time analysis
//! (mobilization inputs, run fields, then the mobilization summary).

pub mod bits;
pub mod info;
pub mod mobilization;
pub mod motors;
pub mod personnel;
pub mod time_analysis;

use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

use crate::types::{ComputedFields, ComputedValue, FormInput, HoleSectionValidationResult};

/// Errors and computed values built up across the field groups.
#[derive(Debug, Default)]
pub struct SectionAccumulator {
    pub errors: Vec<String>,
    pub computed: ComputedFields,
}

impl SectionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ComputedValue>) {
        self.computed.set(key, value);
    }

    pub fn finish(self) -> HoleSectionValidationResult {
        HoleSectionValidationResult::new(self.errors, self.computed)
    }
}

/// Validate a hole-section snapshot and derive its read-only values.
///
/// Never fails: bad input ends up in `errors`, and `computed` is filled as
/// far as the valid operands allow.
pub fn validate_hole_section(input: &FormInput) -> HoleSectionValidationResult {
    let mut acc = SectionAccumulator::new();

    motors::validate(input, &mut acc);
    bits::validate(input, &mut acc);
    personnel::validate(input, &mut acc);
    info::validate(input, &mut acc);

    let mobilization = mobilization::read(input, &mut acc);
    let runs = time_analysis::validate(input, &mut acc);
    mobilization::derive(&mobilization, &mut acc);
    time_analysis::derive_efficiency(&runs, &mut acc);

    debug!(
        errors = acc.errors.len(),
        computed = acc.computed.len(),
        "hole section validated"
    );
    acc.finish()
}

/// Every form key the validator reads, including legacy unsuffixed keys,
/// per-run keys, gauge flags and pass-through ticket keys.
pub fn known_section_keys() -> HashSet<&'static str> {
    static KEYS: OnceLock<Vec<String>> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut keys = Vec::new();
        keys.extend(motors::known_keys());
        keys.extend(bits::known_keys());
        keys.extend(personnel::PERSONNEL_KEYS.iter().map(|k| (*k).to_string()));
        keys.extend(info::KNOWN_KEYS.iter().map(|k| (*k).to_string()));
        keys.extend(mobilization::KNOWN_KEYS.iter().map(|k| (*k).to_string()));
        keys.extend(time_analysis::known_keys());
        keys.push("tickets".to_string());
        for line in 1..=crate::types::TICKET_LINES {
            keys.push(format!("ticket_date_{line}"));
            keys.push(format!("ticket_price_usd_{line}"));
        }
        keys
    })
    .iter()
    .map(String::as_str)
    .collect()
}
