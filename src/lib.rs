//! wellform: drilling data-entry validation
//!
//! Validation and derivation engine for well drilling report forms.
//!
//! ## Architecture
//!
//! - **Canonicalizer**: identifier text to a restricted uppercase ASCII form
//! - **Parsers**: comma-or-dot decimals, dates, strict HH:MM with 24:00 rollover
//! - **Calculations**: nozzle TFA, drilling totals, mob-to-release, efficiency
//! - **Rules**: step 1 (identity), step 2 (trajectory) and the hole section
//!   validator, which returns ordered errors plus every derived value
//! - **Store**: persistence boundary keyed by well and hole section

pub mod calculations;
pub mod canonical;
pub mod config;
pub mod parsing;
pub mod rules;
pub mod store;
pub mod types;

// Re-export configuration
pub use config::FormConfig;

// Re-export commonly used types
pub use types::{
    ComputedFields, ComputedValue, FormInput, HoleSectionValidationResult, InputError,
    NozzleLine, RawValue, TicketRow, ValidationResult,
};

// Re-export validators
pub use rules::{known_section_keys, validate_hole_section, validate_step1, validate_step2};

// Re-export storage
pub use store::{MemorySectionStore, SectionKey, SectionRecord, SectionStore, StoreError};
