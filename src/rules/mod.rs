//! Form validation rules
//!
//! One entry point per form step:
//!
//! - [`validate_step1`] : well identity (name, key format, required parties)
//! - [`validate_step2`] : planned and actual trajectory
//! - [`validate_hole_section`] : motors, bits, personnel, casing info, time
//!   analysis and the values derived from them
//!
//! Steps 1 and 2 return a [`ValidationResult`] with field-level errors.
//! The hole section returns ordered messages plus computed fields.

pub mod fields;
pub mod hole_section;
pub mod options;
pub mod step1;
pub mod step2;

pub use hole_section::{known_section_keys, validate_hole_section};
pub use step1::validate_step1;
pub use step2::validate_step2;

pub use crate::types::{HoleSectionValidationResult, ValidationResult};
