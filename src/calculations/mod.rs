//! Engineering Calculators
//!
//! Deterministic derivations surfaced as read-only fields on the hole
//! section form. Pure functions, no I/O.
//!
//! - `tfa_from_nozzles()` / `nozzle_summary()` - bit hydraulics
//! - `total_drilling_time_hours()` / `total_drilling_meters()` - rotary + sliding
//! - `mob_to_release_hours()` - crew mobilization to release, with 24:00 rollover
//! - `eff_drilling_percent()` - drilling time over BRT, zero-guarded
//! - `gauge_from_fraction()` - stabilizer gauge from whole + fraction inches

pub mod gauge;
pub mod hydraulics;
pub mod time_analysis;

pub use gauge::{gauge_from_fraction, is_gauge_none_token, GAUGE_NONE_TOKEN};
pub use hydraulics::{nozzle_summary, tfa_from_nozzles};
pub use time_analysis::{
    eff_drilling_percent, mob_to_release_hours, total_drilling_meters, total_drilling_time_hours,
};

use crate::parsing::ParseError;
use thiserror::Error;

/// Calculation failures. The `Display` text is user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Nozzle list is empty.")]
    EmptyNozzleList,

    #[error(transparent)]
    Time(#[from] ParseError),

    #[error("Release date/time must be after crew mobilization date/time.")]
    NegativeDuration,

    #[error("Denominator must be greater than zero.")]
    ZeroDenominator,
}
