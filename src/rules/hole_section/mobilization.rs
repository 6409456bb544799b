//! TIME ANALYSIS mobilization block: call-out/release dates and times, and
//! the MOB TO RELEASE duration.
//!
//! Each of the four inputs reports its own error. When the duration cannot
//! be derived, a summary error is added on top of the per-field ones.

use chrono::NaiveDate;
use tracing::debug;

use super::SectionAccumulator;
use crate::calculations::mob_to_release_hours;
use crate::rules::fields::{require_date, require_time_hhmm};
use crate::types::FormInput;

pub const KNOWN_KEYS: [&str; 4] = [
    "ta_call_out_date",
    "ta_crew_mob_time",
    "ta_release_date",
    "ta_release_time",
];

pub const MOB_TO_RELEASE_BLANK: &str =
    "MOB TO RELEASE is blank. Please verify all date and time inputs.";

/// Parsed mobilization inputs; `None` where the field failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobilizationInputs {
    pub call_out_date: Option<NaiveDate>,
    pub crew_mob_time: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub release_time: Option<String>,
}

/// Parse the four inputs, reporting each missing or malformed one.
pub fn read(input: &FormInput, acc: &mut SectionAccumulator) -> MobilizationInputs {
    let errors = &mut acc.errors;
    MobilizationInputs {
        call_out_date: require_date(
            input.get("ta_call_out_date"),
            "TIME ANALYSIS / CALL OUT DATE",
            Some(
                "TIME ANALYSIS / CALL OUT DATE is required. \
                 If the prev. sec. isn't released, select the day after the last invoice date.",
            ),
            errors,
        ),
        crew_mob_time: require_time_hhmm(
            input.get("ta_crew_mob_time"),
            "TIME ANALYSIS / CREW MOB TIME",
            Some("TIME ANALYSIS / CREW MOB TIME is required (e.g., 16:30, 24:00, 00:00)."),
            errors,
        ),
        release_date: require_date(
            input.get("ta_release_date"),
            "TIME ANALYSIS / RELEASE DATE",
            Some(
                "TIME ANALYSIS / RELEASE DATE is required. \
                 Important: If not released, choose the latest invoice date.",
            ),
            errors,
        ),
        release_time: require_time_hhmm(
            input.get("ta_release_time"),
            "TIME ANALYSIS / RELEASE TIME",
            Some(
                "TIME ANALYSIS / RELEASE TIME is required. \
                 Important: If not released, use 00:00 as the time value.",
            ),
            errors,
        ),
    }
}

/// MOB TO RELEASE (HRS) when all four inputs parsed and the release does
/// not precede the mobilization.
pub fn mob_to_release(inputs: &MobilizationInputs) -> Option<f64> {
    let (Some(call_out), Some(mob), Some(release), Some(release_time)) = (
        inputs.call_out_date,
        inputs.crew_mob_time.as_deref(),
        inputs.release_date,
        inputs.release_time.as_deref(),
    ) else {
        return None;
    };

    match mob_to_release_hours(call_out, mob, release, release_time) {
        Ok(hours) => Some(hours),
        Err(e) => {
            debug!(error = %e, "mob to release not derivable");
            None
        }
    }
}

pub fn derive(inputs: &MobilizationInputs, acc: &mut SectionAccumulator) {
    let hours = mob_to_release(inputs);
    if hours.is_none() {
        acc.error(MOB_TO_RELEASE_BLANK);
    }
    acc.set("ta_mob_to_release_hrs", hours);

    if let Some(t) = &inputs.crew_mob_time {
        acc.set("ta_crew_mob_time_norm", t.as_str());
    }
    if let Some(t) = &inputs.release_time {
        acc.set("ta_release_time_norm", t.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mob(call_out: &str, mob_time: &str, release: &str, release_time: &str) -> FormInput {
        FormInput::new()
            .with("ta_call_out_date", call_out)
            .with("ta_crew_mob_time", mob_time)
            .with("ta_release_date", release)
            .with("ta_release_time", release_time)
    }

    fn run(input: &FormInput) -> SectionAccumulator {
        let mut acc = SectionAccumulator::new();
        let inputs = read(input, &mut acc);
        derive(&inputs, &mut acc);
        acc
    }

    #[test]
    fn test_duration_and_normalized_times() {
        let acc = run(&mob("2025-01-10", "1630", "12.01.2025", "8.30"));
        assert!(acc.errors.is_empty(), "{:?}", acc.errors);
        assert_eq!(acc.computed.number("ta_mob_to_release_hrs"), Some(40.0));
        assert_eq!(acc.computed.text("ta_crew_mob_time_norm"), Some("16:30"));
        assert_eq!(acc.computed.text("ta_release_time_norm"), Some("08:30"));
    }

    #[test]
    fn test_missing_input_adds_summary_error() {
        let acc = run(&mob("2025-01-10", "", "2025-01-12", "08:30"));
        assert_eq!(
            acc.errors,
            vec![
                "TIME ANALYSIS / CREW MOB TIME is required (e.g., 16:30, 24:00, 00:00).".to_string(),
                MOB_TO_RELEASE_BLANK.to_string(),
            ]
        );
        assert!(acc.computed.get("ta_mob_to_release_hrs").is_some_and(|v| v.is_null()));
        assert!(!acc.computed.contains("ta_crew_mob_time_norm"));
        assert_eq!(acc.computed.text("ta_release_time_norm"), Some("08:30"));
    }

    #[test]
    fn test_rollover_before_release_is_summary_error_only() {
        let acc = run(&mob("2025-01-10", "24:00", "2025-01-10", "06:00"));
        assert_eq!(acc.errors, vec![MOB_TO_RELEASE_BLANK.to_string()]);
        assert!(acc.computed.number("ta_mob_to_release_hrs").is_none());
        assert_eq!(acc.computed.text("ta_crew_mob_time_norm"), Some("24:00"));
    }

    #[test]
    fn test_bad_time_format() {
        let acc = run(&mob("2025-01-10", "2401", "2025-01-11", "06:00"));
        assert_eq!(acc.errors[0], "TIME ANALYSIS / CREW MOB TIME must be in HH:MM format (24-hour).");
        assert_eq!(acc.errors[1], MOB_TO_RELEASE_BLANK);
    }
}
