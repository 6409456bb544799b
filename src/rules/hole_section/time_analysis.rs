//! TIME ANALYSIS per-run fields and the totals derived from them.
//!
//! Twelve metrics exist for up to three runs. Run 1 is always required and
//! also reads the legacy unsuffixed keys; runs 2 and 3 become required as a
//! whole once any of their fields is filled in.

use tracing::debug;

use super::SectionAccumulator;
use crate::calculations::{eff_drilling_percent, total_drilling_meters, total_drilling_time_hours};
use crate::rules::fields::{is_blank, optional_decimal, require_decimal, Minimum};
use crate::types::{FormInput, RawValue};

pub const RUNS: u8 = 3;

/// One run-indexed metric.
#[derive(Debug, Clone, Copy)]
pub struct RunField {
    pub key: &'static str,
    pub label: &'static str,
    /// Strictly positive instead of non-negative.
    pub strictly_positive: bool,
}

const fn field(key: &'static str, label: &'static str) -> RunField {
    RunField {
        key,
        label,
        strictly_positive: false,
    }
}

pub const RUN_FIELDS: [RunField; 12] = [
    RunField {
        key: "ta_standby_time_hrs",
        label: "STANDBY TIME (HRS)",
        strictly_positive: true,
    },
    field("ta_ru_time_hrs", "R/U TIME (HRS)"),
    field("ta_tripping_time_hrs", "TRIPPING TIME (HRS)"),
    field("ta_circulation_time_hrs", "CIRCULATION TIME (HRS)"),
    field("ta_rotary_time_hrs", "ROTARY TIME (HRS)"),
    field("ta_rotary_meters", "ROTARY (METER)"),
    field("ta_sliding_time_hrs", "SLIDING TIME (HRS)"),
    field("ta_sliding_meters", "SLIDING (METER)"),
    field("ta_npt_due_to_rig_hrs", "NPT DUE TO RIG (HRS)"),
    field("ta_npt_due_to_motor_hrs", "NPT DUE TO MOTOR (HRS)"),
    field("ta_npt_due_to_mwd_hrs", "NPT DUE TO MWD (HRS)"),
    field("ta_brt_hrs", "BRT (HRS)"),
];

impl RunField {
    fn label_for(&self, run: u8) -> String {
        format!("TIME ANALYSIS / {} (RUN-{run})", self.label)
    }

    fn empty_message(&self, run: u8) -> String {
        let label = self.label_for(run);
        if self.strictly_positive {
            format!("{label} is required and must be greater than 0.")
        } else {
            format!("0 or a greater number is required for {label}.")
        }
    }

    fn minimum(&self) -> Minimum {
        if self.strictly_positive {
            Minimum::Exclusive(0.0)
        } else {
            Minimum::Inclusive(0.0)
        }
    }
}

/// Raw value of `key` for `run`. Run 1 prefers `<key>_run1` unless it is
/// null, then the legacy `<key>`.
pub fn run_value<'a>(input: &'a FormInput, key: &str, run: u8) -> Option<&'a RawValue> {
    let suffixed = format!("{key}_run{run}");
    if run == 1 {
        input.pick_present(&[suffixed.as_str(), key])
    } else {
        input.get(&suffixed)
    }
}

/// Whether any of the run's twelve fields is non-blank.
pub fn run_has_any(input: &FormInput, run: u8) -> bool {
    RUN_FIELDS
        .iter()
        .any(|f| !is_blank(run_value(input, f.key, run)))
}

pub fn run_is_required(input: &FormInput, run: u8) -> bool {
    run == 1 || run_has_any(input, run)
}

/// Parsed values of one run, in `RUN_FIELDS` order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunValues([Option<f64>; 12]);

impl RunValues {
    pub fn get(&self, key: &str) -> Option<f64> {
        RUN_FIELDS
            .iter()
            .position(|f| f.key == key)
            .and_then(|i| self.0[i])
    }

    pub fn drilling_time(&self) -> Option<f64> {
        Some(total_drilling_time_hours(
            self.get("ta_rotary_time_hrs")?,
            self.get("ta_sliding_time_hrs")?,
        ))
    }

    pub fn drilling_meters(&self) -> Option<f64> {
        Some(total_drilling_meters(
            self.get("ta_rotary_meters")?,
            self.get("ta_sliding_meters")?,
        ))
    }

    pub fn brt(&self) -> Option<f64> {
        self.get("ta_brt_hrs")
    }

    /// %EFF DRILLING when both drilling time and BRT are known.
    pub fn efficiency(&self) -> Option<f64> {
        Some(eff_drilling_percent(self.drilling_time()?, self.brt()?))
    }
}

/// Sum of the present values; `None` when all are absent.
pub fn sum_present(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values
        .into_iter()
        .flatten()
        .fold(None, |acc, x| Some(acc.unwrap_or(0.0) + x))
}

fn validate_run(input: &FormInput, run: u8, required: bool, errors: &mut Vec<String>) -> RunValues {
    let mut values = RunValues::default();
    for (slot, f) in values.0.iter_mut().zip(RUN_FIELDS.iter()) {
        let raw = run_value(input, f.key, run);
        let label = f.label_for(run);
        *slot = if required {
            require_decimal(raw, &label, f.minimum(), Some(&f.empty_message(run)), errors)
        } else {
            optional_decimal(raw, &label, errors)
        };
    }
    values
}

/// Validate all runs and record the drilling totals.
pub fn validate(input: &FormInput, acc: &mut SectionAccumulator) -> [RunValues; 3] {
    let mut runs = [RunValues::default(); 3];
    for (idx, values) in runs.iter_mut().enumerate() {
        let run = idx as u8 + 1;
        let required = run_is_required(input, run);
        debug!(run, required, "time analysis run");
        *values = validate_run(input, run, required, &mut acc.errors);

        acc.set(format!("ta_total_drilling_time_hrs_run{run}"), values.drilling_time());
        acc.set(format!("ta_total_drilling_meters_run{run}"), values.drilling_meters());
    }

    acc.set(
        "ta_total_drilling_time_hrs_total",
        sum_present(runs.iter().map(RunValues::drilling_time)),
    );
    acc.set(
        "ta_total_drilling_meters_total",
        sum_present(runs.iter().map(RunValues::drilling_meters)),
    );
    runs
}

/// Per-run and section %EFF DRILLING.
///
/// The section figure divides the summed drilling time by the sum of the BRT
/// values that are present (absent runs count as 0).
pub fn derive_efficiency(runs: &[RunValues; 3], acc: &mut SectionAccumulator) {
    for (idx, values) in runs.iter().enumerate() {
        acc.set(format!("ta_eff_drilling_pct_run{}", idx + 1), values.efficiency());
    }

    let brt_total: f64 = runs.iter().filter_map(RunValues::brt).sum();
    let total = sum_present(runs.iter().map(RunValues::drilling_time))
        .map(|drilling| eff_drilling_percent(drilling, brt_total));
    acc.set("ta_eff_drilling_pct_total", total);
}

pub(super) fn known_keys() -> Vec<String> {
    let mut keys = Vec::new();
    for f in RUN_FIELDS {
        keys.push(f.key.to_string());
        for run in 1..=RUNS {
            keys.push(format!("{}_run{run}", f.key));
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run1(input: FormInput) -> FormInput {
        RUN_FIELDS.iter().fold(input, |acc, f| {
            let value = if f.strictly_positive { "2" } else { "1" };
            acc.with(&format!("{}_run1", f.key), value)
        })
    }

    fn run(input: &FormInput) -> (SectionAccumulator, [RunValues; 3]) {
        let mut acc = SectionAccumulator::new();
        let runs = validate(input, &mut acc);
        derive_efficiency(&runs, &mut acc);
        (acc, runs)
    }

    #[test]
    fn test_run1_only() {
        let input = run1(FormInput::new());
        assert!(!run_is_required(&input, 2));
        let (acc, runs) = run(&input);
        assert!(acc.errors.is_empty(), "{:?}", acc.errors);
        assert_eq!(runs[0].get("ta_standby_time_hrs"), Some(2.0));
        assert_eq!(acc.computed.number("ta_total_drilling_time_hrs_run1"), Some(2.0));
        assert!(acc.computed.get("ta_total_drilling_time_hrs_run2").is_some_and(|v| v.is_null()));
        assert_eq!(acc.computed.number("ta_total_drilling_time_hrs_total"), Some(2.0));
        assert_eq!(acc.computed.number("ta_total_drilling_meters_total"), Some(2.0));
        // 2 h drilling over 1 h BRT
        assert_eq!(acc.computed.number("ta_eff_drilling_pct_run1"), Some(200.0));
        assert_eq!(acc.computed.number("ta_eff_drilling_pct_total"), Some(200.0));
    }

    #[test]
    fn test_run1_required_messages() {
        let (acc, _) = run(&FormInput::new());
        assert_eq!(acc.errors.len(), 12);
        assert_eq!(
            acc.errors[0],
            "TIME ANALYSIS / STANDBY TIME (HRS) (RUN-1) is required and must be greater than 0."
        );
        assert_eq!(
            acc.errors[1],
            "0 or a greater number is required for TIME ANALYSIS / R/U TIME (HRS) (RUN-1)."
        );
        assert!(acc.computed.get("ta_total_drilling_time_hrs_total").is_some_and(|v| v.is_null()));
        assert!(acc.computed.get("ta_eff_drilling_pct_total").is_some_and(|v| v.is_null()));
    }

    #[test]
    fn test_single_run2_value_requires_whole_run() {
        let input = run1(FormInput::new()).with("ta_rotary_meters_run2", "15");
        assert!(run_is_required(&input, 2));
        assert!(!run_is_required(&input, 3));
        let (acc, _) = run(&input);
        assert_eq!(acc.errors.len(), 11);
        assert!(acc.errors.iter().all(|e| e.contains("(RUN-2)")));
    }

    #[test]
    fn test_optional_run_still_checks_numbers() {
        let mut input = run1(FormInput::new());
        // Whitespace is blank, so run 3 stays optional.
        input.insert("ta_brt_hrs_run3", "  ");
        let (acc, _) = run(&input);
        assert!(acc.errors.is_empty());
        assert!(!run_is_required(&input, 3));
    }

    #[test]
    fn test_legacy_keys_feed_run1() {
        let input = RUN_FIELDS
            .iter()
            .fold(FormInput::new(), |acc, f| acc.with(f.key, "3"))
            .with("ta_brt_hrs_run1", "12");
        let (acc, runs) = run(&input);
        assert!(acc.errors.is_empty(), "{:?}", acc.errors);
        assert_eq!(runs[0].brt(), Some(12.0));
        assert_eq!(runs[0].get("ta_rotary_time_hrs"), Some(3.0));
        assert_eq!(acc.computed.number("ta_eff_drilling_pct_run1"), Some(50.0));
    }

    #[test]
    fn test_null_run1_key_falls_back_to_legacy() {
        let input = FormInput::new()
            .with("ta_brt_hrs_run1", RawValue::Null)
            .with("ta_brt_hrs", "7");
        assert_eq!(run_value(&input, "ta_brt_hrs", 1), Some(&RawValue::from("7")));
        assert_eq!(run_value(&input, "ta_brt_hrs", 2), None);
    }

    #[test]
    fn test_zero_brt_gives_zero_efficiency() {
        let input = run1(FormInput::new()).with("ta_brt_hrs_run1", "0");
        let (acc, _) = run(&input);
        assert_eq!(acc.computed.number("ta_eff_drilling_pct_run1"), Some(0.0));
        assert_eq!(acc.computed.number("ta_eff_drilling_pct_total"), Some(0.0));
    }

    #[test]
    fn test_standby_must_be_positive() {
        let input = run1(FormInput::new()).with("ta_standby_time_hrs_run1", "0");
        let (acc, _) = run(&input);
        assert_eq!(
            acc.errors,
            vec!["TIME ANALYSIS / STANDBY TIME (HRS) (RUN-1) must be greater than 0.0."]
        );
    }

    #[test]
    fn test_section_totals_sum_present_runs() {
        let input = RUN_FIELDS.iter().fold(run1(FormInput::new()), |acc, f| {
            acc.with(&format!("{}_run3", f.key), "4")
        });
        let (acc, _) = run(&input);
        assert!(acc.errors.is_empty(), "{:?}", acc.errors);
        assert_eq!(acc.computed.number("ta_total_drilling_time_hrs_total"), Some(10.0));
        // (2 + 8) / (1 + 4)
        assert_eq!(acc.computed.number("ta_eff_drilling_pct_total"), Some(200.0));
    }

    #[test]
    fn test_sum_present() {
        assert_eq!(sum_present([None, None]), None);
        assert_eq!(sum_present([None, Some(0.0)]), Some(0.0));
        assert_eq!(sum_present([Some(1.5), None, Some(2.0)]), Some(3.5));
    }
}
