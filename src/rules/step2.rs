//! Step 2: planned and actual trajectory
//!
//! Planned values are required; actual values are checked only when entered.
//! Numbers are plain decimals here (no comma separator).

use tracing::debug;

use crate::types::{FormInput, ValidationResult};

/// Range rule for one trajectory value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Rule {
    NonNegative,
    Positive,
    Between(f64, f64),
}

impl Rule {
    fn check(self, x: f64, label: &str) -> Option<String> {
        match self {
            Self::NonNegative if x < 0.0 => {
                Some(format!("{label} must be greater than or equal to 0."))
            }
            Self::Positive if x <= 0.0 => Some(format!("{label} must be greater than 0.")),
            Self::Between(lo, hi) if !(lo..=hi).contains(&x) => {
                Some(format!("{label} must be between {lo} and {hi}."))
            }
            _ => None,
        }
    }
}

struct TrajectoryField {
    key: &'static str,
    label: &'static str,
    rule: Rule,
}

const fn tf(key: &'static str, label: &'static str, rule: Rule) -> TrajectoryField {
    TrajectoryField { key, label, rule }
}

const PLANNED: [TrajectoryField; 8] = [
    tf("kop_m", "KOP (m)", Rule::NonNegative),
    tf("tvd_planned_m", "Planned Well TVD (m)", Rule::Positive),
    tf("md_planned_m", "Planned Well MD (m)", Rule::Positive),
    tf("max_inc_planned_deg", "Planned Max Inc (deg)", Rule::Between(0.0, 180.0)),
    tf("azimuth_planned_deg", "Planned Azimuth (deg)", Rule::Between(0.0, 360.0)),
    tf("max_dls_planned_deg_per_30m", "Planned Max DLS (deg/30m)", Rule::NonNegative),
    tf("vs_planned_m", "Planned VS (m)", Rule::NonNegative),
    tf("dist_planned_m", "Planned Dist to Plan (m)", Rule::NonNegative),
];

const ACTUAL: [TrajectoryField; 7] = [
    tf("tvd_at_td_m", "Well TVD at TD (m)", Rule::Positive),
    tf("md_at_td_m", "Well MD at TD (m)", Rule::Positive),
    tf("inc_at_td_deg", "Inc at TD (deg)", Rule::Between(0.0, 180.0)),
    tf("azimuth_at_td_deg", "Azimuth at TD (deg)", Rule::Between(0.0, 360.0)),
    tf("max_dls_actual_deg_per_30m", "Max DLS (deg/30m)", Rule::NonNegative),
    tf("vs_at_td_m", "VS at TD (m)", Rule::NonNegative),
    tf("dist_at_td_m", "Dist to Plan at TD (m)", Rule::NonNegative),
];

/// Every key the trajectory step reads.
pub fn trajectory_keys() -> impl Iterator<Item = &'static str> {
    PLANNED.iter().chain(ACTUAL.iter()).map(|f| f.key)
}

fn number(input: &FormInput, key: &str) -> Option<f64> {
    let s = input.text(key);
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Range-check one group and return the parsed values in field order.
fn check_group(
    input: &FormInput,
    fields: &[TrajectoryField],
    required: bool,
    r: &mut ValidationResult,
) -> Vec<Option<f64>> {
    let mut values = Vec::with_capacity(fields.len());
    for f in fields {
        let present = !input.text(f.key).is_empty();
        if required && !present {
            r.add_field_error(f.key, format!("{} is required.", f.label));
        }
        let value = number(input, f.key);
        if present && value.is_none() {
            r.add_field_error(f.key, format!("{} must be a valid number.", f.label));
        }
        if let Some(msg) = value.and_then(|x| f.rule.check(x, f.label)) {
            r.add_field_error(f.key, msg);
        }
        values.push(value);
    }
    values
}

/// MD below TVD is geometrically impossible.
fn check_md_tvd(
    md: Option<f64>,
    tvd: Option<f64>,
    md_field: &TrajectoryField,
    tvd_field: &TrajectoryField,
    r: &mut ValidationResult,
) {
    if let (Some(md), Some(tvd)) = (md, tvd) {
        if md < tvd {
            r.add_field_error(
                md_field.key,
                format!(
                    "{} must be greater than or equal to {}.",
                    md_field.label, tvd_field.label
                ),
            );
        }
    }
}

pub fn validate_step2(input: &FormInput) -> ValidationResult {
    let mut r = ValidationResult::new();

    let planned = check_group(input, &PLANNED, true, &mut r);
    check_md_tvd(planned[2], planned[1], &PLANNED[2], &PLANNED[1], &mut r);

    let actual = check_group(input, &ACTUAL, false, &mut r);
    check_md_tvd(actual[1], actual[0], &ACTUAL[1], &ACTUAL[0], &mut r);

    debug!(ok = r.ok(), field_errors = r.field_errors().len(), "step 2 validated");
    r
}
