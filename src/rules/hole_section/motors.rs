//! MUD MOTOR-1 (required unless ONLY INCLINATION) and MUD MOTOR-2 (optional)

use tracing::debug;

use super::SectionAccumulator;
use crate::calculations::is_gauge_none_token;
use crate::rules::fields::{
    has_content, is_blank, optional_decimal, require_choice, require_decimal, Minimum,
};
use crate::rules::options::{
    BEND_ANGLES_DEG, LOBE_LIST, MUD_MOTOR_BRANDS, MUD_MOTOR_SIZES, ONLY_INCLINATION, STAGE_LIST,
};
use crate::types::{FormInput, RawValue};

const MEMBERS: [&str; 7] = [
    "brand",
    "size",
    "sleeve_stb_gauge_in",
    "bend_angle_deg",
    "lobe",
    "stage",
    "ibs_gauge_in",
];

/// Raw values of one motor group.
///
/// Motor 1 falls back to the legacy `mud_motor_*` keys.
#[derive(Debug, Clone, Copy)]
pub struct MotorFields<'a> {
    pub brand: Option<&'a RawValue>,
    pub size: Option<&'a RawValue>,
    pub sleeve_gauge: Option<&'a RawValue>,
    pub bend_angle: Option<&'a RawValue>,
    pub lobe: Option<&'a RawValue>,
    pub stage: Option<&'a RawValue>,
    pub ibs_gauge: Option<&'a RawValue>,
    /// "Without sleeve stabilizer" checkbox.
    pub sleeve_none: bool,
    /// "Without IBS" checkbox.
    pub ibs_none: bool,
}

impl<'a> MotorFields<'a> {
    pub fn read(input: &'a FormInput, motor: u8) -> Self {
        let member = move |name: &str| -> Option<&'a RawValue> {
            let current = format!("mud_motor{motor}_{name}");
            if motor == 1 {
                let legacy = format!("mud_motor_{name}");
                input.pick_first(&[current.as_str(), legacy.as_str()])
            } else {
                input.get(&current)
            }
        };
        let flag = move |name: &str| {
            input
                .get(&format!("mud_motor{motor}_{name}"))
                .is_some_and(RawValue::as_flag)
        };

        Self {
            brand: member("brand"),
            size: member("size"),
            sleeve_gauge: member("sleeve_stb_gauge_in"),
            bend_angle: member("bend_angle_deg"),
            lobe: member("lobe"),
            stage: member("stage"),
            ibs_gauge: member("ibs_gauge_in"),
            sleeve_none: flag("sleeve_none"),
            ibs_none: flag("ibs_none"),
        }
    }

    fn values(&self) -> [Option<&'a RawValue>; 7] {
        [
            self.brand,
            self.size,
            self.sleeve_gauge,
            self.bend_angle,
            self.lobe,
            self.stage,
            self.ibs_gauge,
        ]
    }

    pub fn all_blank(&self) -> bool {
        self.values().into_iter().all(is_blank)
    }

    pub fn any_content(&self) -> bool {
        self.values().into_iter().any(has_content)
    }
}

/// Motor 1 may be left empty only on ONLY INCLINATION wells.
pub fn motor1_is_active(fields: &MotorFields<'_>, dd_well_type: &str) -> bool {
    !(dd_well_type == ONLY_INCLINATION && fields.all_blank())
}

/// Motor 2 switches on as soon as any of its fields has content.
pub fn motor2_is_active(fields: &MotorFields<'_>) -> bool {
    fields.any_content()
}

pub fn validate(input: &FormInput, acc: &mut SectionAccumulator) {
    let dd_well_type = input.text("dd_well_type");

    let motor1 = MotorFields::read(input, 1);
    if motor1_is_active(&motor1, &dd_well_type) {
        validate_motor(1, &motor1, acc);
    } else {
        debug!("mud motor 1 left empty on ONLY INCLINATION well");
        fill_placeholders(1, acc);
    }

    let motor2 = MotorFields::read(input, 2);
    if motor2_is_active(&motor2) {
        if !has_content(motor2.brand) {
            acc.error("MUD MOTOR-2 / BRAND is required when MUD MOTOR-2 fields are provided.");
        }
        validate_motor(2, &motor2, acc);
    } else {
        fill_placeholders(2, acc);
    }
}

/// Gauge in inches, `None` when the motor runs without that stabilizer.
fn gauge(
    raw: Option<&RawValue>,
    none_fitted: bool,
    label: &str,
    required: bool,
    errors: &mut Vec<String>,
) -> Option<f64> {
    if none_fitted || raw.is_some_and(|v| is_gauge_none_token(&v.as_text())) {
        return None;
    }
    if required {
        let empty_msg = format!("{label} is required (e.g., 12.125).");
        require_decimal(raw, label, Minimum::Unbounded, Some(&empty_msg), errors)
    } else {
        optional_decimal(raw, label, errors)
    }
}

fn validate_motor(motor: u8, fields: &MotorFields<'_>, acc: &mut SectionAccumulator) {
    let prefix = format!("MUD MOTOR-{motor}");
    let key = |name: &str| format!("mud_motor{motor}_{name}");
    let errors = &mut acc.errors;

    let brand = require_choice(fields.brand, MUD_MOTOR_BRANDS, &format!("{prefix} / BRAND"), errors);
    let size = require_choice(fields.size, MUD_MOTOR_SIZES, &format!("{prefix} / SIZE"), errors);
    let sleeve = gauge(
        fields.sleeve_gauge,
        fields.sleeve_none,
        &format!("{prefix} / SLEEVE STB GAUGE (IN)"),
        true,
        errors,
    );
    let bend = require_choice(
        fields.bend_angle,
        BEND_ANGLES_DEG,
        &format!("{prefix} / BEND ANGLE (DEG)"),
        errors,
    );
    let lobe = require_choice(fields.lobe, LOBE_LIST, &format!("{prefix} / LOBE"), errors);
    let stage = require_choice(fields.stage, STAGE_LIST, &format!("{prefix} / STAGE"), errors);
    let ibs = gauge(
        fields.ibs_gauge,
        fields.ibs_none,
        &format!("{prefix} / IBS GAUGE (IN)"),
        false,
        errors,
    );

    acc.set(key("brand"), brand);
    acc.set(key("size"), size);
    acc.set(key("sleeve_stb_gauge_in"), sleeve);
    acc.set(key("bend_angle_deg"), bend);
    acc.set(key("lobe"), lobe);
    acc.set(key("stage"), stage);
    acc.set(key("ibs_gauge_in"), ibs);
}

fn fill_placeholders(motor: u8, acc: &mut SectionAccumulator) {
    for name in MEMBERS {
        let key = format!("mud_motor{motor}_{name}");
        if name.ends_with("_gauge_in") {
            acc.set(key, None::<f64>);
        } else {
            acc.set(key, "");
        }
    }
}

pub(super) fn known_keys() -> Vec<String> {
    let mut keys = vec!["dd_well_type".to_string()];
    for name in MEMBERS {
        keys.push(format!("mud_motor_{name}"));
        for motor in 1..=2 {
            keys.push(format!("mud_motor{motor}_{name}"));
        }
    }
    for motor in 1..=2 {
        keys.push(format!("mud_motor{motor}_sleeve_none"));
        keys.push(format!("mud_motor{motor}_ibs_none"));
    }
    keys
}
