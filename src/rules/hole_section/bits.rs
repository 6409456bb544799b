//! BIT-1 (required) and BIT-2 (optional)

use super::SectionAccumulator;
use crate::calculations::{nozzle_summary, tfa_from_nozzles};
use crate::rules::fields::{require_choice, require_text, text_of};
use crate::rules::options::{BIT_BRANDS, BIT_KINDS};
use crate::types::{parse_nozzles, FormInput, NozzleLine, RawValue};

const TEXT_MEMBERS: [&str; 5] = ["brand", "kind", "type", "iadc", "serial"];

/// Raw values of one bit group. Bit 1 falls back to the legacy `bit_*` keys.
#[derive(Debug, Clone)]
pub struct BitFields<'a> {
    pub brand: Option<&'a RawValue>,
    pub kind: Option<&'a RawValue>,
    pub bit_type: Option<&'a RawValue>,
    pub iadc: Option<&'a RawValue>,
    pub serial: Option<&'a RawValue>,
    pub nozzles: Vec<NozzleLine>,
}

impl<'a> BitFields<'a> {
    pub fn read(input: &'a FormInput, bit: u8) -> Self {
        let member = move |name: &str| -> Option<&'a RawValue> {
            let current = format!("bit{bit}_{name}");
            if bit == 1 {
                let legacy = format!("bit_{name}");
                input.pick_first(&[current.as_str(), legacy.as_str()])
            } else {
                input.get(&current)
            }
        };

        Self {
            brand: member("brand"),
            kind: member("kind"),
            bit_type: member("type"),
            iadc: member("iadc"),
            serial: member("serial"),
            nozzles: parse_nozzles(member("nozzles")),
        }
    }
}

/// Bit 2 switches on when any of its fields (or a nozzle line) is entered.
pub fn bit2_is_active(fields: &BitFields<'_>) -> bool {
    [fields.brand, fields.kind, fields.bit_type, fields.iadc, fields.serial]
        .into_iter()
        .any(|v| !text_of(v).is_empty())
        || !fields.nozzles.is_empty()
}

pub fn validate(input: &FormInput, acc: &mut SectionAccumulator) {
    let bit1 = BitFields::read(input, 1);
    validate_bit(1, bit1, acc);

    let bit2 = BitFields::read(input, 2);
    if bit2_is_active(&bit2) {
        if text_of(bit2.brand).is_empty() {
            acc.error("BIT-2 / BRAND is required when BIT-2 fields are provided.");
        }
        validate_bit(2, bit2, acc);
    } else {
        for name in TEXT_MEMBERS {
            acc.set(format!("bit2_{name}"), "");
        }
        acc.set("bit2_nozzles", bit2.nozzles);
    }
}

fn validate_bit(bit: u8, fields: BitFields<'_>, acc: &mut SectionAccumulator) {
    let prefix = format!("BIT-{bit}");
    let key = |name: &str| format!("bit{bit}_{name}");
    let errors = &mut acc.errors;

    let brand = require_choice(fields.brand, BIT_BRANDS, &format!("{prefix} / BRAND"), errors);
    let kind = require_choice(fields.kind, BIT_KINDS, &format!("{prefix} / PDC/TRICONE"), errors);
    let bit_type = require_text(fields.bit_type, &format!("{prefix} / TYPE"), errors);
    let iadc = text_of(fields.iadc);
    let serial = require_text(fields.serial, &format!("{prefix} / SERIAL"), errors);

    acc.set(key("brand"), brand);
    acc.set(key("kind"), kind);
    acc.set(key("type"), bit_type);
    acc.set(key("iadc"), iadc);
    acc.set(key("serial"), serial);

    if fields.nozzles.is_empty() {
        acc.error(format!(
            "{prefix} / NOZZLES are required. Please select nozzles to calculate TFA."
        ));
    } else {
        match tfa_from_nozzles(&fields.nozzles) {
            Ok(tfa) => acc.set(key("tfa_in2"), tfa),
            Err(_) => {
                acc.error(format!("{prefix} / NOZZLES are invalid. Please reselect nozzles."));
                acc.set(key("tfa_in2"), None::<f64>);
            }
        }
        acc.set(key("nozzle_summary"), nozzle_summary(&fields.nozzles));
    }

    acc.set(key("nozzles"), fields.nozzles);
}

pub(super) fn known_keys() -> Vec<String> {
    let mut keys = Vec::new();
    for name in TEXT_MEMBERS.into_iter().chain(["nozzles"]) {
        keys.push(format!("bit_{name}"));
        keys.push(format!("bit1_{name}"));
        keys.push(format!("bit2_{name}"));
    }
    keys
}
