//! INFO: casing OD/ID pairing, casing shoe, mud type and section depths

use super::SectionAccumulator;
use crate::rules::fields::{require_choice, require_decimal, Minimum};
use crate::rules::options::{
    casing_id_options, casing_ids_for, CASING_OD_OPTIONS, MUD_TYPE_OPTIONS, OPEN_HOLE,
};
use crate::types::FormInput;

pub const KNOWN_KEYS: [&str; 6] = [
    "info_casing_od",
    "info_casing_id",
    "info_casing_shoe",
    "info_mud_type",
    "info_section_tvd",
    "info_section_md",
];

/// Whether `id` belongs to the IDs listed for `od`.
pub fn casing_pair_is_valid(od: &str, id: &str) -> bool {
    casing_ids_for(od).contains(&id)
}

/// An open hole has no casing, so no shoe depth to enter.
pub fn is_open_hole(od: &str, id: &str) -> bool {
    od == OPEN_HOLE && id == OPEN_HOLE
}

fn required_positive(
    input: &FormInput,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<f64> {
    let empty_msg = format!("{label} is required and must be greater than 0.");
    require_decimal(input.get(key), label, Minimum::Exclusive(0.0), Some(&empty_msg), errors)
}

pub fn validate(input: &FormInput, acc: &mut SectionAccumulator) {
    let errors = &mut acc.errors;

    let od = require_choice(input.get("info_casing_od"), CASING_OD_OPTIONS, "INFO / CASING OD", errors);
    let id = require_choice(input.get("info_casing_id"), casing_id_options(), "INFO / CASING ID", errors);

    let both_selected = !od.is_empty() && !id.is_empty();
    if both_selected && !casing_pair_is_valid(&od, &id) {
        errors.push("INFO / CASING ID is not valid for the selected CASING OD.".to_string());
    }

    let shoe = if both_selected && is_open_hole(&od, &id) {
        Some(0.0)
    } else {
        required_positive(input, "info_casing_shoe", "INFO / CASING SHOE (METER)", errors)
    };

    let mud_type = require_choice(input.get("info_mud_type"), MUD_TYPE_OPTIONS, "INFO / MUD TYPE", errors);
    let tvd = required_positive(input, "info_section_tvd", "INFO / SECTION TVD (METER)", errors);
    let md = required_positive(input, "info_section_md", "INFO / SECTION MD (METER)", errors);

    acc.set("info_casing_shoe", shoe);
    acc.set("info_mud_type", mud_type);
    acc.set("info_section_tvd", tvd);
    acc.set("info_section_md", md);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(od: &str, id: &str) -> FormInput {
        FormInput::new()
            .with("info_casing_od", od)
            .with("info_casing_id", id)
            .with("info_casing_shoe", "1250")
            .with("info_mud_type", "KCL-POLYMER")
            .with("info_section_tvd", "1800,5")
            .with("info_section_md", "1900")
    }

    fn run(input: &FormInput) -> SectionAccumulator {
        let mut acc = SectionAccumulator::new();
        validate(input, &mut acc);
        acc
    }

    #[test]
    fn test_valid_pair() {
        let acc = run(&info("7\"", "6.184\""));
        assert!(acc.errors.is_empty(), "{:?}", acc.errors);
        assert_eq!(acc.computed.number("info_casing_shoe"), Some(1250.0));
        assert_eq!(acc.computed.number("info_section_tvd"), Some(1800.5));
    }

    #[test]
    fn test_id_from_other_od_is_cross_field_error() {
        let acc = run(&info("7\"", "8.097\""));
        assert_eq!(acc.errors, vec!["INFO / CASING ID is not valid for the selected CASING OD."]);
    }

    #[test]
    fn test_open_hole_forces_zero_shoe() {
        let input = info(OPEN_HOLE, OPEN_HOLE).with("info_casing_shoe", "");
        let acc = run(&input);
        assert!(acc.errors.is_empty(), "{:?}", acc.errors);
        assert_eq!(acc.computed.number("info_casing_shoe"), Some(0.0));
    }

    #[test]
    fn test_shoe_must_be_positive() {
        let acc = run(&info("9.625\"", "8.835\"").with("info_casing_shoe", "0"));
        assert_eq!(acc.errors, vec!["INFO / CASING SHOE (METER) must be greater than 0.0."]);

        let acc = run(&info("9.625\"", "8.835\"").with("info_casing_shoe", " "));
        assert_eq!(
            acc.errors,
            vec!["INFO / CASING SHOE (METER) is required and must be greater than 0."]
        );
    }

    #[test]
    fn test_unknown_id_is_list_error_only() {
        let acc = run(&info("7\"", "6.000\""));
        assert_eq!(acc.errors, vec!["INFO / CASING ID must be selected from the list."]);
    }

    #[test]
    fn test_mud_type_is_case_sensitive() {
        let acc = run(&info("20\"", "18.730\"").with("info_mud_type", "kcl-polymer"));
        assert_eq!(acc.errors, vec!["INFO / MUD TYPE must be selected from the list."]);
    }
}
