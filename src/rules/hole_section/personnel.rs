//! PERSONNEL: no single slot is required, but at least one must be filled

use super::SectionAccumulator;
use crate::types::FormInput;

/// Day/night DD and MWD slots, three names each.
pub const PERSONNEL_KEYS: [&str; 12] = [
    "personnel_day_dd_1",
    "personnel_day_dd_2",
    "personnel_day_dd_3",
    "personnel_night_dd_1",
    "personnel_night_dd_2",
    "personnel_night_dd_3",
    "personnel_day_mwd_1",
    "personnel_day_mwd_2",
    "personnel_day_mwd_3",
    "personnel_night_mwd_1",
    "personnel_night_mwd_2",
    "personnel_night_mwd_3",
];

pub fn any_assigned(input: &FormInput) -> bool {
    PERSONNEL_KEYS.iter().any(|k| !input.text(k).is_empty())
}

pub fn validate(input: &FormInput, acc: &mut SectionAccumulator) {
    if !any_assigned(input) {
        acc.error("PERSONNEL: At least one of DAY DD, NIGHT DD, DAY MWD, NIGHT MWD must be provided.");
    }
    for key in PERSONNEL_KEYS {
        acc.set(key, input.text(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_name_is_enough() {
        let input = FormInput::new().with("personnel_night_mwd_2", " Ali Veli ");
        let mut acc = SectionAccumulator::new();
        validate(&input, &mut acc);
        assert!(acc.errors.is_empty());
        assert_eq!(acc.computed.text("personnel_night_mwd_2"), Some("Ali Veli"));
        assert_eq!(acc.computed.text("personnel_day_dd_1"), Some(""));
        assert_eq!(acc.computed.len(), 12);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let input = FormInput::new().with("personnel_day_dd_1", "   ");
        assert!(!any_assigned(&input));
        let mut acc = SectionAccumulator::new();
        validate(&input, &mut acc);
        assert_eq!(acc.errors.len(), 1);
        assert!(acc.errors[0].starts_with("PERSONNEL:"));
    }
}
