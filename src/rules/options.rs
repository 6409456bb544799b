//! Fixed option lists for the form combo boxes.
//!
//! Values are compared byte-for-byte after trimming; they are not
//! canonicalized and not configurable.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::Serialize;

pub const MUD_MOTOR_BRANDS: &[&str] = &[
    "NOV",
    "DYNOMAX",
    "SLB",
    "BAKER",
    "HALLIBURTON",
    "WEATHERFORD",
    "JEREH",
];

pub const MUD_MOTOR_SIZES: &[&str] = &[
    "9 5/8\" PDM",
    "9 1/2\" PDM",
    "8\" PDM",
    "7\" PDM",
    "6 3/4\" PDM",
    "5\" PDM",
    "4 3/4\" PDM",
];

/// Bend angles in degrees; `ZERO` is the straight-motor entry.
pub const BEND_ANGLES_DEG: &[&str] = &[
    "ZERO", "0.39", "0.78", "1.15", "1.50", "1.83", "2.12", "2.38", "2.60", "2.77", "2.89",
    "2.97", "3.00",
];

pub const LOBE_LIST: &[&str] = &["1/2", "2/3", "3/4", "4/5", "5/6", "6/7", "7/8", "8/9"];

pub const STAGE_LIST: &[&str] = &["2", "3", "4", "5", "6", "7", "8", "8.3"];

pub const BIT_BRANDS: &[&str] = &[
    "NOV",
    "SMITH",
    "BAKER",
    "HALLIBURTON",
    "WEATHERFORD",
    "ULTERA",
    "DBC",
    "VAREL",
    "NOVEL",
    "TECH DRILL",
    "DRILL STAR",
    "MATRIX",
    "TITAN",
    "GATES",
    "EASTERN",
    "LIBERTY",
];

pub const BIT_KINDS: &[&str] = &["PDC", "TRICONE", "BICENTER"];

pub const OPEN_HOLE: &str = "OPEN HOLE";

pub const CASING_OD_OPTIONS: &[&str] = &[
    OPEN_HOLE,
    "7\"",
    "8.625\"",
    "9.625\"",
    "10.750\"",
    "11.750\"",
    "13.375\"",
    "16\"",
    "20\"",
];

/// Allowed casing IDs per OD.
pub const CASING_ID_BY_OD: &[(&str, &[&str])] = &[
    (OPEN_HOLE, &[OPEN_HOLE]),
    ("7\"", &["6.184\"", "6.276\"", "6.366\""]),
    ("8.625\"", &["7.921\"", "8.097\""]),
    ("9.625\"", &["8.755\"", "8.835\"", "8.921\""]),
    ("10.750\"", &["9.660\"", "9.850\""]),
    ("11.750\"", &["10.772\"", "10.920\""]),
    ("13.375\"", &["12.100\"", "12.347\""]),
    ("16\"", &["14.868\"", "15.124\""]),
    ("20\"", &["18.730\""]),
];

pub const MUD_TYPE_OPTIONS: &[&str] = &[
    "AIR",
    "AERATED",
    "BENTONITE",
    "CaCl2 POLYMER",
    "FOAM",
    "GEL",
    "HIGH-TEMPERATURE GEOTHERMAL",
    "KCL-POLYMER",
    "LIGNOSULFONATE",
    "NaCl POLYMER",
    "OIL BASE",
    "PHPA",
    "POLYMER",
    "SPUD",
    "SYNTHETIC BASE",
];

pub const WELL_TYPES: &[&str] = &["OIL", "GAS", "GEOTHERMAL", "CARBON_DIOXIDE", "OTHER"];

/// Directional well type that makes MUD MOTOR-1 optional.
pub const ONLY_INCLINATION: &str = "ONLY INCLINATION";

pub const DD_WELL_TYPES: &[&str] = &[
    "VERTICAL",
    "J-TYPE",
    "S-TYPE",
    "SIDE-TRACK",
    "HORIZONTAL",
    ONLY_INCLINATION,
];

/// IDs allowed for an OD; empty for an unknown OD.
pub fn casing_ids_for(od: &str) -> &'static [&'static str] {
    CASING_ID_BY_OD
        .iter()
        .find(|(k, _)| *k == od)
        .map(|(_, ids)| *ids)
        .unwrap_or(&[])
}

/// Sorted union of every casing ID across all ODs.
pub fn casing_id_options() -> &'static [&'static str] {
    static OPTIONS: OnceLock<Vec<&'static str>> = OnceLock::new();
    OPTIONS.get_or_init(|| {
        CASING_ID_BY_OD
            .iter()
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    })
}

// ============================================================================
// Catalog
// ============================================================================

/// Every list above, keyed the way the form's combo boxes consume them.
#[derive(Debug, Clone, Serialize)]
pub struct OptionCatalog {
    pub well_types: &'static [&'static str],
    pub dd_well_types: &'static [&'static str],
    pub mud_motor_brands: &'static [&'static str],
    pub mud_motor_sizes: &'static [&'static str],
    pub bend_angles_deg: &'static [&'static str],
    pub lobes: &'static [&'static str],
    pub stages: &'static [&'static str],
    pub bit_brands: &'static [&'static str],
    pub bit_kinds: &'static [&'static str],
    pub casing_od: &'static [&'static str],
    pub casing_id: &'static [&'static str],
    pub casing_id_by_od: BTreeMap<&'static str, &'static [&'static str]>,
    pub mud_types: &'static [&'static str],
}

pub fn option_catalog() -> OptionCatalog {
    OptionCatalog {
        well_types: WELL_TYPES,
        dd_well_types: DD_WELL_TYPES,
        mud_motor_brands: MUD_MOTOR_BRANDS,
        mud_motor_sizes: MUD_MOTOR_SIZES,
        bend_angles_deg: BEND_ANGLES_DEG,
        lobes: LOBE_LIST,
        stages: STAGE_LIST,
        bit_brands: BIT_BRANDS,
        bit_kinds: BIT_KINDS,
        casing_od: CASING_OD_OPTIONS,
        casing_id: casing_id_options(),
        casing_id_by_od: CASING_ID_BY_OD.iter().copied().collect(),
        mud_types: MUD_TYPE_OPTIONS,
    }
}
