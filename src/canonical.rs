//! Canonical text for identifier fields (well name, operator, province, rig, ...)
//!
//! Free text typed by operators is reduced to a restricted uppercase ASCII
//! alphabet so the same well/operator always compares equal:
//!
//! 1. Trim; empty input yields `""`
//! 2. Turkish dotted/dotless i folded before case mapping
//! 3. Diacritics stripped (NFKD, combining marks dropped)
//! 4. Uppercased
//! 5. `#`, `/`, `\` runs become a single `-`
//! 6. Whitespace runs collapsed
//! 7. Everything outside `[A-Z0-9 ._-]` removed
//! 8. Dash spacing normalized (`"A - B"` -> `"A-B"`)
//! 9. Dash runs collapsed
//!
//! The pipeline is idempotent: `canonical_text(canonical_text(x)) == canonical_text(x)`.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[#/\\]+").expect("separator pattern is valid"))
}

fn multi_space() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Z0-9 ._-]+").expect("allowed-set pattern is valid"))
}

fn multi_dash() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-{2,}").expect("dash pattern is valid"))
}

fn well_key_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*?)(-[0-9]+[A-Z0-9]*)$").expect("well key pattern is valid"))
}

/// Remove diacritics: `"Bülent"` -> `"Bulent"`.
fn strip_diacritics(text: &str) -> String {
    text.nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect()
}

/// Uppercase ASCII form of `text` (trim, Turkish i folding, diacritics removed).
pub fn to_ascii_upper(text: &str) -> String {
    let s = text.trim();
    if s.is_empty() {
        return String::new();
    }

    // Folded before uppercasing so the result does not depend on locale rules.
    let s = s
        .replace('ı', "i")
        .replace('İ', "I")
        .replace("i\u{307}", "i");

    strip_diacritics(&s).to_uppercase()
}

/// Canonical text for general identifier fields.
pub fn canonical_text(text: &str) -> String {
    let s = to_ascii_upper(text);
    if s.is_empty() {
        return s;
    }

    let s = separators().replace_all(&s, "-");
    let s = multi_space().replace_all(&s, " ");
    let s = disallowed().replace_all(s.trim(), "");
    // Deleting characters can leave two spaces side by side.
    let s = multi_space().replace_all(&s, " ");

    let s = s.replace(" - ", "-").replace("- ", "-").replace(" -", "-");
    let s = multi_dash().replace_all(&s, "-");

    s.trim().to_string()
}

/// Canonical well name. Currently identical to [`canonical_text`].
pub fn canonical_well_name(text: &str) -> String {
    canonical_text(text)
}

/// FIELD name derived from a well key: the key without its trailing
/// `-<digits>[A-Z0-9]*` suffix (`YAPRAKLI-4S` -> `YAPRAKLI`).
///
/// Keys without the suffix are returned canonicalized but otherwise unchanged.
pub fn derive_field_name_from_well_key(well_key: &str) -> String {
    let s = canonical_well_name(well_key);
    if s.is_empty() {
        return s;
    }

    match well_key_suffix().captures(&s) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        None => s,
    }
}

/// Whether a well key ends with `-<digits>[A-Z0-9]*` (e.g. `YAPRAKLI-4`, `YAPRAKLI-1K2`).
pub fn is_well_key_format_ok(well_key: &str) -> bool {
    let s = canonical_well_name(well_key);
    !s.is_empty() && well_key_suffix().is_match(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(canonical_text(""), "");
        assert_eq!(canonical_text("   \t "), "");
    }

    #[test]
    fn test_diacritics_and_turkish_i() {
        assert_eq!(canonical_text("Bülent"), "BULENT");
        assert_eq!(canonical_text("Diyarbakır"), "DIYARBAKIR");
        assert_eq!(canonical_text("İstanbul"), "ISTANBUL");
        assert_eq!(canonical_text("Şırnak Çağ"), "SIRNAK CAG");
    }

    #[test]
    fn test_separators_and_dashes() {
        assert_eq!(canonical_text("rig #12"), "RIG-12");
        assert_eq!(canonical_text("a/b\\c"), "A-B-C");
        assert_eq!(canonical_text("TPAO - BATMAN"), "TPAO-BATMAN");
        assert_eq!(canonical_text("A -- B"), "A-B");
        assert_eq!(canonical_text("A - / - B"), "A-B");
    }

    #[test]
    fn test_disallowed_removed() {
        assert_eq!(canonical_text("Well (1)!"), "WELL 1");
        assert_eq!(canonical_text("a.b_c"), "A.B_C");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  yaprakli - 4s ",
            "A @ B",
            "Bülent // Öz",
            "x -- - y",
            "--lead",
            "tail--",
            "çok   boşluk\t\tvar",
            "ß straße",
            "a - @ - b",
        ];
        for s in samples {
            let once = canonical_text(s);
            assert_eq!(canonical_text(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_well_name_alias() {
        assert_eq!(canonical_well_name("yaprakli-4"), canonical_text("yaprakli-4"));
    }

    #[test]
    fn test_derive_field_name() {
        assert_eq!(derive_field_name_from_well_key("YAPRAKLI-4S"), "YAPRAKLI");
        assert_eq!(derive_field_name_from_well_key("yaprakli-4"), "YAPRAKLI");
        assert_eq!(derive_field_name_from_well_key("NONAME"), "NONAME");
        assert_eq!(derive_field_name_from_well_key("WEST RAMAN-12ST"), "WEST RAMAN");
        assert_eq!(derive_field_name_from_well_key(""), "");
    }

    #[test]
    fn test_derive_field_name_multiple_dash_groups() {
        // Only the final suffix is stripped.
        assert_eq!(derive_field_name_from_well_key("A-1-2"), "A-1");
    }

    #[test]
    fn test_well_key_format() {
        assert!(is_well_key_format_ok("yaprakli-4"));
        assert!(is_well_key_format_ok("YAPRAKLI-4ST"));
        assert!(is_well_key_format_ok("YAPRAKLI-1K2"));
        assert!(!is_well_key_format_ok("yaprakli"));
        assert!(!is_well_key_format_ok("YAPRAKLI-S4"));
        assert!(!is_well_key_format_ok(""));
    }
}
