//! Stabilizer gauge conversion (whole + fraction inches -> decimal text)

use super::CalcError;

/// Gauge value meaning "without stabilizer".
pub const GAUGE_NONE_TOKEN: &str = "NONE";

/// Convert `whole numerator/denominator` inches to decimal text.
///
/// Three decimals with trailing zeros trimmed: `12 1/8` -> `"12.125"`,
/// `12 1/2` -> `"12.5"`, `12 0/1` -> `"12"`.
pub fn gauge_from_fraction(whole: u32, numerator: u32, denominator: u32) -> Result<String, CalcError> {
    if denominator == 0 {
        return Err(CalcError::ZeroDenominator);
    }
    let value = f64::from(whole) + f64::from(numerator) / f64::from(denominator);
    let fixed = format!("{value:.3}");
    Ok(fixed.trim_end_matches('0').trim_end_matches('.').to_string())
}

/// Whether a raw gauge entry is the "without stabilizer" token.
pub fn is_gauge_none_token(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(GAUGE_NONE_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_from_fraction() {
        assert_eq!(gauge_from_fraction(12, 1, 8).as_deref(), Ok("12.125"));
        assert_eq!(gauge_from_fraction(12, 1, 2).as_deref(), Ok("12.5"));
        assert_eq!(gauge_from_fraction(12, 0, 1).as_deref(), Ok("12"));
        assert_eq!(gauge_from_fraction(8, 3, 8).as_deref(), Ok("8.375"));
        assert_eq!(gauge_from_fraction(11, 7, 8).as_deref(), Ok("11.875"));
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(gauge_from_fraction(12, 1, 0), Err(CalcError::ZeroDenominator));
    }

    #[test]
    fn test_none_token() {
        assert!(is_gauge_none_token("NONE"));
        assert!(is_gauge_none_token(" none "));
        assert!(!is_gauge_none_token("12.125"));
        assert!(!is_gauge_none_token(""));
    }
}
