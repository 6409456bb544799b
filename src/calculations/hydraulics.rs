//! Bit nozzle hydraulics

use super::CalcError;
use crate::types::NozzleLine;

/// Total Flow Area (in²) from nozzle lines sized in 32nds of an inch.
///
/// For each nozzle: `d = size / 32`, `area = π·d²/4`; total = Σ(area × count).
/// Lines with a non-positive count or size are ignored; if none remain the
/// list is rejected.
pub fn tfa_from_nozzles(lines: &[NozzleLine]) -> Result<f64, CalcError> {
    let mut valid = lines.iter().filter(|ln| ln.is_positive()).peekable();
    if valid.peek().is_none() {
        return Err(CalcError::EmptyNozzleList);
    }

    Ok(valid
        .map(|ln| {
            let d = ln.size_32nds as f64 / 32.0;
            let area = std::f64::consts::PI * d * d / 4.0;
            area * ln.count as f64
        })
        .sum())
}

/// Human-readable nozzle list in input order: `[(5,9), (1,10)]` -> `"5x9, 1x10"`.
pub fn nozzle_summary(lines: &[NozzleLine]) -> String {
    lines
        .iter()
        .filter(|ln| ln.is_positive())
        .map(|ln| format!("{}x{}", ln.count, ln.size_32nds))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_tfa_single_line() {
        // 3 x 12/32": 3 * π * 0.375² / 4
        let tfa = tfa_from_nozzles(&[NozzleLine::new(3, 12)]).unwrap();
        assert!(approx(tfa, 3.0 * std::f64::consts::PI * 0.375 * 0.375 / 4.0));
        assert!((tfa - 0.3313).abs() < 1e-4);
    }

    #[test]
    fn test_tfa_ignores_non_positive_lines() {
        let with_junk = [
            NozzleLine::new(5, 9),
            NozzleLine::new(0, 12),
            NozzleLine::new(2, -1),
            NozzleLine::new(1, 10),
        ];
        let clean = [NozzleLine::new(5, 9), NozzleLine::new(1, 10)];
        assert!(approx(
            tfa_from_nozzles(&with_junk).unwrap(),
            tfa_from_nozzles(&clean).unwrap()
        ));
    }

    #[test]
    fn test_tfa_empty_rejected() {
        assert_eq!(tfa_from_nozzles(&[]), Err(CalcError::EmptyNozzleList));
        assert_eq!(
            tfa_from_nozzles(&[NozzleLine::new(0, 0)]),
            Err(CalcError::EmptyNozzleList)
        );
    }

    #[test]
    fn test_tfa_monotonic_when_adding_lines() {
        let mut lines = vec![NozzleLine::new(1, 8)];
        let mut prev = tfa_from_nozzles(&lines).unwrap();
        for (count, size) in [(2, 10), (1, 1), (6, 16), (3, 9)] {
            lines.push(NozzleLine::new(count, size));
            let next = tfa_from_nozzles(&lines).unwrap();
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn test_nozzle_summary() {
        let lines = [NozzleLine::new(5, 9), NozzleLine::new(0, 11), NozzleLine::new(1, 10)];
        assert_eq!(nozzle_summary(&lines), "5x9, 1x10");
        assert_eq!(nozzle_summary(&[]), "");
    }
}
