//! Bit nozzle lines

use serde::{Deserialize, Serialize};

use super::RawValue;

/// `count` nozzles of diameter `size_32nds / 32` inches.
///
/// Zero or negative lines are kept as entered; calculators skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NozzleLine {
    pub count: i64,
    pub size_32nds: i64,
}

impl NozzleLine {
    pub const fn new(count: i64, size_32nds: i64) -> Self {
        Self { count, size_32nds }
    }

    /// Both count and size are > 0, so the line contributes to TFA.
    pub const fn is_positive(&self) -> bool {
        self.count > 0 && self.size_32nds > 0
    }
}

/// Best-effort nozzle list from persisted or UI data.
///
/// Accepts a list whose items are nozzle lines, `[count, size]` pairs, or
/// records with `count` and `size_32nds` (or legacy `size`). Items that do not
/// coerce to integers are skipped; anything that is not a list yields no lines.
pub fn parse_nozzles(value: Option<&RawValue>) -> Vec<NozzleLine> {
    let Some(RawValue::List(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            RawValue::Nozzle(line) => Some(*line),
            RawValue::List(pair) if pair.len() == 2 => {
                Some(NozzleLine::new(pair[0].to_int()?, pair[1].to_int()?))
            }
            RawValue::Record(fields) => {
                let count = match fields.get("count") {
                    Some(v) => v.to_int()?,
                    None => 0,
                };
                let size = match fields.get("size_32nds").or_else(|| fields.get("size")) {
                    Some(v) => v.to_int()?,
                    None => 0,
                };
                Some(NozzleLine::new(count, size))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mixed_entries() {
        let raw = RawValue::from(json!([
            [5, 9],
            {"count": 1, "size_32nds": 10},
            {"count": "2", "size": 12},
            ["x", 9],
            "junk",
            {"count": null, "size_32nds": 9}
        ]));
        assert_eq!(
            parse_nozzles(Some(&raw)),
            vec![NozzleLine::new(5, 9), NozzleLine::new(1, 10), NozzleLine::new(2, 12)]
        );
    }

    #[test]
    fn test_parse_typed_lines() {
        let raw = RawValue::from(vec![NozzleLine::new(3, 14), NozzleLine::new(0, 0)]);
        assert_eq!(
            parse_nozzles(Some(&raw)),
            vec![NozzleLine::new(3, 14), NozzleLine::new(0, 0)]
        );
    }

    #[test]
    fn test_non_list_yields_nothing() {
        assert!(parse_nozzles(None).is_empty());
        assert!(parse_nozzles(Some(&RawValue::Null)).is_empty());
        assert!(parse_nozzles(Some(&RawValue::from("5x9"))).is_empty());
    }

    #[test]
    fn test_float_counts_truncate() {
        let raw = RawValue::from(json!([[5.9, 9.0]]));
        assert_eq!(parse_nozzles(Some(&raw)), vec![NozzleLine::new(5, 9)]);
    }
}
