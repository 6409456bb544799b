//! HSE ticket rows (pass-through, never validated)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FormInput, RawValue};
use crate::parsing::parse_decimal;

/// Number of ticket lines on the hole-section form.
pub const TICKET_LINES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRow {
    pub line_no: u32,
    pub ticket_date: Option<NaiveDate>,
    pub ticket_price_usd: Option<f64>,
}

fn loose_decimal(value: Option<&RawValue>) -> Option<f64> {
    value
        .filter(|v| !v.is_blank())
        .and_then(|v| parse_decimal(&v.as_text()).ok())
}

/// Collect ticket rows from a snapshot.
///
/// A persisted `tickets` list (records with `line_no`, `ticket_date`,
/// `ticket_price_usd`) takes precedence; otherwise the flat
/// `ticket_date_N` / `ticket_price_usd_N` form keys are read for each line.
/// Unparseable values become absent.
pub fn collect_ticket_rows(input: &FormInput) -> Vec<TicketRow> {
    if let Some(RawValue::List(items)) = input.get("tickets") {
        return items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| match item {
                RawValue::Record(fields) => Some(TicketRow {
                    line_no: fields
                        .get("line_no")
                        .and_then(RawValue::to_int)
                        .and_then(|n| u32::try_from(n).ok())
                        .unwrap_or(idx as u32 + 1),
                    ticket_date: fields.get("ticket_date").and_then(RawValue::as_date),
                    ticket_price_usd: loose_decimal(fields.get("ticket_price_usd")),
                }),
                _ => None,
            })
            .collect();
    }

    (1..=TICKET_LINES)
        .map(|line_no| TicketRow {
            line_no,
            ticket_date: input
                .get(&format!("ticket_date_{line_no}"))
                .and_then(RawValue::as_date),
            ticket_price_usd: loose_decimal(input.get(&format!("ticket_price_usd_{line_no}"))),
        })
        .collect()
}
