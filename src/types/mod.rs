//! Typed values crossing the engine boundary
//!
//! - `FormInput` / `RawValue`: raw form snapshot (coerce-or-reject at each field)
//! - `NozzleLine`: bit nozzle entries
//! - `TicketRow`: pass-through HSE tickets
//! - `ComputedFields`: derived values for read-only display boxes
//! - `ValidationResult` / `HoleSectionValidationResult`: validator outcomes

pub mod computed;
pub mod nozzle;
pub mod result;
pub mod ticket;
pub mod value;

pub use computed::{ComputedFields, ComputedValue};
pub use nozzle::{parse_nozzles, NozzleLine};
pub use result::{HoleSectionValidationResult, ValidationResult};
pub use ticket::{collect_ticket_rows, TicketRow, TICKET_LINES};
pub use value::{FormInput, InputError, RawValue};
