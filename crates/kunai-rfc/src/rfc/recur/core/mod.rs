//! Recurrence rule core models (RFC 5545 §3.3.10).
//!
//! These types are designed for:
//! - Invariants by construction: SECONDLY and conflicting end conditions are
//!   not representable
//! - Round-trip fidelity: UNTIL remembers the textual shape it was read from
//! - Deterministic serialization: rule parts have one canonical order

mod end;
mod key;
mod rule;
mod weekday;

pub use end::{End, Until, UntilForm};
pub use key::RuleKey;
pub use rule::{Frequency, Month, RecurrenceRule};
pub use weekday::{Weekday, WeekdayNum};
