//! Time zone resolution and the hand-off to occurrence expansion.
//!
//! This crate never enumerates occurrences itself. [`handoff`] turns a
//! validated rule into the `rrule` crate's representation so an expansion
//! engine can take over.

pub mod handoff;
mod timezone;

pub use handoff::to_rrule;
pub use timezone::{
    ConversionError, TimeZoneLookup, TimeZoneResolver, convert_to_utc, convert_to_utc_lenient,
};
