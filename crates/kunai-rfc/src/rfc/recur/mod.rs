//! Recurrence rule implementation (RFC 5545 §3.3.10).
//!
//! This module converts RECUR values (the value of an `RRULE` property)
//! to and from a structured [`RecurrenceRule`].
//!
//! ## Overview
//!
//! A rule has exactly one frequency, an interval, an optional end condition
//! (COUNT or UNTIL, never both) and a set of BY* filters. SECONDLY rules are
//! rejected. Occurrence expansion is out of scope here; see [`expand`] for
//! the hand-off to the `rrule` crate.
//!
//! ## Usage
//!
//! ### Parsing
//!
//! ```rust
//! use kunai_rfc::rfc::recur::{Frequency, RecurrenceRule};
//!
//! let rule: RecurrenceRule = "FREQ=MONTHLY;BYDAY=-1FR;COUNT=3".parse().unwrap();
//! assert_eq!(rule.frequency, Frequency::Monthly);
//! assert_eq!(rule.count(), Some(3));
//! ```
//!
//! ### Serializing
//!
//! ```rust
//! use kunai_rfc::rfc::recur::{
//!     FormatOptions, Frequency, RecurrenceRule, Weekday, WeekdayNum, serialize_rrule,
//! };
//!
//! let rule = RecurrenceRule::new(Frequency::Weekly)
//!     .with_interval(2)
//!     .with_weekdays([WeekdayNum::every(Weekday::Tuesday)]);
//!
//! let output = serialize_rrule(&rule, &FormatOptions::default());
//! assert_eq!(output, "FREQ=WEEKLY;INTERVAL=2;BYDAY=TU");
//! ```
//!
//! ## Round-Trip Fidelity
//!
//! UNTIL remembers whether it was written as a date, a UTC date-time, a
//! floating date-time or a `TZID=` date-time, and is written back the same
//! way. Serialization uses canonical part ordering.
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`RecurrenceRule`, `Frequency`, `WeekdayNum`, etc.)
//! - [`parse`] - Parsing functions and error types
//! - [`build`] - Serialization functions
//! - [`expand`] - Timezone resolution and `rrule` hand-off
//! - [`options`] - Per-call formatting options

pub mod build;
pub mod core;
pub mod expand;
pub mod options;
pub mod parse;


// Re-export commonly used types
pub use build::serialize_rrule;
pub use core::{
    End, Frequency, Month, RecurrenceRule, RuleKey, Until, UntilForm, Weekday, WeekdayNum,
};
pub use expand::{TimeZoneLookup, TimeZoneResolver, to_rrule};
pub use options::FormatOptions;
pub use parse::{ParseError, ParseErrorKind, ParseResult, parse_rrule};
