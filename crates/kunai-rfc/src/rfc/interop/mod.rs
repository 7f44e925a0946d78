//! Content-line interop for RECUR values.
//!
//! Many producers exchange recurrence rules as small content blocks rather
//! than bare values, e.g.
//!
//! ```text
//! DTSTART:20250101T090000Z
//! RRULE:FREQ=WEEKLY;INTERVAL=5;UNTIL=20250130T230000Z;BYDAY=MO,FR
//! ```
//!
//! This module locates the RECUR value in such content and produces it
//! again with an optional UTC start line.

mod content;

pub use content::{
    contains_secondly, extract_recur_value, format_content, parse_content, wrap_with_start,
};
