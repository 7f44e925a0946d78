//! RECUR value parsing (RFC 5545 §3.3.10).

mod error;
mod lexer;
mod parser;
mod until;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{RulePart, split_parts, strip_prefix_ignore_ascii_case, unfold};
pub use parser::parse_rrule;
pub use until::parse_until;
pub use values::{
    FieldRange, parse_byday, parse_frequency, parse_integer_list, parse_months, parse_positive,
    parse_week_start,
};
