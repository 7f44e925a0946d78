//! RECUR value serialization (RFC 5545).
//!
//! - Fold: content line folding at 75 octets
//! - Values: per-part value formatting
//! - Serializer: canonical rule part ordering

mod fold;
mod serializer;
mod values;

pub use fold::fold_line;
pub use serializer::serialize_rrule;
pub use values::{format_list, format_until};
