/// Content-line names shared across crates
pub const RRULE_PROPERTY: &str = "RRULE";
pub const RRULE_PREFIX: &str = const_str::concat!(RRULE_PROPERTY, ":");

pub const DTSTART_PROPERTY: &str = "DTSTART";
pub const DTSTART_PREFIX: &str = const_str::concat!(DTSTART_PROPERTY, ":");

/// RFC 5545 §3.1: content lines SHOULD NOT be longer than 75 octets.
pub const MAX_LINE_OCTETS: usize = 75;

/// Separator inserted between folded segments.
pub const FOLD_CONTINUATION: &str = "\r\n ";

/// Zone used for floating and date-only UNTIL values when nothing is configured.
pub const DEFAULT_ZONE: &str = "UTC";

pub const DEFAULT_LOG_LEVEL: &str = "info";
