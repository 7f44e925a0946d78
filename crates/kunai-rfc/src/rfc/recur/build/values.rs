//! Rule part value formatters.

use std::fmt::Display;

use crate::rfc::recur::core::{Until, UntilForm};
use crate::rfc::recur::options::FormatOptions;

const DATE_FORMAT: &str = "%Y%m%d";
const LOCAL_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const UTC_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Joins list entries with `,`. Returns `None` for an empty list so the part
/// is omitted rather than written as `KEY=`.
#[must_use]
pub fn format_list<T: Display>(items: &[T]) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    Some(
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Formats an UNTIL bound in the shape it was read from.
///
/// Floating and date-only values are rendered in `options.default_zone`.
#[must_use]
pub fn format_until(until: &Until, options: &FormatOptions) -> String {
    match &until.form {
        UntilForm::Utc => until.instant.format(UTC_DATETIME_FORMAT).to_string(),
        UntilForm::Zoned { tzid, zone } => format!(
            "TZID={tzid}:{}",
            until.instant.with_timezone(zone).format(LOCAL_DATETIME_FORMAT)
        ),
        UntilForm::Floating => until
            .instant
            .with_timezone(&options.default_zone)
            .format(LOCAL_DATETIME_FORMAT)
            .to_string(),
        UntilForm::Date => until
            .instant
            .with_timezone(&options.default_zone)
            .format(DATE_FORMAT)
            .to_string(),
    }
}
