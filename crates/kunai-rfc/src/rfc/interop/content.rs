//! `DTSTART` / `RRULE:` content handling.

use chrono::{DateTime, Utc};
use kunai_core::constants::{DTSTART_PREFIX, RRULE_PREFIX};

use crate::rfc::recur::build::{fold_line, serialize_rrule};
use crate::rfc::recur::core::RecurrenceRule;
use crate::rfc::recur::expand::TimeZoneLookup;
use crate::rfc::recur::options::FormatOptions;
use crate::rfc::recur::parse::{
    ParseError, ParseResult, parse_rrule, strip_prefix_ignore_ascii_case,
};

const FREQ_PREFIX: &str = "FREQ=";
const SECONDLY_PART: &str = "FREQ=SECONDLY";
const DTSTART_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// ## Summary
/// Locates the RECUR value in a bare value or a content block.
///
/// Text starting with `FREQ=` is returned as is (trimmed). Otherwise the
/// first line starting with `RRULE:` is used and the rest of that logical
/// line, including folded continuations, is returned trimmed. Matching is
/// ASCII case-insensitive.
#[must_use]
pub fn extract_recur_value(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if strip_prefix_ignore_ascii_case(trimmed, FREQ_PREFIX).is_some() {
        return Some(trimmed);
    }

    let mut offset = 0;
    for line in trimmed.split_inclusive('\n') {
        if strip_prefix_ignore_ascii_case(line, RRULE_PREFIX).is_some() {
            let rest = &trimmed[offset + RRULE_PREFIX.len()..];
            let value = logical_line(rest).trim();
            return (!value.is_empty()).then_some(value);
        }
        offset += line.len();
    }

    None
}

/// Cuts `text` at the first line break that is not followed by a fold.
fn logical_line(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(pos) = text[search_from..].find('\n') {
        let newline = search_from + pos;
        match bytes.get(newline + 1) {
            Some(b' ' | b'\t') => search_from = newline + 1,
            _ => return &text[..newline],
        }
    }

    text
}

/// Returns whether the value in `text` (or `text` itself, if no value can be
/// located) declares `FREQ=SECONDLY`.
#[must_use]
pub fn contains_secondly(text: &str) -> bool {
    extract_recur_value(text)
        .unwrap_or(text)
        .to_ascii_uppercase()
        .contains(SECONDLY_PART)
}

/// ## Summary
/// Parses the RECUR value found in a bare value or content block.
///
/// ## Errors
/// Returns `NoRecurValueFound` if no value can be located, otherwise any
/// error from [`parse_rrule`] (SECONDLY surfaces as `UnsupportedFrequency`).
#[tracing::instrument(skip(text, options, lookup), fields(input_len = text.len()))]
pub fn parse_content(
    text: &str,
    options: &FormatOptions,
    lookup: &dyn TimeZoneLookup,
) -> ParseResult<RecurrenceRule> {
    let Some(value) = extract_recur_value(text) else {
        tracing::warn!("No RRULE value in content");
        return Err(ParseError::no_recur_value());
    };

    parse_rrule(value, options, lookup)
}

/// Prefixes a RECUR value with `RRULE:`, preceded by a UTC `DTSTART` line
/// when `start` is given. Lines are separated by `\n`.
#[must_use]
pub fn wrap_with_start(value: &str, start: Option<DateTime<Utc>>) -> String {
    with_start_line(format!("{RRULE_PREFIX}{value}"), start)
}

/// ## Summary
/// Serializes a rule as a content block: an optional `DTSTART` line and an
/// `RRULE:` line.
///
/// With `options.fold_output_lines`, the whole `RRULE:` line is folded so
/// that no segment exceeds 75 octets including the property name.
#[must_use]
#[tracing::instrument(skip(rule, options), fields(frequency = %rule.frequency))]
pub fn format_content(
    rule: &RecurrenceRule,
    start: Option<DateTime<Utc>>,
    options: &FormatOptions,
) -> String {
    let value = serialize_rrule(rule, &options.with_folding(false));
    let line = format!("{RRULE_PREFIX}{value}");

    if options.fold_output_lines {
        with_start_line(fold_line(&line), start)
    } else {
        with_start_line(line, start)
    }
}

fn with_start_line(rrule_line: String, start: Option<DateTime<Utc>>) -> String {
    match start {
        Some(start) => format!(
            "{DTSTART_PREFIX}{}\n{rrule_line}",
            start.format(DTSTART_FORMAT)
        ),
        None => rrule_line,
    }
}
