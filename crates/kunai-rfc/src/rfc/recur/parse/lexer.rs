//! Line normalization and rule part splitting (RFC 5545 §3.1, §3.3.10).

use super::error::{ParseError, ParseResult};
use crate::rfc::recur::core::RuleKey;

/// Unfolds a content line by removing CRLF or bare LF followed by a single
/// SPACE or HTAB.
///
/// Line breaks that are not followed by whitespace are kept as-is. Applying
/// this to already-unfolded text is a no-op.
#[must_use]
pub fn unfold(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let marker_len = match &bytes[i..] {
            [b'\r', b'\n', b' ' | b'\t', ..] => 3,
            [b'\n', b' ' | b'\t', ..] => 2,
            _ => 0,
        };

        if marker_len == 0 {
            i += 1;
        } else {
            // Markers are ASCII, so `i` is always a char boundary
            result.push_str(&input[start..i]);
            i += marker_len;
            start = i;
        }
    }

    result.push_str(&input[start..]);
    result
}

/// One `KEY=VALUE` rule part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulePart<'a> {
    pub key: RuleKey,
    /// Raw value text, not yet validated.
    pub value: &'a str,
}

/// Splits a logical line into rule parts.
///
/// Keys are matched case-insensitively against the recognized set; order is
/// not significant.
///
/// ## Errors
/// Returns a structural error for empty input, a part without `=`, an
/// unrecognized key, or a key that appears more than once.
pub fn split_parts(line: &str) -> ParseResult<Vec<RulePart<'_>>> {
    if line.is_empty() {
        return Err(ParseError::structural("empty recurrence rule"));
    }

    let mut parts: Vec<RulePart<'_>> = Vec::with_capacity(RuleKey::ALL.len());

    for raw in line.split(';') {
        let (name, value) = raw.split_once('=').ok_or_else(|| {
            ParseError::structural(format!("rule part `{raw}` has no `=`")).with_value(raw)
        })?;

        let key = RuleKey::parse(name).ok_or_else(|| {
            ParseError::structural(format!("unknown rule part `{name}`")).with_value(name)
        })?;

        if parts.iter().any(|part| part.key == key) {
            return Err(
                ParseError::structural(format!("duplicate rule part {key}")).with_key(key)
            );
        }

        tracing::trace!(%key, value, "Split rule part");
        parts.push(RulePart { key, value });
    }

    Ok(parts)
}

/// Strips `prefix` from the start of `s`, comparing ASCII case-insensitively.
#[must_use]
pub fn strip_prefix_ignore_ascii_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}
