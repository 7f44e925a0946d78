//! UNTIL value resolution (RFC 5545 §3.3.10).
//!
//! Shapes are tried in order:
//! 1. `TZID=<zone>:YYYYMMDDTHHMMSS`: local time in the named zone
//! 2. `YYYYMMDDTHHMMSSZ`: UTC
//! 3. `YYYYMMDDTHHMMSS`: floating, local time in the default zone
//! 4. `YYYYMMDD`: local midnight in the default zone

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use super::error::{ParseError, ParseResult};
use super::lexer::strip_prefix_ignore_ascii_case;
use crate::rfc::recur::core::{Until, UntilForm};
use crate::rfc::recur::expand::{
    ConversionError, TimeZoneLookup, convert_to_utc, convert_to_utc_lenient,
};
use crate::rfc::recur::options::FormatOptions;

const TZID_PREFIX: &str = "TZID=";

/// Parses a DATE value (`YYYYMMDD`), checking it is a real calendar date.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = s[0..4].parse::<i32>().ok()?;
    let month = s[4..6].parse::<u32>().ok()?;
    let day = s[6..8].parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a TIME value without suffix (`HHMMSS`).
///
/// Leap seconds are rejected: an UNTIL bound must be a representable instant.
fn parse_time(s: &str) -> Option<NaiveTime> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour = s[0..2].parse::<u32>().ok()?;
    let minute = s[2..4].parse::<u32>().ok()?;
    let second = s[4..6].parse::<u32>().ok()?;

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Parses a local DATE-TIME (`YYYYMMDDTHHMMSS`).
fn parse_local_datetime(s: &str) -> Option<NaiveDateTime> {
    let date = s.get(..8)?;
    let separator = s.get(8..9)?;
    let time = s.get(9..)?;

    if !separator.eq_ignore_ascii_case("T") {
        return None;
    }

    Some(NaiveDateTime::new(parse_date(date)?, parse_time(time)?))
}

/// ## Summary
/// Resolves an UNTIL value to an absolute instant tagged with its shape.
///
/// Floating and date-only values are interpreted in `options.default_zone`;
/// TZID values are resolved through `lookup`. A local time in a DST gap is
/// rejected, except for date-only values, whose midnight moves forward.
///
/// ## Errors
/// Returns `UntilFormat` if the value matches no shape, has invalid calendar
/// fields, names an unknown zone or falls in a DST gap.
pub fn parse_until(
    value: &str,
    options: &FormatOptions,
    lookup: &dyn TimeZoneLookup,
) -> ParseResult<Until> {
    if let Some(rest) = strip_prefix_ignore_ascii_case(value, TZID_PREFIX) {
        return parse_zoned(value, rest, lookup);
    }

    if let Some(datetime) = value.strip_suffix(['Z', 'z']) {
        let local = parse_local_datetime(datetime)
            .ok_or_else(|| ParseError::until_format(value, "invalid UTC date-time"))?;
        return Ok(Until::utc(local.and_utc()));
    }

    if value.len() == 8 {
        let date = parse_date(value)
            .ok_or_else(|| ParseError::until_format(value, "invalid date"))?;
        let instant = convert_to_utc_lenient(date.and_time(NaiveTime::MIN), options.default_zone)
            .map_err(|err| conversion_error(value, &err))?;
        return Ok(Until::date(instant));
    }

    let local = parse_local_datetime(value)
        .ok_or_else(|| ParseError::until_format(value, "expected DATE or DATE-TIME"))?;
    let instant = localize(value, local, options.default_zone)?;
    Ok(Until::floating(instant))
}

/// Parses the remainder of a `TZID=<zone>:<local date-time>` value.
fn parse_zoned(value: &str, rest: &str, lookup: &dyn TimeZoneLookup) -> ParseResult<Until> {
    let (tzid, datetime) = rest
        .split_once(':')
        .ok_or_else(|| ParseError::until_format(value, "TZID without `:`"))?;

    let zone = lookup.resolve(tzid).ok_or_else(|| {
        tracing::debug!(tzid, "Unresolvable UNTIL timezone");
        ParseError::until_format(value, format!("unknown timezone `{tzid}`"))
    })?;

    let local = parse_local_datetime(datetime)
        .ok_or_else(|| ParseError::until_format(value, "invalid zoned date-time"))?;
    let instant = localize(value, local, zone)?;

    Ok(Until {
        instant,
        form: UntilForm::Zoned {
            tzid: tzid.to_string(),
            zone,
        },
    })
}

fn localize(value: &str, local: NaiveDateTime, zone: Tz) -> ParseResult<DateTime<Utc>> {
    convert_to_utc(local, zone).map_err(|err| conversion_error(value, &err))
}

fn conversion_error(value: &str, err: &ConversionError) -> ParseError {
    ParseError::until_format(value, err.to_string())
}
