//! ## Summary
//! Range validation for constructed recurrence rules.
//!
//! RFC 5545 §3.3.10 bounds every numeric rule part. A rule produced by the
//! parser always satisfies these bounds; a rule built field by field may not.
//! UNTIL is also checked against its textual shape, so that serializing a
//! valid rule always yields text that parses back to the same rule.

use std::fmt::Display;

use chrono::{Datelike, NaiveTime};
use chrono_tz::Tz;

use crate::rfc::recur::build::format_until;
use crate::rfc::recur::core::{End, RecurrenceRule, RuleKey, Until, UntilForm};
use crate::rfc::recur::expand::{convert_to_utc, convert_to_utc_lenient};
use crate::rfc::recur::options::FormatOptions;
use crate::rfc::recur::parse::{FieldRange, ParseError, ParseResult};

/// DATE and DATE-TIME values carry a four-digit year.
const MAX_UNTIL_YEAR: i32 = 9999;

/// ## Summary
/// Checks a rule against the RFC 5545 ranges, reporting the first violation.
///
/// Floating and date-only UNTIL values are checked in `options.default_zone`,
/// the zone they are written in.
///
/// ## Errors
/// Returns a `FieldRange` error naming the offending key and value if the
/// interval or count is zero, a BY* entry is out of range, or a BYDAY
/// ordinal is zero or beyond ±53. Returns `UntilFormat` if the UNTIL instant
/// cannot be written in its shape: fractional seconds, a year outside
/// `0..=9999`, a date-only bound that is not local midnight, or a local time
/// that reads back as a different instant.
pub fn validate_rule(rule: &RecurrenceRule, options: &FormatOptions) -> ParseResult<()> {
    if rule.interval == 0 {
        return Err(ParseError::field_range(RuleKey::Interval, "0"));
    }

    match &rule.end {
        End::AfterOccurrences(0) => return Err(ParseError::field_range(RuleKey::Count, "0")),
        End::AfterInstant(until) => check_until(until, options)?,
        End::Never | End::AfterOccurrences(_) => {}
    }

    check_list(RuleKey::BySecond, &rule.seconds)?;
    check_list(RuleKey::ByMinute, &rule.minutes)?;
    check_list(RuleKey::ByHour, &rule.hours)?;
    check_list(RuleKey::ByMonthDay, &rule.days_of_the_month)?;
    check_list(RuleKey::ByYearDay, &rule.days_of_the_year)?;
    check_list(RuleKey::ByWeekNo, &rule.weeks)?;
    check_list(RuleKey::BySetPos, &rule.set_positions)?;

    for weekday in &rule.weekdays {
        if let Some(ordinal) = weekday.ordinal
            && !FieldRange::WEEKDAY_ORDINAL.contains(i32::from(ordinal))
        {
            return Err(ParseError::field_range(RuleKey::ByDay, &weekday.to_string()));
        }
    }

    Ok(())
}

/// Checks that `until` reads back as the same instant once written.
fn check_until(until: &Until, options: &FormatOptions) -> ParseResult<()> {
    let reject = |message: &str| ParseError::until_format(&format_until(until, options), message);

    if until.instant.timestamp_subsec_nanos() != 0 {
        return Err(reject("UNTIL cannot carry fractional seconds"));
    }

    let (zone, date_only) = match &until.form {
        UntilForm::Utc => (Tz::UTC, false),
        UntilForm::Zoned { zone, .. } => (*zone, false),
        UntilForm::Floating => (options.default_zone, false),
        UntilForm::Date => (options.default_zone, true),
    };

    let local = until.instant.with_timezone(&zone).naive_local();
    if !(0..=MAX_UNTIL_YEAR).contains(&local.year()) {
        return Err(reject("UNTIL year must have four digits"));
    }

    if date_only {
        let midnight = convert_to_utc_lenient(local.date().and_time(NaiveTime::MIN), zone);
        if midnight.ok() != Some(until.instant) {
            return Err(reject("date-only UNTIL must be local midnight"));
        }
    } else if convert_to_utc(local, zone).ok() != Some(until.instant) {
        return Err(reject("UNTIL local time reads back as a different instant"));
    }

    Ok(())
}

fn check_list<T>(key: RuleKey, values: &[T]) -> ParseResult<()>
where
    T: Copy + Into<i32> + Display,
{
    let Some(range) = FieldRange::for_key(key) else {
        return Ok(());
    };

    match values.iter().find(|value| !range.contains((**value).into())) {
        Some(value) => Err(ParseError::field_range(key, &value.to_string())),
        None => Ok(()),
    }
}

impl RecurrenceRule {
    /// ## Summary
    /// Validates this rule against the RFC 5545 ranges with default options
    /// (UTC default zone).
    ///
    /// ## Errors
    /// See [`validate_rule`].
    pub fn validate(&self) -> ParseResult<()> {
        validate_rule(self, &FormatOptions::default())
    }

    /// Validates this rule for serialization with `options`.
    ///
    /// ## Errors
    /// See [`validate_rule`].
    pub fn validate_with(&self, options: &FormatOptions) -> ParseResult<()> {
        validate_rule(self, options)
    }
}
