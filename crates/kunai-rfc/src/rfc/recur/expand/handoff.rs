//! Hand-off of validated rules to the `rrule` crate.

use rrule::{RRule, Unvalidated};

use crate::error::{RfcError, RfcResult};
use crate::rfc::recur::build::serialize_rrule;
use crate::rfc::recur::core::{End, RecurrenceRule};
use crate::rfc::recur::options::FormatOptions;

/// Leap second, accepted in BYSECOND but not by the expansion engine.
const LEAP_SECOND: u8 = 60;

/// ## Summary
/// Converts a rule into an unvalidated `rrule::RRule` for occurrence expansion.
///
/// UNTIL is rewritten as a UTC date-time, the only shape the expansion engine
/// accepts alongside a UTC start, and WKST is always emitted.
///
/// ## Errors
/// Returns `RfcError::ParseError` if the rule fails validation,
/// `RfcError::ExpansionUnsupported` for `BYSECOND=60`, or
/// `RfcError::RRuleError` if the `rrule` crate rejects the rule text.
#[tracing::instrument(skip(rule), fields(frequency = %rule.frequency))]
pub fn to_rrule(rule: &RecurrenceRule) -> RfcResult<RRule<Unvalidated>> {
    let mut normalized = rule.clone();
    if let End::AfterInstant(until) = &rule.end {
        normalized.end = End::AfterInstant(until.to_utc_form());
    }

    let options = FormatOptions::default().with_week_start(true);
    normalized.validate_with(&options)?;

    if normalized.seconds.contains(&LEAP_SECOND) {
        return Err(RfcError::ExpansionUnsupported(format!(
            "BYSECOND={LEAP_SECOND} (leap second)"
        )));
    }

    let text = serialize_rrule(&normalized, &options);
    tracing::debug!(rrule = %text, "Handing rule off for expansion");

    Ok(text.parse::<RRule<Unvalidated>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::recur::core::{Frequency, Until, Weekday, WeekdayNum};
    use crate::rfc::recur::parse::ParseErrorKind;
    use chrono::{TimeZone, Utc};

    fn start() -> chrono::DateTime<rrule::Tz> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
            .unwrap()
            .with_timezone(&rrule::Tz::UTC)
    }

    #[test]
    fn count_rule_expands() {
        let rule = RecurrenceRule::new(Frequency::Daily).with_count(3);

        let set = to_rrule(&rule).unwrap().build(start()).unwrap();
        assert_eq!(set.all(10).dates.len(), 3);
    }

    #[test]
    fn zoned_until_is_handed_off_in_utc() {
        let until = Utc.with_ymd_and_hms(2025, 1, 16, 4, 59, 59).unwrap();
        let rule = RecurrenceRule::new(Frequency::Weekly)
            .with_weekdays([WeekdayNum::every(Weekday::Wednesday)])
            .with_until(Until::zoned(
                until,
                "America/New_York",
                chrono_tz::Tz::America__New_York,
            ));

        let set = to_rrule(&rule).unwrap().build(start()).unwrap();
        // 2025-01-01, 2025-01-08 and 2025-01-15 are Wednesdays
        assert_eq!(set.all(10).dates.len(), 3);
    }

    #[test]
    fn monthly_last_friday_expands() {
        let rule: RecurrenceRule = "FREQ=MONTHLY;BYDAY=-1FR;COUNT=3".parse().unwrap();

        let dates = to_rrule(&rule).unwrap().build(start()).unwrap().all(10).dates;
        let days: Vec<_> = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
        assert_eq!(days, ["2025-01-31", "2025-02-28", "2025-03-28"]);
    }

    #[test]
    fn invalid_rule_is_not_handed_off() {
        let rule = RecurrenceRule::new(Frequency::Daily).with_hours([24]);

        match to_rrule(&rule) {
            Err(RfcError::ParseError(err)) => assert_eq!(err.kind, ParseErrorKind::FieldRange),
            other => panic!("expected a range error, got {other:?}"),
        }
    }

    #[test]
    fn leap_second_is_not_handed_off() {
        let rule: RecurrenceRule = "FREQ=YEARLY;BYSECOND=0,60".parse().unwrap();
        assert!(rule.validate().is_ok());

        match to_rrule(&rule) {
            Err(RfcError::ExpansionUnsupported(message)) => assert!(message.contains("60")),
            other => panic!("expected a leap second rejection, got {other:?}"),
        }
    }

    #[test]
    fn date_until_in_other_zone_is_handed_off() {
        // Local midnight in Berlin; the hand-off works on the UTC instant
        let until = Until::date(Utc.with_ymd_and_hms(2025, 1, 2, 23, 0, 0).unwrap());
        let rule = RecurrenceRule::new(Frequency::Daily).with_until(until);

        let set = to_rrule(&rule).unwrap().build(start()).unwrap();
        // 2025-01-01 and 2025-01-02 at 09:00 UTC
        assert_eq!(set.all(10).dates.len(), 2);
    }
}
