//! Recurrence rule assembler.
//!
//! Turns a RECUR value into a [`RecurrenceRule`], enforcing the cross-part
//! constraints that single-part codecs cannot see.

use std::str::FromStr;

use super::error::{ParseError, ParseResult};
use super::lexer::{RulePart, split_parts, unfold};
use super::until::parse_until;
use super::values::{
    FieldRange, parse_byday, parse_frequency, parse_integer_list, parse_months, parse_positive,
    parse_week_start,
};
use crate::rfc::recur::core::{End, RecurrenceRule, RuleKey};
use crate::rfc::recur::expand::{TimeZoneLookup, TimeZoneResolver};
use crate::rfc::recur::options::FormatOptions;

/// Parses a RECUR value into a recurrence rule.
///
/// The input may be folded. Rule parts may appear in any order and keys and
/// enumerated values are case-insensitive. The whole parse fails on the first
/// violation; partial rules are never returned.
///
/// ## Errors
/// Returns an error if the value is structurally malformed, uses FREQ=SECONDLY,
/// has both COUNT and UNTIL, or any part fails its grammar or range check.
#[tracing::instrument(skip(input, options, lookup), fields(input_len = input.len()))]
pub fn parse_rrule(
    input: &str,
    options: &FormatOptions,
    lookup: &dyn TimeZoneLookup,
) -> ParseResult<RecurrenceRule> {
    tracing::debug!("Parsing recurrence rule");

    let line = unfold(input);
    assemble(line.trim(), options, lookup).inspect_err(|err| {
        tracing::warn!(error = %err, "Rejected recurrence rule");
    })
}

fn assemble(
    line: &str,
    options: &FormatOptions,
    lookup: &dyn TimeZoneLookup,
) -> ParseResult<RecurrenceRule> {
    let parts = split_parts(line)?;

    let freq = find_part(&parts, RuleKey::Freq)
        .ok_or_else(|| ParseError::structural("missing FREQ rule part"))?;
    let frequency = parse_frequency(freq.value)?;

    if find_part(&parts, RuleKey::Count).is_some() && find_part(&parts, RuleKey::Until).is_some() {
        return Err(ParseError::conflicting_end());
    }

    let mut rule = RecurrenceRule::new(frequency);
    for part in &parts {
        apply_part(&mut rule, part, options, lookup)?;
    }

    tracing::debug!(frequency = %rule.frequency, parts = parts.len(), "Recurrence rule parsed");
    Ok(rule)
}

fn find_part<'a>(parts: &'a [RulePart<'a>], key: RuleKey) -> Option<&'a RulePart<'a>> {
    parts.iter().find(|part| part.key == key)
}

/// Decodes one rule part into `rule`.
fn apply_part(
    rule: &mut RecurrenceRule,
    part: &RulePart<'_>,
    options: &FormatOptions,
    lookup: &dyn TimeZoneLookup,
) -> ParseResult<()> {
    let RulePart { key, value } = *part;
    tracing::trace!(%key, value, "Decoding rule part");

    match key {
        // Decoded up front
        RuleKey::Freq => {}
        RuleKey::Interval => rule.interval = parse_positive(key, value)?,
        RuleKey::Count => rule.end = End::AfterOccurrences(parse_positive(key, value)?),
        RuleKey::Until => rule.end = End::AfterInstant(parse_until(value, options, lookup)?),
        RuleKey::BySecond => rule.seconds = parse_integer_list(key, value, FieldRange::SECOND)?,
        RuleKey::ByMinute => rule.minutes = parse_integer_list(key, value, FieldRange::MINUTE)?,
        RuleKey::ByHour => rule.hours = parse_integer_list(key, value, FieldRange::HOUR)?,
        RuleKey::ByDay => rule.weekdays = parse_byday(value)?,
        RuleKey::ByMonthDay => {
            rule.days_of_the_month = parse_integer_list(key, value, FieldRange::MONTH_DAY)?;
        }
        RuleKey::ByYearDay => {
            rule.days_of_the_year = parse_integer_list(key, value, FieldRange::YEAR_DAY)?;
        }
        RuleKey::ByWeekNo => rule.weeks = parse_integer_list(key, value, FieldRange::WEEK_NO)?,
        RuleKey::ByMonth => rule.months = parse_months(value)?,
        RuleKey::BySetPos => {
            rule.set_positions = parse_integer_list(key, value, FieldRange::SET_POS)?;
        }
        RuleKey::Wkst => rule.week_start = Some(parse_week_start(value)?),
    }

    Ok(())
}

impl FromStr for RecurrenceRule {
    type Err = ParseError;

    /// Parses with default options (UTC default zone) and the default timezone resolver.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rrule(s, &FormatOptions::default(), &TimeZoneResolver::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::recur::core::{Frequency, Month, Until, Weekday, WeekdayNum};
    use crate::rfc::recur::parse::ParseErrorKind;

    fn parse(input: &str) -> ParseResult<RecurrenceRule> {
        parse_rrule(input, &FormatOptions::default(), &TimeZoneResolver::new())
    }

    fn kind(input: &str) -> ParseErrorKind {
        parse(input).expect_err(input).kind
    }

    #[test]
    fn parse_rrule_basic() {
        let rule = parse("FREQ=DAILY;COUNT=10").unwrap();
        assert_eq!(rule.frequency, Frequency::Daily);
        assert_eq!(rule.count(), Some(10));
        assert_eq!(rule.interval, 1);
    }

    #[test]
    fn parse_every_frequency() {
        for frequency in Frequency::ALL {
            let rule = parse(&format!("FREQ={frequency}")).unwrap();
            assert_eq!(rule.frequency, frequency);
        }
    }

    #[test]
    fn parse_interval() {
        assert_eq!(parse("FREQ=DAILY;INTERVAL=2").unwrap().interval, 2);
        assert_eq!(parse("FREQ=DAILY;INTERVAL=10").unwrap().interval, 10);
        for bad in ["INTERVAL=", "INTERVAL=-1", "INTERVAL=0", "INTERVAL=foo"] {
            assert_eq!(kind(&format!("FREQ=DAILY;{bad}")), ParseErrorKind::FieldRange);
        }
    }

    #[test]
    fn parse_count_rejections() {
        for bad in ["COUNT=", "COUNT=-2", "COUNT=1-", "COUNT=foobar", "COUNT=0"] {
            assert_eq!(kind(&format!("FREQ=DAILY;{bad}")), ParseErrorKind::FieldRange);
        }
    }

    #[test]
    fn parse_rrule_weekly_byday() {
        let rule = parse("FREQ=WEEKLY;BYDAY=MO,WE,FR").unwrap();
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.weekdays.len(), 3);
    }

    #[test]
    fn parse_rrule_monthly_nth() {
        let rule = parse("FREQ=MONTHLY;BYDAY=-1FR").unwrap();
        assert_eq!(rule.weekdays, vec![WeekdayNum::nth(-1, Weekday::Friday)]);
    }

    #[test]
    fn parse_by_lists() {
        let rule = parse(
            "FREQ=YEARLY;BYSECOND=0,60;BYMINUTE=0,30,59;BYHOUR=0,12,23;BYMONTHDAY=1,-31;\
             BYYEARDAY=1,-366;BYWEEKNO=1,-53;BYMONTH=1,6,12;BYSETPOS=1,2,-1",
        )
        .unwrap();
        assert_eq!(rule.seconds, vec![0, 60]);
        assert_eq!(rule.minutes, vec![0, 30, 59]);
        assert_eq!(rule.hours, vec![0, 12, 23]);
        assert_eq!(rule.days_of_the_month, vec![1, -31]);
        assert_eq!(rule.days_of_the_year, vec![1, -366]);
        assert_eq!(rule.weeks, vec![1, -53]);
        assert_eq!(rule.months.iter().map(|m| m.get()).collect::<Vec<_>>(), vec![1, 6, 12]);
        assert_eq!(rule.set_positions, vec![1, 2, -1]);
    }

    #[test]
    fn parse_by_list_rejections() {
        for bad in [
            "BYSECOND=-1",
            "BYSECOND=61",
            "BYSECOND=foo",
            "BYMINUTE=60",
            "BYHOUR=24",
            "BYHOUR=-1",
            "BYMONTHDAY=0",
            "BYMONTHDAY=32",
            "BYMONTHDAY=-32",
            "BYYEARDAY=367",
            "BYWEEKNO=54",
            "BYWEEKNO=-54",
            "BYMONTH=0",
            "BYMONTH=13",
            "BYSETPOS=367",
            "BYSETPOS=-367",
            "BYDAY=BAR,1WE",
            "BYDAY=MO,1BAR",
            "WKST=XX",
            "WKST=",
        ] {
            let err = parse(&format!("FREQ=YEARLY;{bad}")).expect_err(bad);
            assert_eq!(err.kind, ParseErrorKind::FieldRange, "{bad}");
            assert!(err.key.is_some(), "{bad}");
        }
    }

    #[test]
    fn empty_by_list_is_unset() {
        let empty = parse("FREQ=DAILY;BYDAY=;BYMONTH=").unwrap();
        let absent = parse("FREQ=DAILY").unwrap();
        assert_eq!(empty, absent);
    }

    #[test]
    fn parse_order_independent() {
        assert_eq!(
            parse("COUNT=5;FREQ=DAILY").unwrap(),
            parse("FREQ=DAILY;COUNT=5").unwrap()
        );
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(parse("freq=daily").unwrap(), parse("FREQ=DAILY").unwrap());

        let rule = parse("FREQ=Weekly;ByDay=mo,we,fr").unwrap();
        assert_eq!(
            rule.weekdays,
            vec![
                WeekdayNum::every(Weekday::Monday),
                WeekdayNum::every(Weekday::Wednesday),
                WeekdayNum::every(Weekday::Friday),
            ]
        );
    }

    #[test]
    fn parse_rejections_by_kind() {
        assert_eq!(kind("FREQUENCY=DAILY"), ParseErrorKind::Structural);
        assert_eq!(kind("FREQ=SECONDLY"), ParseErrorKind::UnsupportedFrequency);
        assert_eq!(kind("FREQ=SECONDLY;INTERVAL=1"), ParseErrorKind::UnsupportedFrequency);
        assert_eq!(
            kind("FREQ=DAILY;UNTIL=20250111;COUNT=5"),
            ParseErrorKind::ConflictingEnd
        );
        assert_eq!(
            kind("FREQ=DAILY;FREQ=WEEKLY;COUNT=5"),
            ParseErrorKind::Structural
        );
        assert_eq!(kind("FREQ=DAILY;BYHOUR=24"), ParseErrorKind::FieldRange);
        assert_eq!(kind("FREQ=DAILY;UNTIL=foobar"), ParseErrorKind::UntilFormat);
    }

    #[test]
    fn parse_structural_rejections() {
        for bad in [
            "",
            "   ",
            "FOO=BAR",
            "COUNT=1",
            "FREQ=DAILY;COUNT=4;COUNT=5",
            "FREQ=MONTHLY;BYDAY=MO;WE",
        ] {
            assert_eq!(kind(bad), ParseErrorKind::Structural, "{bad:?}");
        }
        assert_eq!(kind("FREQ=MONTHLY:COUNT=2"), ParseErrorKind::FieldRange);
    }

    #[test]
    fn field_error_carries_key_and_value() {
        let err = parse("FREQ=DAILY;BYHOUR=1,24").unwrap_err();
        assert_eq!(err.key, Some(RuleKey::ByHour));
        assert_eq!(err.value.as_deref(), Some("1,24"));
    }

    #[test]
    fn parse_until_variants() {
        let date = parse("FREQ=DAILY;UNTIL=20250111").unwrap();
        assert_eq!(
            date.until().map(|u| u.instant.timestamp()),
            Some(1_736_553_600)
        );

        let utc = parse("FREQ=DAILY;UNTIL=20250111T235959Z").unwrap();
        assert_eq!(
            utc.until().map(|u| u.instant.timestamp()),
            Some(1_736_639_999)
        );

        let zoned = parse("FREQ=DAILY;UNTIL=TZID=America/New_York:20250111T235959").unwrap();
        assert_eq!(
            zoned.until().map(|u| u.instant.timestamp()),
            Some(1_736_657_999)
        );
    }

    #[test]
    fn parse_folded_input() {
        let rule = parse("FREQ=DAILY;BYDAY=MO,\r\n TU,WE").unwrap();
        assert_eq!(rule.weekdays.len(), 3);

        let rule = parse("FREQ=WEEKLY;COUNT=3\n ;BYDAY=MO").unwrap();
        assert_eq!(rule.count(), Some(3));
        assert_eq!(rule.weekdays, vec![WeekdayNum::every(Weekday::Monday)]);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        assert_eq!(
            parse("  FREQ=DAILY;COUNT=2\r\n").unwrap(),
            parse("FREQ=DAILY;COUNT=2").unwrap()
        );
    }

    #[test]
    fn parse_week_start() {
        let rule = parse("FREQ=WEEKLY;WKST=SU;BYDAY=MO").unwrap();
        assert_eq!(rule.week_start, Some(Weekday::Sunday));
        assert_eq!(rule.weekdays, vec![WeekdayNum::every(Weekday::Monday)]);
    }

    #[test]
    fn parse_yearly_weekno_with_ordinal_byday() {
        let rule = parse("FREQ=YEARLY;BYWEEKNO=1;BYDAY=1MO").unwrap();
        assert_eq!(rule.frequency, Frequency::Yearly);
        assert_eq!(rule.weeks, vec![1]);
        assert_eq!(rule.weekdays, vec![WeekdayNum::nth(1, Weekday::Monday)]);
    }

    #[test]
    fn parse_multiple_rule_parts() {
        let rule = parse("FREQ=MONTHLY;BYDAY=MO,TU;BYMONTH=1,6;BYSETPOS=1,-1;COUNT=5").unwrap();
        let expected = RecurrenceRule::new(Frequency::Monthly)
            .with_count(5)
            .with_months([Month::new(1).unwrap(), Month::new(6).unwrap()])
            .with_weekdays([
                WeekdayNum::every(Weekday::Monday),
                WeekdayNum::every(Weekday::Tuesday),
            ])
            .with_set_positions([1, -1]);
        assert_eq!(rule, expected);
    }

    #[test]
    fn from_str_uses_defaults() {
        let rule: RecurrenceRule = "FREQ=DAILY;UNTIL=20250111T235959Z".parse().unwrap();
        assert_eq!(
            rule.until(),
            Some(&Until::utc(
                chrono::DateTime::from_timestamp(1_736_639_999, 0).unwrap()
            ))
        );
    }
}
