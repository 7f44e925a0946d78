//! Recurrence rule serializer with canonical part ordering.

use std::fmt;

use super::fold::fold_line;
use super::values::{format_list, format_until};
use crate::rfc::recur::core::{End, RecurrenceRule, RuleKey, Weekday};
use crate::rfc::recur::options::FormatOptions;

/// Week start written when WKST emission is requested but the rule has none.
const DEFAULT_WEEK_START: Weekday = Weekday::Monday;

/// Serializes a rule as a RECUR value.
///
/// Parts are written in the order `FREQ, INTERVAL, COUNT|UNTIL, BYSECOND,
/// BYMINUTE, BYHOUR, BYDAY, BYMONTHDAY, BYYEARDAY, BYWEEKNO, BYMONTH,
/// BYSETPOS, WKST`. INTERVAL=1 and empty lists are omitted; WKST is written
/// only when `options.emit_week_start` is set. List entries keep their order.
#[must_use]
#[tracing::instrument(skip(rule, options), fields(frequency = %rule.frequency))]
pub fn serialize_rrule(rule: &RecurrenceRule, options: &FormatOptions) -> String {
    let line = RuleKey::ALL
        .into_iter()
        .filter_map(|key| format_part(rule, key, options).map(|value| format!("{key}={value}")))
        .collect::<Vec<_>>()
        .join(";");

    tracing::trace!(len = line.len(), "Serialized recurrence rule");

    if options.fold_output_lines {
        fold_line(&line)
    } else {
        line
    }
}

/// Formats the value of one rule part, or `None` if the part is omitted.
fn format_part(rule: &RecurrenceRule, key: RuleKey, options: &FormatOptions) -> Option<String> {
    match key {
        RuleKey::Freq => Some(rule.frequency.to_string()),
        RuleKey::Interval => (rule.interval != 1).then(|| rule.interval.to_string()),
        RuleKey::Count => match rule.end {
            End::AfterOccurrences(count) => Some(count.to_string()),
            End::Never | End::AfterInstant(_) => None,
        },
        RuleKey::Until => rule.until().map(|until| format_until(until, options)),
        RuleKey::BySecond => format_list(&rule.seconds),
        RuleKey::ByMinute => format_list(&rule.minutes),
        RuleKey::ByHour => format_list(&rule.hours),
        RuleKey::ByDay => format_list(&rule.weekdays),
        RuleKey::ByMonthDay => format_list(&rule.days_of_the_month),
        RuleKey::ByYearDay => format_list(&rule.days_of_the_year),
        RuleKey::ByWeekNo => format_list(&rule.weeks),
        RuleKey::ByMonth => format_list(&rule.months),
        RuleKey::BySetPos => format_list(&rule.set_positions),
        RuleKey::Wkst => options
            .emit_week_start
            .then(|| rule.week_start.unwrap_or(DEFAULT_WEEK_START).to_string()),
    }
}

impl fmt::Display for RecurrenceRule {
    /// Writes the rule with default options: unfolded, no WKST, UTC default zone.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_rrule(self, &FormatOptions::default()))
    }
}
