//! The structured recurrence rule.

use std::fmt;

use super::end::{End, Until};
use super::weekday::{Weekday, WeekdayNum};

/// Recurrence frequency (`FREQ`).
///
/// RFC 5545 also defines SECONDLY; it is recognized by the parser only to be
/// rejected, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Self; 6] = [
        Self::Minutely,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
    ];

    /// Parses a FREQ token, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(s))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar month, 1 (January) through 12 (December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month(u8);

impl Month {
    /// Returns `None` unless `month` is in `1..=12`.
    #[must_use]
    pub const fn new(month: u8) -> Option<Self> {
        if matches!(month, 1..=12) {
            Some(Self(month))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recurrence rule (RFC 5545 §3.3.10).
///
/// List fields keep the order they were given in; serialization writes them
/// back in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    pub end: End,
    pub seconds: Vec<u8>,
    pub minutes: Vec<u8>,
    pub hours: Vec<u8>,
    pub weekdays: Vec<WeekdayNum>,
    pub days_of_the_month: Vec<i8>,
    pub days_of_the_year: Vec<i16>,
    pub weeks: Vec<i8>,
    pub months: Vec<Month>,
    pub set_positions: Vec<i16>,
    pub week_start: Option<Weekday>,
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency, an interval of 1, no end and
    /// no BY* parts.
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            end: End::Never,
            seconds: Vec::new(),
            minutes: Vec::new(),
            hours: Vec::new(),
            weekdays: Vec::new(),
            days_of_the_month: Vec::new(),
            days_of_the_year: Vec::new(),
            weeks: Vec::new(),
            months: Vec::new(),
            set_positions: Vec::new(),
            week_start: None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.end = End::AfterOccurrences(count);
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: Until) -> Self {
        self.end = End::AfterInstant(until);
        self
    }

    #[must_use]
    pub fn with_seconds(mut self, seconds: impl Into<Vec<u8>>) -> Self {
        self.seconds = seconds.into();
        self
    }

    #[must_use]
    pub fn with_minutes(mut self, minutes: impl Into<Vec<u8>>) -> Self {
        self.minutes = minutes.into();
        self
    }

    #[must_use]
    pub fn with_hours(mut self, hours: impl Into<Vec<u8>>) -> Self {
        self.hours = hours.into();
        self
    }

    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl Into<Vec<WeekdayNum>>) -> Self {
        self.weekdays = weekdays.into();
        self
    }

    #[must_use]
    pub fn with_days_of_the_month(mut self, days: impl Into<Vec<i8>>) -> Self {
        self.days_of_the_month = days.into();
        self
    }

    #[must_use]
    pub fn with_days_of_the_year(mut self, days: impl Into<Vec<i16>>) -> Self {
        self.days_of_the_year = days.into();
        self
    }

    #[must_use]
    pub fn with_weeks(mut self, weeks: impl Into<Vec<i8>>) -> Self {
        self.weeks = weeks.into();
        self
    }

    #[must_use]
    pub fn with_months(mut self, months: impl Into<Vec<Month>>) -> Self {
        self.months = months.into();
        self
    }

    #[must_use]
    pub fn with_set_positions(mut self, positions: impl Into<Vec<i16>>) -> Self {
        self.set_positions = positions.into();
        self
    }

    #[must_use]
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = Some(week_start);
        self
    }

    /// Returns the occurrence limit, if the rule ends after COUNT occurrences.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        match self.end {
            End::AfterOccurrences(count) => Some(count),
            End::Never | End::AfterInstant(_) => None,
        }
    }

    /// Returns the UNTIL bound, if any.
    #[must_use]
    pub const fn until(&self) -> Option<&Until> {
        match &self.end {
            End::AfterInstant(until) => Some(until),
            End::Never | End::AfterOccurrences(_) => None,
        }
    }
}
