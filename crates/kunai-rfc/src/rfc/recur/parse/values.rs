//! Rule part value parsers (RFC 5545 §3.3.10).
//!
//! Every parser validates both grammar and range. Values are never clamped:
//! anything outside its field's range is rejected with the offending key and
//! raw value.

use super::error::{ParseError, ParseResult};
use crate::rfc::recur::core::{Frequency, Month, RuleKey, Weekday, WeekdayNum};

/// Token that RFC 5545 defines but this engine does not support.
const SECONDLY: &str = "SECONDLY";

/// Valid range of an integer rule part value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRange {
    /// `min..=max`, no minus sign allowed.
    Unsigned { min: u16, max: u16 },
    /// `-max..=-1` or `1..=max`.
    NonZero { max: u16 },
}

impl FieldRange {
    pub const SECOND: Self = Self::Unsigned { min: 0, max: 60 };
    pub const MINUTE: Self = Self::Unsigned { min: 0, max: 59 };
    pub const HOUR: Self = Self::Unsigned { min: 0, max: 23 };
    pub const MONTH_DAY: Self = Self::NonZero { max: 31 };
    pub const YEAR_DAY: Self = Self::NonZero { max: 366 };
    pub const WEEK_NO: Self = Self::NonZero { max: 53 };
    pub const MONTH: Self = Self::Unsigned { min: 1, max: 12 };
    pub const SET_POS: Self = Self::NonZero { max: 366 };
    /// Ordinal prefix of a BYDAY entry.
    pub const WEEKDAY_ORDINAL: Self = Self::NonZero { max: 53 };

    /// Returns whether `value` lies in this range.
    #[must_use]
    pub fn contains(self, value: i32) -> bool {
        match self {
            Self::Unsigned { min, max } => (i32::from(min)..=i32::from(max)).contains(&value),
            Self::NonZero { max } => value != 0 && value.unsigned_abs() <= u32::from(max),
        }
    }

    const fn allows_minus(self) -> bool {
        matches!(self, Self::NonZero { .. })
    }

    /// Returns the range that applies to the values of `key`, if it is an integer list part.
    #[must_use]
    pub const fn for_key(key: RuleKey) -> Option<Self> {
        match key {
            RuleKey::BySecond => Some(Self::SECOND),
            RuleKey::ByMinute => Some(Self::MINUTE),
            RuleKey::ByHour => Some(Self::HOUR),
            RuleKey::ByMonthDay => Some(Self::MONTH_DAY),
            RuleKey::ByYearDay => Some(Self::YEAR_DAY),
            RuleKey::ByWeekNo => Some(Self::WEEK_NO),
            RuleKey::ByMonth => Some(Self::MONTH),
            RuleKey::BySetPos => Some(Self::SET_POS),
            RuleKey::Freq
            | RuleKey::Interval
            | RuleKey::Count
            | RuleKey::Until
            | RuleKey::ByDay
            | RuleKey::Wkst => None,
        }
    }
}

/// Parses `[+|-]digits` and checks it against `range`.
///
/// A minus sign is only accepted for non-zero ranges; whitespace is never accepted.
fn parse_ranged_integer(s: &str, range: FieldRange) -> Option<i32> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') if range.allows_minus() => (true, &s[1..]),
        _ => (false, s),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude: i32 = digits.parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    range.contains(value).then_some(value)
}

/// Parses the FREQ value.
///
/// ## Errors
/// Returns `UnsupportedFrequency` for SECONDLY and a field error for any other
/// unknown token.
pub fn parse_frequency(value: &str) -> ParseResult<Frequency> {
    if value.eq_ignore_ascii_case(SECONDLY) {
        return Err(ParseError::unsupported_frequency(value));
    }
    Frequency::parse(value).ok_or_else(|| ParseError::field_range(RuleKey::Freq, value))
}

/// Parses a positive integer (INTERVAL, COUNT).
///
/// ## Errors
/// Returns a field error unless the value is `[+]digits` with a value of at least 1.
pub fn parse_positive(key: RuleKey, value: &str) -> ParseResult<u32> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::field_range(key, value));
    }
    digits
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| ParseError::field_range(key, value))
}

/// Parses a comma-separated integer list for `key`, converting each entry to `T`.
///
/// An empty value yields an empty list (the part is treated as unset).
///
/// ## Errors
/// Returns a field error if any entry is malformed or out of range.
pub fn parse_integer_list<T>(key: RuleKey, value: &str, range: FieldRange) -> ParseResult<Vec<T>>
where
    T: TryFrom<i32>,
{
    if value.is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(',')
        .map(|item| {
            parse_ranged_integer(item, range)
                .and_then(|n| T::try_from(n).ok())
                .ok_or_else(|| ParseError::field_range(key, value))
        })
        .collect()
}

/// Parses a BYMONTH list.
///
/// ## Errors
/// Returns a field error if any entry is not in `1..=12`.
pub fn parse_months(value: &str) -> ParseResult<Vec<Month>> {
    let numbers: Vec<u8> = parse_integer_list(RuleKey::ByMonth, value, FieldRange::MONTH)?;
    numbers
        .into_iter()
        .map(|n| Month::new(n).ok_or_else(|| ParseError::field_range(RuleKey::ByMonth, value)))
        .collect()
}

/// Parses a BYDAY list (weekdays with optional ordinals, e.g. `MO,1WE,-1FR`).
///
/// ## Errors
/// Returns a field error if any entry has an unknown weekday or an invalid ordinal.
pub fn parse_byday(value: &str) -> ParseResult<Vec<WeekdayNum>> {
    if value.is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(',')
        .map(|item| {
            parse_weekday_num(item).ok_or_else(|| ParseError::field_range(RuleKey::ByDay, value))
        })
        .collect()
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR", "+2TU").
fn parse_weekday_num(s: &str) -> Option<WeekdayNum> {
    let split = s.len().checked_sub(2)?;
    if !s.is_char_boundary(split) {
        return None;
    }

    let (ordinal_str, weekday_str) = s.split_at(split);
    let weekday = Weekday::parse(weekday_str)?;

    let ordinal = if ordinal_str.is_empty() {
        None
    } else {
        let n = parse_ranged_integer(ordinal_str, FieldRange::WEEKDAY_ORDINAL)?;
        Some(i8::try_from(n).ok()?)
    };

    Some(WeekdayNum { ordinal, weekday })
}

/// Parses the WKST value.
///
/// ## Errors
/// Returns a field error unless the value is one of `MO`..`SU`.
pub fn parse_week_start(value: &str) -> ParseResult<Weekday> {
    Weekday::parse(value).ok_or_else(|| ParseError::field_range(RuleKey::Wkst, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::recur::parse::ParseErrorKind;

    #[test]
    fn frequency_tokens() {
        assert_eq!(parse_frequency("MINUTELY").unwrap(), Frequency::Minutely);
        assert_eq!(parse_frequency("hourly").unwrap(), Frequency::Hourly);
        assert_eq!(parse_frequency("Monthly").unwrap(), Frequency::Monthly);
    }

    #[test]
    fn frequency_secondly_is_unsupported() {
        let err = parse_frequency("secondly").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedFrequency);
    }

    #[test]
    fn frequency_unknown_is_field_error() {
        let err = parse_frequency("FOOBAR").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::FieldRange);
        assert_eq!(err.key, Some(RuleKey::Freq));
        assert_eq!(err.value.as_deref(), Some("FOOBAR"));
    }

    #[test]
    fn positive_integers() {
        assert_eq!(parse_positive(RuleKey::Interval, "1").unwrap(), 1);
        assert_eq!(parse_positive(RuleKey::Interval, "10").unwrap(), 10);
        assert_eq!(parse_positive(RuleKey::Count, "+5").unwrap(), 5);
        for bad in ["", "0", "-1", "-2", "1-", "foo", " 1", "99999999999"] {
            let err = parse_positive(RuleKey::Count, bad).expect_err(bad);
            assert_eq!(err.kind, ParseErrorKind::FieldRange);
            assert_eq!(err.key, Some(RuleKey::Count));
        }
    }

    #[test]
    fn unsigned_list_bounds() {
        let seconds: Vec<u8> =
            parse_integer_list(RuleKey::BySecond, "0,60", FieldRange::SECOND).unwrap();
        assert_eq!(seconds, vec![0, 60]);

        let hours: Vec<u8> =
            parse_integer_list(RuleKey::ByHour, "0,12,23", FieldRange::HOUR).unwrap();
        assert_eq!(hours, vec![0, 12, 23]);

        for bad in ["24", "-1", "foobar", "1,,2", "1, 2", "1,"] {
            assert!(
                parse_integer_list::<u8>(RuleKey::ByHour, bad, FieldRange::HOUR).is_err(),
                "{bad}"
            );
        }
    }

    #[test]
    fn signed_list_bounds() {
        let days: Vec<i16> =
            parse_integer_list(RuleKey::ByYearDay, "1,-366,+100", FieldRange::YEAR_DAY).unwrap();
        assert_eq!(days, vec![1, -366, 100]);

        for bad in ["0", "367", "-367", "--1", "+-1"] {
            assert!(
                parse_integer_list::<i16>(RuleKey::ByYearDay, bad, FieldRange::YEAR_DAY).is_err(),
                "{bad}"
            );
        }
    }

    #[test]
    fn empty_list_is_unset() {
        let weeks: Vec<i8> = parse_integer_list(RuleKey::ByWeekNo, "", FieldRange::WEEK_NO).unwrap();
        assert!(weeks.is_empty());
        assert!(parse_byday("").unwrap().is_empty());
        assert!(parse_months("").unwrap().is_empty());
    }

    #[test]
    fn months() {
        let months = parse_months("1,6,12").unwrap();
        assert_eq!(months.iter().map(|m| m.get()).collect::<Vec<_>>(), vec![1, 6, 12]);
        assert!(parse_months("0").is_err());
        assert!(parse_months("13").is_err());
    }

    #[test]
    fn byday_entries() {
        let days = parse_byday("MO,1we,-1FR,+2TU").unwrap();
        assert_eq!(
            days,
            vec![
                WeekdayNum::every(Weekday::Monday),
                WeekdayNum::nth(1, Weekday::Wednesday),
                WeekdayNum::nth(-1, Weekday::Friday),
                WeekdayNum::nth(2, Weekday::Tuesday),
            ]
        );
    }

    #[test]
    fn byday_rejections() {
        for bad in ["BAR,1WE", "MO,1BAR", "0MO", "54MO", "M", "1 MO", "日MO"] {
            let err = parse_byday(bad).expect_err(bad);
            assert_eq!(err.key, Some(RuleKey::ByDay));
            assert_eq!(err.value.as_deref(), Some(bad));
        }
    }

    #[test]
    fn week_start() {
        assert_eq!(parse_week_start("su").unwrap(), Weekday::Sunday);
        assert!(parse_week_start("").is_err());
        assert!(parse_week_start("SUN").is_err());
    }

    #[test]
    fn range_for_key() {
        assert_eq!(FieldRange::for_key(RuleKey::ByMonth), Some(FieldRange::MONTH));
        assert_eq!(FieldRange::for_key(RuleKey::ByDay), None);
        assert!(FieldRange::SET_POS.contains(-366));
        assert!(!FieldRange::SET_POS.contains(0));
        assert!(!FieldRange::MINUTE.contains(60));
    }
}
