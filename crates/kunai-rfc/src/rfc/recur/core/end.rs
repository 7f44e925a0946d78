//! End conditions (COUNT / UNTIL).

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// How a recurrence terminates.
///
/// COUNT and UNTIL are mutually exclusive in RFC 5545, so a rule holds at most one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum End {
    #[default]
    Never,
    /// `COUNT=n`, with `n >= 1`.
    AfterOccurrences(u32),
    /// `UNTIL=...`
    AfterInstant(Until),
}

/// An UNTIL bound: an absolute instant plus the textual shape it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Until {
    pub instant: DateTime<Utc>,
    pub form: UntilForm,
}

/// The textual shape of an UNTIL value.
///
/// Serialization reproduces the same shape so round-trips are byte-stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntilForm {
    /// `YYYYMMDD`, local midnight in the default zone.
    Date,
    /// `YYYYMMDDTHHMMSSZ`
    Utc,
    /// `YYYYMMDDTHHMMSS`, local time in the default zone.
    Floating,
    /// `TZID=<tzid>:YYYYMMDDTHHMMSS`
    Zoned { tzid: String, zone: Tz },
}

impl Until {
    #[must_use]
    pub const fn utc(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            form: UntilForm::Utc,
        }
    }

    #[must_use]
    pub const fn date(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            form: UntilForm::Date,
        }
    }

    #[must_use]
    pub const fn floating(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            form: UntilForm::Floating,
        }
    }

    /// An UNTIL bound qualified by a TZID. `tzid` is written back verbatim.
    #[must_use]
    pub fn zoned(instant: DateTime<Utc>, tzid: impl Into<String>, zone: Tz) -> Self {
        Self {
            instant,
            form: UntilForm::Zoned {
                tzid: tzid.into(),
                zone,
            },
        }
    }

    /// Returns the same instant re-tagged as a UTC date-time.
    #[must_use]
    pub fn to_utc_form(&self) -> Self {
        Self::utc(self.instant)
    }
}
