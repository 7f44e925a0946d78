//! Timezone resolution and UTC conversion for UNTIL date-times.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and timezone canonicalization.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

/// Error during timezone conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),
}

/// ## Summary
/// Resolves timezone identifiers to zones.
///
/// This is the only way the parser learns about zones: TZID values are opaque
/// keys handed to the lookup. Implementations are shared across threads and
/// must only be read, never mutated, by callers.
pub trait TimeZoneLookup: Send + Sync {
    /// Returns the zone for `tzid`, or `None` if it is unknown.
    fn resolve(&self, tzid: &str) -> Option<Tz>;
}

impl<F> TimeZoneLookup for F
where
    F: Fn(&str) -> Option<Tz> + Send + Sync,
{
    fn resolve(&self, tzid: &str) -> Option<Tz> {
        self(tzid)
    }
}

/// Resolver for timezone identifiers.
///
/// Maps IANA names, IANA aliases, Windows zone names and vendor-prefixed IDs
/// to `chrono_tz` zones, caching successful resolutions.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    /// Cache of resolved timezones by normalized IANA name.
    cache: RwLock<HashMap<String, Tz>>,
}

impl TimeZoneResolver {
    /// Creates a new timezone resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    ///
    /// Returns `ConversionError::UnknownTimezone` if the TZID cannot be resolved.
    ///
    /// ## Side Effects
    ///
    /// Caches successful resolutions under the normalized IANA name, so
    /// aliases of one zone share a single entry.
    pub fn resolve_tzid(&self, tzid: &str) -> Result<Tz, ConversionError> {
        // Canonical names skip normalization
        if let Some(tz) = self.cached(tzid) {
            return Ok(tz);
        }

        let normalized = normalize_tzid(tzid);
        if let Some(tz) = self.cached(&normalized) {
            return Ok(tz);
        }

        let tz = Tz::from_str(&normalized)
            .map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))?;

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(normalized, tz);
        }

        tracing::trace!(tzid, resolved = tz.name(), "Resolved timezone");
        Ok(tz)
    }

    fn cached(&self, key: &str) -> Option<Tz> {
        self.cache.read().ok()?.get(key).copied()
    }
}

impl TimeZoneLookup for TimeZoneResolver {
    fn resolve(&self, tzid: &str) -> Option<Tz> {
        self.resolve_tzid(tzid).ok()
    }
}

/// Normalizes common CalDAV/iCalendar timezone identifiers to IANA names.
///
/// Uses ICU4X for Windows timezone ID mapping and IANA canonicalization.
fn normalize_tzid(tzid: &str) -> String {
    // Strip common prefixes
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // Handles aliases like Europe/Kiev -> Europe/Kyiv
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Converts a local datetime in `zone` to UTC.
///
/// An ambiguous local time (DST fold) resolves to the earlier instant.
///
/// ## Errors
///
/// Returns `ConversionError::NonExistentTime` if the local time falls in a DST gap.
pub fn convert_to_utc(local_time: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>, ConversionError> {
    match zone.from_local_datetime(&local_time) {
        LocalResult::None => Err(ConversionError::NonExistentTime(format!(
            "{local_time} in timezone {}",
            zone.name()
        ))),
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _latest) => Ok(earliest.with_timezone(&Utc)),
    }
}

/// ## Summary
/// Converts a local datetime to UTC, shifting non-existent times forward by
/// one hour instead of failing.
///
/// ## Errors
///
/// Returns an error only if the shifted time is still non-existent.
pub fn convert_to_utc_lenient(
    local_time: NaiveDateTime,
    zone: Tz,
) -> Result<DateTime<Utc>, ConversionError> {
    match convert_to_utc(local_time, zone) {
        Err(ConversionError::NonExistentTime(_)) => {
            convert_to_utc(local_time + chrono::Duration::hours(1), zone)
        }
        other => other,
    }
}
