//! Per-call options for reading and writing RECUR values.

use chrono_tz::Tz;
use kunai_core::config::RecurrenceConfig;

use crate::error::{RfcError, RfcResult};
use crate::rfc::recur::expand::TimeZoneLookup;

/// Options passed explicitly to every parse and serialize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Zone for floating and date-only UNTIL values.
    pub default_zone: Tz,
    /// Fold serialized output at 75 octets.
    pub fold_output_lines: bool,
    /// Emit WKST when serializing.
    pub emit_week_start: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl FormatOptions {
    #[must_use]
    pub const fn new(default_zone: Tz) -> Self {
        Self {
            default_zone,
            fold_output_lines: false,
            emit_week_start: false,
        }
    }

    #[must_use]
    pub const fn with_folding(mut self, fold_output_lines: bool) -> Self {
        self.fold_output_lines = fold_output_lines;
        self
    }

    #[must_use]
    pub const fn with_week_start(mut self, emit_week_start: bool) -> Self {
        self.emit_week_start = emit_week_start;
        self
    }

    /// ## Summary
    /// Builds options from loaded configuration, resolving the default zone
    /// through `lookup`.
    ///
    /// ## Errors
    /// Returns `RfcError::UnknownTimezone` if the configured zone does not resolve.
    pub fn from_config(config: &RecurrenceConfig, lookup: &dyn TimeZoneLookup) -> RfcResult<Self> {
        let default_zone = lookup
            .resolve(&config.default_zone)
            .ok_or_else(|| RfcError::UnknownTimezone(config.default_zone.clone()))?;

        Ok(Self::new(default_zone)
            .with_folding(config.fold_output_lines)
            .with_week_start(config.emit_week_start))
    }
}
