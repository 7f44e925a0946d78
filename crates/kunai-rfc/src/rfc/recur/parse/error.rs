//! RECUR parse error types.

use std::fmt;

use crate::rfc::recur::core::RuleKey;

/// Result type for RECUR parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while reading a RECUR value.
///
/// Built once at the point of failure and propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The rule part the error refers to, if any.
    pub key: Option<RuleKey>,
    /// The offending raw text, if any.
    pub value: Option<String>,
    /// Additional context.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            key: None,
            value: None,
            message: message.into(),
        }
    }

    /// Attaches the rule part the error refers to.
    #[must_use]
    pub fn with_key(mut self, key: RuleKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Attaches the offending raw text.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Creates a structural error (empty input, malformed part, unknown or duplicate key).
    #[must_use]
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Structural, message)
    }

    /// Creates a field grammar/range error for `key=value`.
    #[must_use]
    pub fn field_range(key: RuleKey, value: &str) -> Self {
        Self::new(
            ParseErrorKind::FieldRange,
            format!("invalid {key} value: `{value}`"),
        )
        .with_key(key)
        .with_value(value)
    }

    /// Creates an unsupported frequency error.
    #[must_use]
    pub fn unsupported_frequency(value: &str) -> Self {
        Self::new(
            ParseErrorKind::UnsupportedFrequency,
            format!("frequency `{value}` is not supported"),
        )
        .with_key(RuleKey::Freq)
        .with_value(value)
    }

    /// Creates a COUNT/UNTIL conflict error.
    #[must_use]
    pub fn conflicting_end() -> Self {
        Self::new(
            ParseErrorKind::ConflictingEnd,
            "COUNT and UNTIL must not both be present",
        )
    }

    /// Creates an UNTIL format error.
    #[must_use]
    pub fn until_format(value: &str, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::UntilFormat, message)
            .with_key(RuleKey::Until)
            .with_value(value)
    }

    /// Creates an error for content with no locatable RRULE value.
    #[must_use]
    pub fn no_recur_value() -> Self {
        Self::new(
            ParseErrorKind::NoRecurValueFound,
            "no RRULE value found in content",
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Empty input, a part without `=`, an unknown key, a duplicate key or a missing FREQ.
    Structural,
    /// FREQ=SECONDLY.
    UnsupportedFrequency,
    /// A rule part value failed its grammar or range check.
    FieldRange,
    /// Both COUNT and UNTIL are present.
    ConflictingEnd,
    /// UNTIL matches none of its shapes, has invalid calendar fields or names an unknown zone.
    UntilFormat,
    /// Content-line extraction found no RRULE value.
    NoRecurValueFound,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => write!(f, "malformed rule"),
            Self::UnsupportedFrequency => write!(f, "unsupported frequency"),
            Self::FieldRange => write!(f, "invalid rule part value"),
            Self::ConflictingEnd => write!(f, "conflicting end"),
            Self::UntilFormat => write!(f, "invalid UNTIL"),
            Self::NoRecurValueFound => write!(f, "no recurrence value"),
        }
    }
}
