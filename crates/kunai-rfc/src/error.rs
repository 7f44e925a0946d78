use thiserror::Error;

use crate::rfc::recur::expand::ConversionError;
use crate::rfc::recur::parse::ParseError;

/// RFC parsing and validation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Timezone conversion error: {0}")]
    ConversionError(#[from] ConversionError),

    #[error("RRule validation error: {0}")]
    RRuleError(#[from] rrule::RRuleError),

    #[error("Not supported by occurrence expansion: {0}")]
    ExpansionUnsupported(String),

    #[error(transparent)]
    CoreError(#[from] kunai_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
