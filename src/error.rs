use exif::Error as ExifError;
use serde::Serialize;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Failure to read the metadata container or to convert one of its values.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("metadata container error: {0}")]
    Container(#[from] ExifError),

    #[error("rational component has a zero denominator")]
    ZeroDenominator,

    #[error("invalid hemisphere reference: {0:?}")]
    InvalidHemisphere(String),

    #[error("malformed capture timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("capture timestamp out of range: {0:?}")]
    TimestampOutOfRange(String),

    #[error("capture timestamp does not exist in local time: {0:?}")]
    NonexistentLocalTime(String),
}

/// Closed set of rejection classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NoMetadata,
    StaleCapture,
    OutOfRegion,
    Unknown,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn no_metadata(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoMetadata, message)
    }
}

impl From<ParseError> for ValidationError {
    // Malformed metadata is indistinguishable from absent metadata to callers.
    fn from(err: ParseError) -> Self {
        ValidationError::no_metadata(format!("Image metadata could not be read: {}", err))
    }
}

/// Errors of the command-line surface, outside the validation core.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] SerdeJsonError),
}
