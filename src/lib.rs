//! Capture-authenticity validation for submitted wildlife photos.
//!
//! Extracts the GPS fix and capture time embedded in an image's EXIF
//! metadata and decides whether the photo is recent enough and was taken
//! inside the configured region.

pub mod config;
pub mod error;
pub mod extractor;
pub mod geotime;
pub mod metadata;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use config::{Geofence, ReferenceClock, ValidatorConfig};
pub use error::{AppError, ErrorKind, ParseError, ValidationError};
pub use extractor::extract;
pub use geotime::{dms_to_decimal, parse_capture_timestamp};
pub use metadata::{CaptureRecord, GpsAngle, MetadataMap, TagId, TagValue};
pub use validator::CaptureValidator;
