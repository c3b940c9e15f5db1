//! Capture-authenticity policy.
//!
//! A submitted photo is accepted only when its embedded metadata carries a
//! GPS fix and a capture timestamp, the capture is younger than the freshness
//! window, and the fix lies inside the geofence. Checks run in that order and
//! stop at the first failure.

use chrono::{DateTime, Utc};

use crate::config::ValidatorConfig;
use crate::error::{ErrorKind, ValidationError};
use crate::extractor::extract;
use crate::geotime::{dms_to_decimal, parse_capture_timestamp};
use crate::metadata::{
    Axis, CaptureRecord, MetadataMap, GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE,
    GPS_LONGITUDE_REF,
};

#[derive(Debug, Clone, Default)]
pub struct CaptureValidator {
    config: ValidatorConfig,
}

impl CaptureValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `bytes` against the current system time.
    pub fn validate(&self, bytes: &[u8]) -> Result<CaptureRecord, ValidationError> {
        self.validate_at(bytes, Utc::now())
    }

    /// Validates `bytes` as if the current instant were `now`.
    pub fn validate_at(
        &self,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> Result<CaptureRecord, ValidationError> {
        let metadata = extract(bytes)?;
        let (latitude, longitude, captured_at) = self.resolve(&metadata)?;
        log::debug!(
            "Resolved capture at ({}, {}) taken {}",
            latitude,
            longitude,
            captured_at
        );

        self.check_freshness(captured_at, now)?;
        self.check_region(latitude, longitude)?;

        let record = CaptureRecord::new(latitude, longitude, captured_at).ok_or_else(|| {
            ValidationError::new(
                ErrorKind::Unknown,
                format!(
                    "Coordinates ({}, {}) passed the geofence but are not valid degrees",
                    latitude, longitude
                ),
            )
        })?;
        log::info!(
            "Accepted capture at ({}, {}) taken {}",
            record.latitude,
            record.longitude,
            record.captured_at
        );
        Ok(record)
    }

    fn resolve(
        &self,
        metadata: &MetadataMap,
    ) -> Result<(f64, f64, DateTime<Utc>), ValidationError> {
        let latitude = metadata.gps_angle(GPS_LATITUDE, GPS_LATITUDE_REF, Axis::Latitude);
        let longitude = metadata.gps_angle(GPS_LONGITUDE, GPS_LONGITUDE_REF, Axis::Longitude);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            log::debug!("GPS latitude or longitude missing");
            return Err(ValidationError::no_metadata("No GPS data found in image"));
        };
        let Some(timestamp) = metadata.capture_timestamp() else {
            log::debug!("Capture timestamp missing");
            return Err(ValidationError::no_metadata("No timestamp found in image"));
        };

        let latitude = dms_to_decimal(&latitude)?;
        let longitude = dms_to_decimal(&longitude)?;
        let captured_at = parse_capture_timestamp(timestamp, self.config.reference_clock)?;
        Ok((latitude, longitude, captured_at))
    }

    // Only the age is bounded; captures in the future pass.
    fn check_freshness(
        &self,
        captured_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let window_hours = self.config.freshness_window_hours;
        let age_seconds = (now - captured_at).num_seconds();
        if age_seconds >= window_hours.saturating_mul(3600) {
            log::debug!("Capture is {}s old, window is {}h", age_seconds, window_hours);
            return Err(ValidationError::new(
                ErrorKind::StaleCapture,
                format!("Image is older than {} hours", window_hours),
            ));
        }
        Ok(())
    }

    fn check_region(&self, latitude: f64, longitude: f64) -> Result<(), ValidationError> {
        if !self.config.geofence.contains(latitude, longitude) {
            log::debug!("({}, {}) is outside {:?}", latitude, longitude, self.config.geofence);
            return Err(ValidationError::new(
                ErrorKind::OutOfRegion,
                format!(
                    "Image was taken outside the permitted region ({:.4}, {:.4})",
                    latitude, longitude
                ),
            ));
        }
        Ok(())
    }
}
