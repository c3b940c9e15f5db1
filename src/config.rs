use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// How a timezone-less capture timestamp is anchored to an absolute instant.
///
/// EXIF `DateTimeOriginal` carries no offset. `Local` compares it against the
/// validation host's wall clock, which is only correct when the camera and the
/// host share a timezone. `Utc` treats the text as UTC.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceClock {
    #[default]
    Local,
    Utc,
}

impl std::str::FromStr for ReferenceClock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(ReferenceClock::Local),
            "utc" => Ok(ReferenceClock::Utc),
            other => Err(format!("unknown reference clock: {}", other)),
        }
    }
}

/// Inclusive latitude/longitude bounding box.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Geofence {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Geofence {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        !(latitude < self.min_latitude
            || latitude > self.max_latitude
            || longitude < self.min_longitude
            || longitude > self.max_longitude)
    }
}

impl Default for Geofence {
    fn default() -> Self {
        Self {
            min_latitude: -35.0,
            max_latitude: 37.5,
            min_longitude: -25.0,
            max_longitude: 50.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ValidatorConfig {
    pub log_level: String,
    pub freshness_window_hours: i64,
    pub reference_clock: ReferenceClock,
    pub geofence: Geofence,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            freshness_window_hours: 24,
            reference_clock: ReferenceClock::default(),
            geofence: Geofence::default(),
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let defaults = Geofence::default();

        let s = Config::builder()
            .set_default("log_level", "info")?
            .set_default("freshness_window_hours", 24_i64)?
            .set_default("reference_clock", "local")?
            .set_default("geofence.min_latitude", defaults.min_latitude)?
            .set_default("geofence.max_latitude", defaults.max_latitude)?
            .set_default("geofence.min_longitude", defaults.min_longitude)?
            .set_default("geofence.max_longitude", defaults.max_longitude)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("CAPTURE_VALIDATOR").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
