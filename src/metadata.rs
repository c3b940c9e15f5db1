// src/metadata.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Logical group a tag was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Image,
    Capture,
    Gps,
    Interop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId {
    pub section: Section,
    pub code: u16,
}

impl TagId {
    pub const fn new(section: Section, code: u16) -> Self {
        Self { section, code }
    }
}

pub const DATE_TIME: TagId = TagId::new(Section::Image, 0x0132);
pub const DATE_TIME_ORIGINAL: TagId = TagId::new(Section::Capture, 0x9003);
pub const GPS_LATITUDE_REF: TagId = TagId::new(Section::Gps, 0x0001);
pub const GPS_LATITUDE: TagId = TagId::new(Section::Gps, 0x0002);
pub const GPS_LONGITUDE_REF: TagId = TagId::new(Section::Gps, 0x0003);
pub const GPS_LONGITUDE: TagId = TagId::new(Section::Gps, 0x0004);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedRational {
    pub num: i32,
    pub denom: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Unsigned(u32),
    SignedRational(SignedRational),
    Rationals(Vec<Rational>),
    Ascii(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_ref(text: &str, axis: Axis) -> Option<Self> {
        match (axis, text.trim()) {
            (Axis::Latitude, "N") => Some(Hemisphere::North),
            (Axis::Latitude, "S") => Some(Hemisphere::South),
            (Axis::Longitude, "E") => Some(Hemisphere::East),
            (Axis::Longitude, "W") => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// Degrees, minutes and seconds with a hemisphere reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpsAngle {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
    pub hemisphere: Hemisphere,
}

/// Tags extracted from one image, keyed by section and tag code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataMap {
    tags: BTreeMap<TagId, TagValue>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TagId, value: TagValue) {
        self.tags.insert(id, value);
    }

    pub fn get(&self, id: TagId) -> Option<&TagValue> {
        self.tags.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn ascii(&self, id: TagId) -> Option<&str> {
        match self.get(id) {
            Some(TagValue::Ascii(text)) => Some(text),
            _ => None,
        }
    }

    pub fn rationals(&self, id: TagId) -> Option<&[Rational]> {
        match self.get(id) {
            Some(TagValue::Rationals(values)) => Some(values),
            _ => None,
        }
    }

    pub fn unsigned(&self, id: TagId) -> Option<u32> {
        match self.get(id) {
            Some(TagValue::Unsigned(value)) => Some(*value),
            _ => None,
        }
    }

    /// Resolves a GPS angle from its value and reference tags.
    ///
    /// Returns `None` unless the value is exactly three rationals and the
    /// reference is a hemisphere letter valid for `axis`.
    pub fn gps_angle(&self, value: TagId, reference: TagId, axis: Axis) -> Option<GpsAngle> {
        let hemisphere = Hemisphere::from_ref(self.ascii(reference)?, axis)?;
        match self.rationals(value)? {
            [degrees, minutes, seconds] => Some(GpsAngle {
                degrees: *degrees,
                minutes: *minutes,
                seconds: *seconds,
                hemisphere,
            }),
            _ => None,
        }
    }

    /// Capture timestamp text, preferring `DateTimeOriginal` over `DateTime`.
    pub fn capture_timestamp(&self) -> Option<&str> {
        self.ascii(DATE_TIME_ORIGINAL).or_else(|| self.ascii(DATE_TIME))
    }
}

/// Accepted capture: signed decimal degrees and the capture instant.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CaptureRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub captured_at: DateTime<Utc>,
}

impl CaptureRecord {
    pub fn new(latitude: f64, longitude: f64, captured_at: DateTime<Utc>) -> Option<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
            captured_at,
        })
    }
}
