use crate::config::ReferenceClock;
use crate::error::ParseError;
use crate::metadata::{GpsAngle, Rational};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Width of the EXIF `YYYY:MM:DD HH:MM:SS` timestamp.
const TIMESTAMP_LEN: usize = 19;

fn to_f64(value: Rational) -> Result<f64, ParseError> {
    if value.denom == 0 {
        return Err(ParseError::ZeroDenominator);
    }
    Ok(f64::from(value.num) / f64::from(value.denom))
}

/// Converts a degrees/minutes/seconds angle to signed decimal degrees.
pub fn dms_to_decimal(angle: &GpsAngle) -> Result<f64, ParseError> {
    let decimal =
        to_f64(angle.degrees)? + to_f64(angle.minutes)? / 60.0 + to_f64(angle.seconds)? / 3600.0;
    if angle.hemisphere.is_negative() {
        Ok(-decimal)
    } else {
        Ok(decimal)
    }
}

fn parse_naive(text: &str) -> Result<NaiveDateTime, ParseError> {
    let malformed = || ParseError::MalformedTimestamp(text.to_string());
    let bytes = text.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return Err(malformed());
    }
    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 | 13 | 16 => b == b':',
            10 => b == b' ',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err(malformed());
        }
    }

    let field = |start: usize, end: usize| -> u32 {
        bytes[start..end]
            .iter()
            .fold(0, |acc, &b| acc * 10 + u32::from(b - b'0'))
    };

    NaiveDate::from_ymd_opt(field(0, 4) as i32, field(5, 7), field(8, 10))
        .and_then(|date| date.and_hms_opt(field(11, 13), field(14, 16), field(17, 19)))
        .ok_or_else(|| ParseError::TimestampOutOfRange(text.to_string()))
}

/// Parses an EXIF capture timestamp, anchoring it with `clock`.
///
/// An ambiguous local time (DST fall-back) resolves to the earlier instant.
pub fn parse_capture_timestamp(
    text: &str,
    clock: ReferenceClock,
) -> Result<DateTime<Utc>, ParseError> {
    let naive = parse_naive(text)?;
    match clock {
        ReferenceClock::Utc => Ok(Utc.from_utc_datetime(&naive)),
        ReferenceClock::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| ParseError::NonexistentLocalTime(text.to_string())),
    }
}
