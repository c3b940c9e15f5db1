use crate::error::ParseError;
use crate::metadata::{MetadataMap, Rational, Section, SignedRational, TagId, TagValue};
use exif::{Context, In, Reader, Value};
use std::io::Cursor;

/// Parses the EXIF container embedded in `bytes` into a tag map.
///
/// Accepts any container `kamadak-exif` recognizes (JPEG, TIFF, HEIF, PNG,
/// WebP). Only primary-image fields are kept. Entries whose type or count do
/// not fit a [`TagValue`] variant are left out of the map rather than coerced.
pub fn extract(bytes: &[u8]) -> Result<MetadataMap, ParseError> {
    log::trace!("Reading metadata container from {} bytes", bytes.len());
    let exif = Reader::new().read_from_container(&mut Cursor::new(bytes))?;

    let mut metadata = MetadataMap::new();
    for field in exif.fields() {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        let Some(section) = section_of(field.tag.context()) else {
            continue;
        };
        match convert_value(&field.value) {
            Some(value) => {
                log::trace!("Tag {} ({:?}): {:?}", field.tag, section, value);
                metadata.insert(TagId::new(section, field.tag.number()), value);
            }
            None => log::debug!("Skipping tag {} with unsupported type or count", field.tag),
        }
    }

    log::debug!("Extracted {} metadata tags", metadata.len());
    Ok(metadata)
}

#[allow(unreachable_patterns)]
fn section_of(context: Context) -> Option<Section> {
    match context {
        Context::Tiff => Some(Section::Image),
        Context::Exif => Some(Section::Capture),
        Context::Gps => Some(Section::Gps),
        Context::Interop => Some(Section::Interop),
        _ => None,
    }
}

fn convert_value(value: &Value) -> Option<TagValue> {
    match value {
        Value::Byte(v) if v.len() == 1 => Some(TagValue::Unsigned(u32::from(v[0]))),
        Value::Short(v) if v.len() == 1 => Some(TagValue::Unsigned(u32::from(v[0]))),
        Value::Long(v) if v.len() == 1 => Some(TagValue::Unsigned(v[0])),
        Value::SRational(v) if v.len() == 1 => Some(TagValue::SignedRational(SignedRational {
            num: v[0].num,
            denom: v[0].denom,
        })),
        Value::Rational(v) if !v.is_empty() => Some(TagValue::Rationals(
            v.iter()
                .map(|r| Rational {
                    num: r.num,
                    denom: r.denom,
                })
                .collect(),
        )),
        Value::Ascii(v) if v.len() == 1 => String::from_utf8(v[0].clone()).ok().map(TagValue::Ascii),
        _ => None,
    }
}
