//! Synthesizes little-endian TIFF/JPEG byte streams with chosen EXIF tags.

use crate::metadata::Section;

pub const ASCII: u16 = 2;
pub const SHORT: u16 = 3;
pub const LONG: u16 = 4;
pub const RATIONAL: u16 = 5;

const EXIF_IFD_POINTER: u16 = 0x8769;
const GPS_IFD_POINTER: u16 = 0x8825;

#[derive(Clone)]
struct Entry {
    tag: u16,
    typ: u16,
    count: u32,
    data: Vec<u8>,
}

impl Entry {
    fn long(tag: u16, value: u32) -> Self {
        Entry {
            tag,
            typ: LONG,
            count: 1,
            data: value.to_le_bytes().to_vec(),
        }
    }
}

#[derive(Default)]
pub struct ExifBuilder {
    image: Vec<Entry>,
    capture: Vec<Entry>,
    gps: Vec<Entry>,
}

fn ifd_size(entries: usize) -> u32 {
    (2 + 12 * entries + 4) as u32
}

impl ExifBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, section: Section, tag: u16, typ: u16, count: u32, data: Vec<u8>) -> Self {
        let entry = Entry {
            tag,
            typ,
            count,
            data,
        };
        match section {
            Section::Image => self.image.push(entry),
            Section::Capture => self.capture.push(entry),
            Section::Gps => self.gps.push(entry),
            Section::Interop => panic!("interop IFD is not supported by the builder"),
        }
        self
    }

    pub fn ascii(self, section: Section, tag: u16, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        let count = data.len() as u32;
        self.raw(section, tag, ASCII, count, data)
    }

    pub fn rationals(self, section: Section, tag: u16, values: &[(u32, u32)]) -> Self {
        let mut data = Vec::with_capacity(values.len() * 8);
        for (num, denom) in values {
            data.extend_from_slice(&num.to_le_bytes());
            data.extend_from_slice(&denom.to_le_bytes());
        }
        self.raw(section, tag, RATIONAL, values.len() as u32, data)
    }

    /// Adds latitude and longitude as whole degrees, minutes and seconds.
    pub fn gps(
        self,
        lat: (u32, u32, u32),
        lat_ref: &str,
        lon: (u32, u32, u32),
        lon_ref: &str,
    ) -> Self {
        self.ascii(Section::Gps, 0x0001, lat_ref)
            .rationals(Section::Gps, 0x0002, &[(lat.0, 1), (lat.1, 1), (lat.2, 1)])
            .ascii(Section::Gps, 0x0003, lon_ref)
            .rationals(Section::Gps, 0x0004, &[(lon.0, 1), (lon.1, 1), (lon.2, 1)])
    }

    pub fn captured_at(self, text: &str) -> Self {
        self.ascii(Section::Capture, 0x9003, text)
    }

    pub fn tiff(&self) -> Vec<u8> {
        let has_exif = !self.capture.is_empty();
        let has_gps = !self.gps.is_empty();

        let mut ifd0 = self.image.clone();
        let ifd0_len = ifd_size(ifd0.len() + has_exif as usize + has_gps as usize);
        let exif_offset = 8 + ifd0_len;
        let exif_len = if has_exif { ifd_size(self.capture.len()) } else { 0 };
        let gps_offset = exif_offset + exif_len;
        let gps_len = if has_gps { ifd_size(self.gps.len()) } else { 0 };
        let data_offset = gps_offset + gps_len;

        if has_exif {
            ifd0.push(Entry::long(EXIF_IFD_POINTER, exif_offset));
        }
        if has_gps {
            ifd0.push(Entry::long(GPS_IFD_POINTER, gps_offset));
        }

        let mut out = b"II*\0".to_vec();
        out.extend_from_slice(&8u32.to_le_bytes());
        let mut data = Vec::new();
        write_ifd(&mut out, &mut data, data_offset, ifd0);
        if has_exif {
            write_ifd(&mut out, &mut data, data_offset, self.capture.clone());
        }
        if has_gps {
            write_ifd(&mut out, &mut data, data_offset, self.gps.clone());
        }
        out.extend_from_slice(&data);
        out
    }

    /// Wraps the TIFF stream in a minimal JPEG: SOI, APP1 "Exif", EOI.
    pub fn jpeg(&self) -> Vec<u8> {
        let tiff = self.tiff();
        let len = (2 + 6 + tiff.len()) as u16;
        let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&[0xFF, 0xD9]);
        out
    }
}

fn write_ifd(out: &mut Vec<u8>, data: &mut Vec<u8>, data_offset: u32, mut entries: Vec<Entry>) {
    entries.sort_by_key(|e| e.tag);
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.tag.to_le_bytes());
        out.extend_from_slice(&entry.typ.to_le_bytes());
        out.extend_from_slice(&entry.count.to_le_bytes());
        if entry.data.len() <= 4 {
            let mut inline = entry.data.clone();
            inline.resize(4, 0);
            out.extend_from_slice(&inline);
        } else {
            let offset = data_offset + data.len() as u32;
            out.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(&entry.data);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    out.extend_from_slice(&0u32.to_le_bytes());
}
