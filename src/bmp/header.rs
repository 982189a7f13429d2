//! BMP file header, BITMAPINFOHEADER, and palette parsing.

use crate::error::RasterError;

pub(crate) const FILE_HEADER_LEN: usize = 14;
pub(crate) const INFO_HEADER_LEN: usize = 40;
pub(crate) const PALETTE_ENTRIES: usize = 256;
pub(crate) const PALETTE_ENTRY_LEN: usize = 4;

/// Little-endian reader over a byte slice.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), RasterError> {
        if pos > self.data.len() {
            return Err(RasterError::TruncatedData {
                needed: pos,
                actual: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], RasterError> {
        let end = self.pos.checked_add(N).ok_or(RasterError::TruncatedData {
            needed: usize::MAX,
            actual: self.data.len(),
        })?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(RasterError::TruncatedData {
                needed: end,
                actual: self.data.len(),
            })?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, RasterError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, RasterError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, RasterError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

/// The 14-byte BITMAPFILEHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpFileHeader {
    /// Always `*b"BM"` once parsed.
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset from the start of the file to the first scanline.
    pub pixel_offset: u32,
}

impl BmpFileHeader {
    pub(crate) fn parse(cur: &mut Cursor<'_>) -> Result<Self, RasterError> {
        let signature = cur.read_fixed_bytes::<2>()?;
        if &signature != b"BM" {
            return Err(RasterError::FormatMismatch(format!(
                "bad BMP signature {signature:02x?}"
            )));
        }
        Ok(Self {
            signature,
            file_size: cur.get_u32_le()?,
            reserved1: cur.get_u16_le()?,
            reserved2: cur.get_u16_le()?,
            pixel_offset: cur.get_u32_le()?,
        })
    }
}

/// The 40-byte BITMAPINFOHEADER. Larger (V4/V5) headers are accepted; only
/// their leading 40 bytes are read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive: rows stored bottom-up. Negative: top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BmpInfoHeader {
    pub(crate) fn parse(cur: &mut Cursor<'_>) -> Result<Self, RasterError> {
        let header_size = cur.get_u32_le()?;
        if (header_size as usize) < INFO_HEADER_LEN {
            return Err(RasterError::FormatMismatch(format!(
                "BMP info header size {header_size}, need at least {INFO_HEADER_LEN}"
            )));
        }
        Ok(Self {
            header_size,
            width: cur.get_i32_le()?,
            height: cur.get_i32_le()?,
            planes: cur.get_u16_le()?,
            bit_count: cur.get_u16_le()?,
            compression: cur.get_u32_le()?,
            image_size: cur.get_u32_le()?,
            x_pels_per_meter: cur.get_i32_le()?,
            y_pels_per_meter: cur.get_i32_le()?,
            colors_used: cur.get_u32_le()?,
            colors_important: cur.get_u32_le()?,
        })
    }

    /// Rows are stored bottom row first.
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }
}

/// One palette slot as stored on disk: blue, green, red, reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl PaletteEntry {
    pub const fn gray(level: u8) -> Self {
        Self {
            blue: level,
            green: level,
            red: level,
            reserved: 0,
        }
    }

    /// Truncating mean of the three color components.
    pub fn luma(&self) -> u8 {
        ((u16::from(self.blue) + u16::from(self.green) + u16::from(self.red)) / 3) as u8
    }
}
