//! 8-bit BMP decoder.
//!
//! Both 8-bit layouts (palette-indexed and direct gray) go through the same
//! row loop; they differ only in the 256-entry lookup table built from the
//! header. Rows are always read at a 4-byte aligned stride.

use enough::Stop;

use super::header::{
    BmpFileHeader, BmpInfoHeader, Cursor, FILE_HEADER_LEN, PALETTE_ENTRIES, PALETTE_ENTRY_LEN,
    PaletteEntry,
};
use super::{BmpLayout, RowOrder, row_stride};
use crate::error::RasterError;
use crate::limits::{Limits, check_limits};
use crate::raster::{Raster, pixel_count};

/// Parsed BMP headers, before any pixel data is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeaders {
    pub file: BmpFileHeader,
    pub info: BmpInfoHeader,
}

impl BmpHeaders {
    /// Parse the file header and info header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, RasterError> {
        let mut cur = Cursor::new(data);
        let file = BmpFileHeader::parse(&mut cur)?;
        let info = BmpInfoHeader::parse(&mut cur)?;
        Ok(Self { file, info })
    }

    fn palette_start(&self) -> usize {
        FILE_HEADER_LEN.saturating_add(self.info.header_size as usize)
    }

    /// Bytes between the end of the info header and the first scanline.
    fn palette_gap(&self) -> usize {
        (self.file.pixel_offset as usize).saturating_sub(self.palette_start())
    }

    /// Palette entries to read.
    ///
    /// A gap that holds a full 256-entry table is always read in full,
    /// whatever `colors_used` says. A smaller gap is read as a short
    /// palette of `colors_used` entries when it fits, otherwise there is
    /// no palette.
    pub fn palette_len(&self) -> usize {
        let gap = self.palette_gap();
        if gap >= PALETTE_ENTRIES * PALETTE_ENTRY_LEN {
            return PALETTE_ENTRIES;
        }
        match self.info.colors_used as usize {
            n @ 1..PALETTE_ENTRIES if gap >= n * PALETTE_ENTRY_LEN => n,
            _ => 0,
        }
    }

    /// Palette-indexed when the pixel offset leaves room for a palette
    /// between the info header and the first scanline.
    pub fn layout(&self) -> BmpLayout {
        if self.palette_len() > 0 {
            BmpLayout::Palette
        } else {
            BmpLayout::Direct
        }
    }

    pub fn row_order(&self) -> RowOrder {
        if self.info.is_bottom_up() {
            RowOrder::BottomUp
        } else {
            RowOrder::TopDown
        }
    }

    /// Logical `(width, height)` as declared; the height sign only selects
    /// row order.
    pub fn dimensions(&self) -> (i64, u32) {
        (i64::from(self.info.width), self.info.height.unsigned_abs())
    }

    /// Check bit depth, then geometry, then compression.
    fn validate(&self, width: u32, height: u32) -> Result<(), RasterError> {
        if self.info.bit_count != 8 {
            return Err(RasterError::FormatMismatch(format!(
                "BMP bit count is {}, only 8 is supported",
                self.info.bit_count
            )));
        }
        let (w, h) = self.dimensions();
        if w != i64::from(width) || h != height {
            return Err(RasterError::FormatMismatch(format!(
                "BMP is {w}x{h}, expected {width}x{height}"
            )));
        }
        if self.info.compression != 0 {
            return Err(RasterError::FormatMismatch(format!(
                "BMP compression {} unsupported",
                self.info.compression
            )));
        }
        Ok(())
    }

    /// Read the [`palette_len`](Self::palette_len) palette entries.
    pub fn read_palette(&self, data: &[u8]) -> Result<Vec<PaletteEntry>, RasterError> {
        let mut cur = Cursor::new(data);
        cur.set_position(self.palette_start())?;
        (0..self.palette_len())
            .map(|_| {
                let [blue, green, red, reserved] = cur.read_fixed_bytes::<4>()?;
                Ok(PaletteEntry {
                    blue,
                    green,
                    red,
                    reserved,
                })
            })
            .collect()
    }

    /// Map from stored byte to gray level.
    fn gray_table(&self, data: &[u8]) -> Result<[u8; 256], RasterError> {
        let mut table = [0u8; 256];
        match self.layout() {
            BmpLayout::Palette => {
                // Indices past a short palette stay black.
                for (slot, entry) in table.iter_mut().zip(self.read_palette(data)?) {
                    *slot = entry.luma();
                }
            }
            BmpLayout::Direct => {
                for (i, slot) in table.iter_mut().enumerate() {
                    *slot = i as u8;
                }
            }
        }
        Ok(table)
    }
}

/// Decode an 8-bit BMP whose geometry must be exactly `width` x `height`.
pub(crate) fn decode(
    data: &[u8],
    width: u32,
    height: u32,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster, RasterError> {
    let len = pixel_count(width, height)?;
    check_limits(limits, width, height, len)?;

    let headers = BmpHeaders::parse(data)?;
    headers.validate(width, height)?;
    let layout = headers.layout();
    let order = headers.row_order();
    log::debug!(
        "bmp: {width}x{height} {layout:?} {order:?}, pixel offset {}",
        headers.file.pixel_offset
    );

    let table = headers.gray_table(data)?;
    let w = width as usize;
    let stride = row_stride(width).ok_or(RasterError::DimensionsTooLarge { width, height })?;
    let offset = headers.file.pixel_offset as usize;
    // The final row's padding may be missing.
    let end = stride
        .checked_mul(height as usize - 1)
        .and_then(|n| n.checked_add(offset))
        .and_then(|n| n.checked_add(w))
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    if data.len() < end {
        return Err(RasterError::TruncatedData {
            needed: end,
            actual: data.len(),
        });
    }

    stop.check()?;
    let scanlines = data[offset..].chunks(stride);
    let mut pixels = vec![0u8; len];
    match order {
        RowOrder::BottomUp => fill_rows(pixels.rchunks_exact_mut(w), scanlines, &table, stop)?,
        RowOrder::TopDown => fill_rows(pixels.chunks_exact_mut(w), scanlines, &table, stop)?,
    }
    Raster::new(pixels, width, height)
}

fn fill_rows<'a, 'b>(
    out_rows: impl Iterator<Item = &'a mut [u8]>,
    scanlines: impl Iterator<Item = &'b [u8]>,
    table: &[u8; 256],
    stop: &dyn Stop,
) -> Result<(), RasterError> {
    for (row_idx, (out, line)) in out_rows.zip(scanlines).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (dst, &src) in out.iter_mut().zip(line) {
            *dst = table[usize::from(src)];
        }
    }
    Ok(())
}
