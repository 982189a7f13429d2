//! BMP encoder: uncompressed 8-bit gray, palette-indexed or direct.

use enough::Stop;

use super::header::{FILE_HEADER_LEN, INFO_HEADER_LEN, PALETTE_ENTRIES, PALETTE_ENTRY_LEN};
use super::{BmpLayout, RowOrder, row_stride};
use crate::error::RasterError;
use crate::raster::Raster;

/// Encode a raster as an 8-bit BMP.
///
/// `Palette` writes an identity gray palette (entry `i` is `(i, i, i)`), so
/// indices and gray levels coincide.
pub(crate) fn encode_gray8(
    raster: &Raster,
    layout: BmpLayout,
    order: RowOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, RasterError> {
    let (width, height) = raster.dimensions();
    let w = width as usize;

    let stride = row_stride(width).ok_or(RasterError::DimensionsTooLarge { width, height })?;
    let pixel_data_size = stride
        .checked_mul(height as usize)
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    let palette_size = match layout {
        BmpLayout::Palette => PALETTE_ENTRIES * PALETTE_ENTRY_LEN,
        BmpLayout::Direct => 0,
    };
    let data_offset = FILE_HEADER_LEN + INFO_HEADER_LEN + palette_size;
    let file_size = pixel_data_size
        .checked_add(data_offset)
        .filter(|&n| u32::try_from(n).is_ok())
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    let signed_width = i32::try_from(width).map_err(|_| RasterError::DimensionsTooLarge {
        width,
        height,
    })?;
    let signed_height = i32::try_from(height).map_err(|_| RasterError::DimensionsTooLarge {
        width,
        height,
    })?;
    let stored_height = match order {
        RowOrder::BottomUp => signed_height,
        RowOrder::TopDown => -signed_height,
    };

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);

    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());

    // BITMAPINFOHEADER (40 bytes)
    out.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&signed_width.to_le_bytes());
    out.extend_from_slice(&stored_height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&8u16.to_le_bytes()); // bit count
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    if layout == BmpLayout::Palette {
        for level in 0..=255u8 {
            out.extend_from_slice(&[level, level, level, 0]);
        }
    }

    let pad_bytes = stride - w;
    let mut write_row = |row_idx: usize, row: &[u8]| -> Result<(), RasterError> {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(row);
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
        Ok(())
    };
    match order {
        RowOrder::BottomUp => {
            for (i, row) in raster.rows().rev().enumerate() {
                write_row(i, row)?;
            }
        }
        RowOrder::TopDown => {
            for (i, row) in raster.rows().enumerate() {
                write_row(i, row)?;
            }
        }
    }

    Ok(out)
}
