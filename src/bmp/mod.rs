//! 8-bit BMP container: header types, decoder, and encoder.
//!
//! Use [`crate::DecodeRequest`] or [`crate::decode_bmp`] to decode.

mod decode;
mod encode;
mod header;

pub use decode::BmpHeaders;
pub use header::{BmpFileHeader, BmpInfoHeader, PaletteEntry};

pub(crate) use decode::decode;

use crate::error::RasterError;
use crate::raster::Raster;
use enough::Stop;

/// How 8-bit samples are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmpLayout {
    /// A palette follows the info header; samples are indices into it and the
    /// gray level is the truncating mean of the entry's B, G, R.
    Palette,
    /// No palette; samples are gray levels.
    Direct,
}

/// Scanline storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Positive height, bottom row stored first.
    #[default]
    BottomUp,
    /// Negative height, top row stored first.
    TopDown,
}

/// Bytes per stored 8-bit scanline: `width` rounded up to a multiple of 4.
pub(crate) fn row_stride(width: u32) -> Option<usize> {
    (width as usize).checked_add(3).map(|n| n & !3)
}

/// Encode a raster as an uncompressed 8-bit BMP.
pub fn encode_gray8(
    raster: &Raster,
    layout: BmpLayout,
    order: RowOrder,
    stop: impl Stop,
) -> Result<Vec<u8>, RasterError> {
    encode::encode_gray8(raster, layout, order, &stop)
}
