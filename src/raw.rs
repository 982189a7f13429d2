//! Headerless 8-bit grayscale decoder.
//!
//! The file is `width * height` bytes, row-major, top row first. Bytes past
//! that count are ignored.

use enough::Stop;

use crate::error::RasterError;
use crate::limits::{Limits, check_limits};
use crate::raster::{Raster, pixel_count};

pub(crate) fn decode(
    data: &[u8],
    width: u32,
    height: u32,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster, RasterError> {
    let needed = pixel_count(width, height)?;
    check_limits(limits, width, height, needed)?;
    stop.check()?;

    let pixels = data.get(..needed).ok_or(RasterError::TruncatedData {
        needed,
        actual: data.len(),
    })?;
    log::debug!("raw: {width}x{height}, {} trailing bytes ignored", data.len() - needed);
    Raster::new(pixels.to_vec(), width, height)
}
