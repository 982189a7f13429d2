//! Geometric resampling to new dimensions.
//!
//! Nearest-neighbor maps destination `x` to `floor(x * sw / dw)`, computed in
//! integers so that an identity resize is exact for every size. Bilinear uses
//! an edge-to-edge mapping `gx = x / (dw - 1) * (sw - 1)` in `f32`, so the
//! destination corners land exactly on the source corners.

use enough::{Stop, Unstoppable};

use crate::error::{Failure, RasterError, ResultExt as _};
use crate::raster::{Raster, pixel_count};
use crate::transform::ByteConversion;

/// Resampling filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Bilinear,
}

impl Filter {
    /// Display title used when presenting the result.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Nearest => "Nearest neighbor",
            Self::Bilinear => "Bilinear",
        }
    }
}

/// What bilinear resampling does with a 1-pixel destination axis, where the
/// edge-to-edge mapping would divide by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DegenerateAxis {
    /// Fail with [`RasterError::InvalidParameter`].
    #[default]
    Reject,
    /// Sample every destination pixel on that axis at source coordinate 0.
    SampleOrigin,
}

/// A configured resampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resampler {
    filter: Filter,
    conversion: ByteConversion,
    degenerate_axis: DegenerateAxis,
}

impl Resampler {
    /// Truncating resampler that rejects 1-pixel bilinear axes.
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            conversion: ByteConversion::Truncate,
            degenerate_axis: DegenerateAxis::Reject,
        }
    }

    /// Shorthand for `Resampler::new(Filter::Nearest)`.
    pub fn nearest() -> Self {
        Self::new(Filter::Nearest)
    }

    /// Shorthand for `Resampler::new(Filter::Bilinear)`.
    pub fn bilinear() -> Self {
        Self::new(Filter::Bilinear)
    }

    /// Float-to-byte policy for bilinear output. Nearest copies samples and
    /// ignores it.
    pub fn with_conversion(mut self, conversion: ByteConversion) -> Self {
        self.conversion = conversion;
        self
    }

    /// Policy for a 1-pixel target axis under bilinear.
    pub fn with_degenerate_axis(mut self, policy: DegenerateAxis) -> Self {
        self.degenerate_axis = policy;
        self
    }

    /// The configured filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Resample `src` to `width` x `height`.
    pub fn resize(
        &self,
        src: &Raster,
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Raster, Failure> {
        self.resize_inner(src, width, height, &stop)
            .or_blank(width, height)
    }

    fn resize_inner(
        &self,
        src: &Raster,
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<Raster, RasterError> {
        let len = pixel_count(width, height)?;
        match self.filter {
            Filter::Nearest => nearest(src, width, height, len, stop),
            Filter::Bilinear => {
                if (width == 1 || height == 1) && self.degenerate_axis == DegenerateAxis::Reject {
                    return Err(RasterError::InvalidParameter(format!(
                        "bilinear target {width}x{height} has a 1-pixel axis"
                    )));
                }
                bilinear(src, width, height, len, self.conversion, stop)
            }
        }
    }
}

/// Nearest-neighbor resize.
pub fn resize_nearest(src: &Raster, width: u32, height: u32) -> Result<Raster, Failure> {
    Resampler::nearest().resize(src, width, height, Unstoppable)
}

/// Bilinear resize, truncating, rejecting 1-pixel target axes.
pub fn resize_bilinear(src: &Raster, width: u32, height: u32) -> Result<Raster, Failure> {
    Resampler::bilinear().resize(src, width, height, Unstoppable)
}

/// `floor(d * s / n)` clamped to `s - 1`.
fn nearest_index(d: u32, n: u32, s: u32) -> usize {
    let i = u64::from(d) * u64::from(s) / u64::from(n);
    i.min(u64::from(s) - 1) as usize
}

fn nearest(
    src: &Raster,
    width: u32,
    height: u32,
    len: usize,
    stop: &dyn Stop,
) -> Result<Raster, RasterError> {
    let (sw, sh) = src.dimensions();
    let columns: Vec<usize> = (0..width).map(|x| nearest_index(x, width, sw)).collect();
    let mut out = Vec::with_capacity(len);
    for y in 0..height {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row = src.row(nearest_index(y, height, sh) as u32);
        out.extend(columns.iter().map(|&sx| row[sx]));
    }
    Raster::new(out, width, height)
}

/// One destination coordinate's neighbors and weight.
#[derive(Clone, Copy)]
struct Tap {
    i0: usize,
    i1: usize,
    frac: f32,
}

fn bilinear_tap(d: u32, n: u32, s: u32) -> Tap {
    let g = if n > 1 {
        d as f32 / (n - 1) as f32 * (s - 1) as f32
    } else {
        0.0
    };
    let i0 = (g.floor() as usize).min(s as usize - 1);
    let i1 = (i0 + 1).min(s as usize - 1);
    Tap {
        i0,
        i1,
        frac: g - i0 as f32,
    }
}

fn bilinear(
    src: &Raster,
    width: u32,
    height: u32,
    len: usize,
    conversion: ByteConversion,
    stop: &dyn Stop,
) -> Result<Raster, RasterError> {
    let (sw, sh) = src.dimensions();
    let columns: Vec<Tap> = (0..width).map(|x| bilinear_tap(x, width, sw)).collect();
    let mut out = Vec::with_capacity(len);
    for y in 0..height {
        if y % 16 == 0 {
            stop.check()?;
        }
        let ty = bilinear_tap(y, height, sh);
        let r0 = src.row(ty.i0 as u32);
        let r1 = src.row(ty.i1 as u32);
        let dy = ty.frac;
        out.extend(columns.iter().map(|tx| {
            let dx = tx.frac;
            let v0 = (1.0 - dx) * f32::from(r0[tx.i0]) + dx * f32::from(r0[tx.i1]);
            let v1 = (1.0 - dx) * f32::from(r1[tx.i0]) + dx * f32::from(r1[tx.i1]);
            conversion.to_byte_f32((1.0 - dy) * v0 + dy * v1)
        }));
    }
    Raster::new(out, width, height)
}
