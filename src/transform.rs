//! Point transforms: each output sample depends only on the input sample at
//! the same position, so every transform is a 256-entry lookup table.

use crate::error::{Failure, RasterError, ResultExt as _};
use crate::raster::Raster;

/// Float-to-byte conversion policy shared by transforms and bilinear
/// resampling. Results are clamped to `0..=255` before conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ByteConversion {
    /// Truncate toward zero.
    #[default]
    Truncate,
    /// Round half away from zero.
    Round,
}

impl ByteConversion {
    pub(crate) fn to_byte_f64(self, v: f64) -> u8 {
        let v = match self {
            Self::Truncate => v.trunc(),
            Self::Round => v.round(),
        };
        v.clamp(0.0, 255.0) as u8
    }

    pub(crate) fn to_byte_f32(self, v: f32) -> u8 {
        let v = match self {
            Self::Truncate => v.trunc(),
            Self::Round => v.round(),
        };
        v.clamp(0.0, 255.0) as u8
    }
}

/// A stateless per-sample intensity mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointTransform {
    /// `255 - v`.
    Negative,
    /// `c * ln(1 + v)` with `c = 255 / ln(256)`.
    Log,
    /// `255 * (v / 255)^gamma`, `gamma > 0`.
    Gamma(f64),
}

impl PointTransform {
    /// Display title used when presenting the result.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Negative => "Negative transform",
            Self::Log => "Log transform",
            Self::Gamma(_) => "Gamma transform",
        }
    }

    fn validate(&self) -> Result<(), RasterError> {
        match *self {
            Self::Gamma(g) if !(g.is_finite() && g > 0.0) => Err(RasterError::InvalidParameter(
                format!("gamma must be positive and finite, got {g}"),
            )),
            _ => Ok(()),
        }
    }

    /// Output value for every possible input value.
    pub fn lookup_table(&self, conversion: ByteConversion) -> Result<[u8; 256], RasterError> {
        self.validate()?;
        Ok(match *self {
            Self::Negative => negative_table(),
            Self::Log => log_table(conversion),
            Self::Gamma(gamma) => gamma_table(gamma, conversion),
        })
    }

    /// Apply with truncating conversion.
    pub fn apply(&self, src: &Raster) -> Result<Raster, Failure> {
        self.apply_with(src, ByteConversion::Truncate)
    }

    pub fn apply_with(&self, src: &Raster, conversion: ByteConversion) -> Result<Raster, Failure> {
        let (w, h) = src.dimensions();
        let table = self.lookup_table(conversion).or_blank(w, h)?;
        Ok(src.map(|v| table[usize::from(v)]))
    }
}

fn negative_table() -> [u8; 256] {
    core::array::from_fn(|v| 255 - v as u8)
}

fn log_table(conversion: ByteConversion) -> [u8; 256] {
    let c = 255.0 / (1.0 + 255.0f64).ln();
    core::array::from_fn(|v| conversion.to_byte_f64(c * (1.0 + v as f64).ln()))
}

fn gamma_table(gamma: f64, conversion: ByteConversion) -> [u8; 256] {
    core::array::from_fn(|v| conversion.to_byte_f64(255.0 * (v as f64 / 255.0).powf(gamma)))
}

/// `255 - v` for every sample.
pub fn negative(src: &Raster) -> Raster {
    src.map(|v| 255 - v)
}

/// Logarithmic transform, truncating.
pub fn log(src: &Raster) -> Raster {
    let table = log_table(ByteConversion::Truncate);
    src.map(|v| table[usize::from(v)])
}

/// Gamma transform, truncating. Fails for non-positive or non-finite `gamma`.
pub fn gamma(src: &Raster, gamma: f64) -> Result<Raster, Failure> {
    PointTransform::Gamma(gamma).apply(src)
}
