use enough::StopReason;

use crate::raster::Raster;

/// Errors from decoding, transforming, and resampling rasters.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RasterError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("format mismatch: {0}")]
    FormatMismatch(String),

    #[error("truncated data: need {needed} bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for RasterError {
    fn from(r: StopReason) -> Self {
        RasterError::Cancelled(r)
    }
}

/// A failed decode, transform, or resample.
///
/// Carries the error together with the shape the caller asked for, so the
/// caller can always fall back to a well-defined all-zero raster instead of
/// partially written output.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct Failure {
    #[source]
    error: RasterError,
    width: u32,
    height: u32,
}

impl Failure {
    pub(crate) fn new(error: RasterError, width: u32, height: u32) -> Self {
        Self {
            error,
            width,
            height,
        }
    }

    /// What went wrong.
    pub fn error(&self) -> &RasterError {
        &self.error
    }

    /// Drop the requested shape and keep the error.
    pub fn into_error(self) -> RasterError {
        self.error
    }

    /// The requested `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// All-zero raster of the requested shape.
    ///
    /// `None` when the requested shape cannot be represented (a zero
    /// dimension, or a pixel count that overflows `usize`).
    pub fn blank(&self) -> Option<Raster> {
        Raster::zeroed(self.width, self.height).ok()
    }
}

impl From<Failure> for RasterError {
    fn from(f: Failure) -> Self {
        f.error
    }
}

pub(crate) trait ResultExt<T> {
    /// Attach the requested shape to an error.
    fn or_blank(self, width: u32, height: u32) -> Result<T, Failure>;
}

impl<T> ResultExt<T> for Result<T, RasterError> {
    fn or_blank(self, width: u32, height: u32) -> Result<T, Failure> {
        self.map_err(|e| Failure::new(e, width, height))
    }
}
