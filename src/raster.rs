use core::fmt;

use crate::error::RasterError;

/// An 8-bit grayscale image, row-major, row 0 is the topmost row.
///
/// The buffer always holds exactly `width * height` samples and both
/// dimensions are non-zero. Operations never mutate a raster in place; they
/// return a new one, so a decoded source can feed any number of outputs.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

/// Number of samples in a `width` x `height` raster.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidParameter(format!(
            "raster dimensions must be positive, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(RasterError::DimensionsTooLarge { width, height })
}

impl Raster {
    /// Wrap an existing sample buffer.
    ///
    /// Fails with [`RasterError::InvalidParameter`] when a dimension is zero
    /// or `pixels.len() != width * height`.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, RasterError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(RasterError::InvalidParameter(format!(
                "buffer holds {} samples, {width}x{height} needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// All-zero raster.
    pub fn zeroed(width: u32, height: u32) -> Result<Self, RasterError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            pixels: vec![0u8; len],
            width,
            height,
        })
    }

    /// Build a raster by evaluating `f(x, y)` for every sample.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> u8,
    ) -> Result<Self, RasterError> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major samples, `width * height` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the sample buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Sample at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Row `y`. Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    pub fn rows(&self) -> core::slice::ChunksExact<'_, u8> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Apply `f` to every sample, producing a raster of the same shape.
    pub fn map(&self, f: impl Fn(u8) -> u8) -> Raster {
        Raster {
            pixels: self.pixels.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// The `size` x `size` block centered on the raster, clipped to its bounds.
    pub fn center_window(&self, size: u32) -> CenterWindow<'_> {
        let w = size.min(self.width);
        let h = size.min(self.height);
        let x0 = (self.width / 2).saturating_sub(size / 2).min(self.width - w);
        let y0 = (self.height / 2).saturating_sub(size / 2).min(self.height - h);
        CenterWindow {
            raster: self,
            x0,
            y0,
            width: w,
            height: h,
        }
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, u8> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.pixels.len())
            .finish()
    }
}

/// A rectangular excerpt of a raster, printed as a grid of sample values.
#[derive(Clone, Copy, Debug)]
pub struct CenterWindow<'a> {
    raster: &'a Raster,
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
}

impl CenterWindow<'_> {
    /// Top-left corner of the window in raster coordinates.
    pub fn origin(&self) -> (u32, u32) {
        (self.x0, self.y0)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let x0 = self.x0 as usize;
        let w = self.width as usize;
        (self.y0..self.y0 + self.height).map(move |y| &self.raster.row(y)[x0..x0 + w])
    }
}

impl fmt::Display for CenterWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for v in row {
                write!(f, "{v:3} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
