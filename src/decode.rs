use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::container::ContainerKind;
use crate::error::{Failure, RasterError, ResultExt as _};
use crate::limits::Limits;
use crate::raster::Raster;

/// Decode a BMP or RAW byte buffer into a raster of an expected shape.
///
/// Decoded dimensions must match the expected ones; a mismatch is an error,
/// never a crop or pad. Every error comes back as a [`Failure`] whose
/// [`Failure::blank`] is the all-zero raster of the expected shape.
///
/// ```no_run
/// use grayraster::{ContainerKind, DecodeRequest, Limits, Unstoppable};
///
/// let data = std::fs::read("images/boat.bmp")?;
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let raster = DecodeRequest::new(&data, ContainerKind::Bmp, 512, 512)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(raster.dimensions(), (512, 512));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    kind: ContainerKind,
    width: u32,
    height: u32,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8], kind: ContainerKind, width: u32, height: u32) -> Self {
        Self {
            data,
            kind,
            width,
            height,
            limits: None,
        }
    }

    pub fn bmp(data: &'a [u8], width: u32, height: u32) -> Self {
        Self::new(data, ContainerKind::Bmp, width, height)
    }

    pub fn raw(data: &'a [u8], width: u32, height: u32) -> Self {
        Self::new(data, ContainerKind::Raw, width, height)
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(&self, stop: impl Stop) -> Result<Raster, Failure> {
        let result = match self.kind {
            ContainerKind::Bmp => {
                crate::bmp::decode(self.data, self.width, self.height, self.limits, &stop)
            }
            ContainerKind::Raw => {
                crate::raw::decode(self.data, self.width, self.height, self.limits, &stop)
            }
        };
        result.or_blank(self.width, self.height)
    }
}

/// Decode an 8-bit BMP of the given shape.
pub fn decode_bmp(data: &[u8], width: u32, height: u32) -> Result<Raster, Failure> {
    DecodeRequest::bmp(data, width, height).decode(Unstoppable)
}

/// Decode a headerless RAW buffer of the given shape.
pub fn decode_raw(data: &[u8], width: u32, height: u32) -> Result<Raster, Failure> {
    DecodeRequest::raw(data, width, height).decode(Unstoppable)
}

/// Read and decode a file. The container is taken from the file extension,
/// falling back to content sniffing.
pub fn read_file(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Raster, Failure> {
    read_file_with(path.as_ref(), width, height, None)
}

pub(crate) fn read_file_with(
    path: &Path,
    width: u32,
    height: u32,
    limits: Option<&Limits>,
) -> Result<Raster, Failure> {
    let data = std::fs::read(path)
        .map_err(RasterError::from)
        .or_blank(width, height)?;
    let kind = ContainerKind::classify(path, &data);
    log::debug!("{}: {kind:?}, {} bytes", path.display(), data.len());
    let mut request = DecodeRequest::new(&data, kind, width, height);
    if let Some(limits) = limits {
        request = request.with_limits(limits);
    }
    request.decode(Unstoppable)
}
