//! Display seam.
//!
//! Rendering a raster (and any waiting for a user to dismiss it) lives behind
//! [`Presenter`], so the pipeline runs headless in tests.

use crate::error::RasterError;
use crate::raster::Raster;

/// Consumes a finished raster. Dimensions travel with the raster.
///
/// An implementation may block until the user dismisses the output.
pub trait Presenter {
    fn present(&mut self, raster: &Raster, title: &str) -> Result<(), RasterError>;
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, raster: &Raster, title: &str) -> Result<(), RasterError> {
        (**self).present(raster, title)
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _raster: &Raster, _title: &str) -> Result<(), RasterError> {
        Ok(())
    }
}

/// Keeps a copy of every presented raster, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    pub presented: Vec<(String, Raster)>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.presented.iter().map(|(t, _)| t.as_str())
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, raster: &Raster, title: &str) -> Result<(), RasterError> {
        self.presented.push((title.to_owned(), raster.clone()));
        Ok(())
    }
}
