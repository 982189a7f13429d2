//! # grayraster
//!
//! 8-bit grayscale image decoding, point transforms, and resampling.
//!
//! ## Supported Containers
//!
//! - **BMP**, 8 bits per pixel, uncompressed. Palette-indexed files are
//!   converted to gray with a truncating `(B + G + R) / 3`; palette-less files
//!   are read as gray directly. Rows are read at their 4-byte aligned stride
//!   and both bottom-up and top-down storage are normalized to top row first.
//! - **RAW**, headerless, exactly `width * height` bytes, top row first.
//!
//! Decoding always targets an expected geometry. A file of any other size
//! is an error, never cropped or padded, and every error carries an all-zero
//! raster of the expected shape ([`Failure::blank`]).
//!
//! ## Operations
//!
//! - [`transform`]: negative, logarithmic, and gamma point transforms.
//! - [`resample`]: nearest-neighbor and bilinear resizing.
//!
//! Float results are truncated toward zero by default; see
//! [`ByteConversion`].
//!
//! ## Non-Goals
//!
//! - Other BMP bit depths, RLE/bitfield compression, color output
//! - Displaying images; that is the job of a [`Presenter`]
//!
//! ## Usage
//!
//! ```no_run
//! use grayraster::{Resampler, Unstoppable, read_file, transform};
//!
//! let source = read_file("images/lena.raw", 512, 512)?;
//! let negative = transform::negative(&source);
//! let gamma = transform::gamma(&source, 0.5)?;
//! let small = Resampler::bilinear().resize(&source, 128, 128, Unstoppable)?;
//! assert_eq!(small.dimensions(), (128, 128));
//! # let _ = (negative, gamma);
//! # Ok::<(), grayraster::Failure>(())
//! ```

#![forbid(unsafe_code)]

mod container;
mod decode;
mod error;
mod limits;
mod present;
mod raster;
mod raw;

pub mod bmp;
pub mod pipeline;
pub mod resample;
pub mod transform;

// Re-exports
pub use container::ContainerKind;
pub use decode::{DecodeRequest, decode_bmp, decode_raw, read_file};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{Failure, RasterError};
pub use limits::Limits;
pub use pipeline::{Pipeline, PipelineConfig, RunSummary, Step};
pub use present::{NullPresenter, Presenter, RecordingPresenter};
pub use raster::{CenterWindow, Raster};
pub use resample::{DegenerateAxis, Filter, Resampler};
pub use transform::{ByteConversion, PointTransform};
