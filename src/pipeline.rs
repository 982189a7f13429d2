//! Multi-file orchestration.
//!
//! Each file is decoded, then every configured step runs against the decoded
//! source and its output goes to the [`Presenter`]. Failures never end a run:
//! an unreadable file is skipped, a failed step is skipped, and a presenter
//! error is logged.

use std::path::{Path, PathBuf};

use enough::Unstoppable;

use crate::decode::read_file_with;
use crate::error::RasterError;
use crate::limits::Limits;
use crate::present::Presenter;
use crate::raster::Raster;
use crate::resample::{DegenerateAxis, Filter, Resampler};
use crate::transform::{ByteConversion, PointTransform};

/// Target sizes exercised by [`PipelineConfig::resize_cases`].
pub const RESIZE_CASES: [(u32, u32); 5] = [(128, 128), (32, 32), (512, 512), (1024, 512), (256, 512)];

/// One operation applied to each decoded file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Present the decoded source as-is, titled with its path.
    Show,
    /// Log the `size` x `size` center window of the source.
    Probe { size: u32 },
    /// Present a point-transformed copy.
    Transform(PointTransform),
    /// Present resized copies. `None` runs nearest then bilinear.
    Resize {
        width: u32,
        height: u32,
        filter: Option<Filter>,
    },
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Geometry every input must decode to.
    pub width: u32,
    pub height: u32,
    pub steps: Vec<Step>,
    pub limits: Limits,
    pub conversion: ByteConversion,
    pub degenerate_axis: DegenerateAxis,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            steps: vec![Step::Show],
            limits: Limits::default(),
            conversion: ByteConversion::Truncate,
            degenerate_axis: DegenerateAxis::Reject,
        }
    }
}

impl PipelineConfig {
    /// Log the center 10x10 window, then show the image.
    pub fn inspect() -> Self {
        Self::default().with_steps(vec![Step::Probe { size: 10 }, Step::Show])
    }

    /// Log, gamma 0.5, and negative transforms.
    pub fn point_transforms() -> Self {
        Self::default().with_steps(vec![
            Step::Transform(PointTransform::Log),
            Step::Transform(PointTransform::Gamma(0.5)),
            Step::Transform(PointTransform::Negative),
        ])
    }

    /// Nearest and bilinear resizes to each of [`RESIZE_CASES`].
    pub fn resize_cases() -> Self {
        Self::default().with_steps(
            RESIZE_CASES
                .iter()
                .map(|&(width, height)| Step::Resize {
                    width,
                    height,
                    filter: None,
                })
                .collect(),
        )
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Per-file counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    pub presented: usize,
    pub failed_steps: usize,
    pub presenter_errors: usize,
}

/// Outcome of [`Pipeline::run`].
#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, RasterError)>,
    pub presented: usize,
    pub failed_steps: usize,
    pub presenter_errors: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every path in order, one file at a time.
    pub fn run<I, P>(&self, paths: I, presenter: &mut P) -> RunSummary
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
        P: Presenter + ?Sized,
    {
        let mut summary = RunSummary::default();
        for path in paths {
            let path = path.as_ref();
            log::info!("processing {}", path.display());
            match self.decode(path) {
                Ok(source) => {
                    let title = path.display().to_string();
                    let report = self.run_steps(&source, &title, presenter);
                    summary.presented += report.presented;
                    summary.failed_steps += report.failed_steps;
                    summary.presenter_errors += report.presenter_errors;
                    summary.processed.push(path.to_path_buf());
                }
                Err(e) => {
                    log::warn!("skipping {}: {e}", path.display());
                    summary.skipped.push((path.to_path_buf(), e));
                }
            }
        }
        log::info!(
            "done: {} processed, {} skipped",
            summary.processed.len(),
            summary.skipped.len()
        );
        summary
    }

    /// Read and decode one file at the configured geometry.
    pub fn decode(&self, path: &Path) -> Result<Raster, RasterError> {
        let c = &self.config;
        Ok(read_file_with(path, c.width, c.height, Some(&c.limits))?)
    }

    /// Run every configured step against an already decoded source.
    pub fn run_steps<P: Presenter + ?Sized>(
        &self,
        source: &Raster,
        title: &str,
        presenter: &mut P,
    ) -> FileReport {
        let mut report = FileReport::default();
        for step in &self.config.steps {
            self.run_step(step, source, title, presenter, &mut report);
        }
        report
    }

    fn run_step<P: Presenter + ?Sized>(
        &self,
        step: &Step,
        source: &Raster,
        title: &str,
        presenter: &mut P,
        report: &mut FileReport,
    ) {
        match *step {
            Step::Show => present(presenter, source, title, report),
            Step::Probe { size } => {
                log::info!(
                    "{title}: center {size}x{size} pixel values:\n{}",
                    source.center_window(size)
                );
            }
            Step::Transform(transform) => {
                match transform.apply_with(source, self.config.conversion) {
                    Ok(out) => present(presenter, &out, transform.title(), report),
                    Err(e) => {
                        log::warn!("{title}: {} failed: {e}", transform.title());
                        report.failed_steps += 1;
                    }
                }
            }
            Step::Resize {
                width,
                height,
                filter,
            } => {
                let both = [Filter::Nearest, Filter::Bilinear];
                let filters = match &filter {
                    Some(f) => core::slice::from_ref(f),
                    None => &both[..],
                };
                for &f in filters {
                    let label = format!("{} {width}x{height}", f.title());
                    let resampler = Resampler::new(f)
                        .with_conversion(self.config.conversion)
                        .with_degenerate_axis(self.config.degenerate_axis);
                    match resampler.resize(source, width, height, Unstoppable) {
                        Ok(out) => present(presenter, &out, &label, report),
                        Err(e) => {
                            log::warn!("{title}: {label} failed: {e}");
                            report.failed_steps += 1;
                        }
                    }
                }
            }
        }
    }
}

fn present<P: Presenter + ?Sized>(
    presenter: &mut P,
    raster: &Raster,
    title: &str,
    report: &mut FileReport,
) {
    let (w, h) = raster.dimensions();
    log::info!("presenting {title} ({w}x{h})");
    match presenter.present(raster, title) {
        Ok(()) => report.presented += 1,
        Err(e) => {
            log::warn!("presenter failed on {title}: {e}");
            report.presenter_errors += 1;
        }
    }
}
