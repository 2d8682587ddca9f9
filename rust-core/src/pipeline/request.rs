//! Request, response and configuration objects for one pipeline run

use crate::audio::Signal;
use crate::error::Result;
use crate::filters::FilterSpec;
use crate::render::{PlotStyle, RenderedArtifact};
use crate::spectrum::Spectrum;
use std::path::{Path, PathBuf};

/// Upper edge of the spectrum plots' display window (Hz)
pub const DEFAULT_SPECTRUM_MAX_HZ: f64 = 5000.0;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Spectrum plots show `[0, spectrum_max_hz]`
    pub spectrum_max_hz: f64,

    /// Plot appearance, including the image size
    pub plot_style: PlotStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            spectrum_max_hz: DEFAULT_SPECTRUM_MAX_HZ,
            plot_style: PlotStyle::default(),
        }
    }
}

/// Everything one run needs, fixed up front
#[derive(Debug, Clone)]
pub struct FilterRequest {
    /// Audio file to load
    pub input: PathBuf,

    pub spec: FilterSpec,

    /// Compute (and plot) the spectra of the original and filtered signals
    pub compute_spectrum: bool,
}

impl FilterRequest {
    pub fn new<P: Into<PathBuf>>(input: P, spec: FilterSpec) -> Self {
        Self {
            input: input.into(),
            spec,
            compute_spectrum: false,
        }
    }

    pub fn with_spectrum(mut self, compute_spectrum: bool) -> Self {
        self.compute_spectrum = compute_spectrum;
        self
    }
}

/// Plots produced by a run
#[derive(Debug, Clone)]
pub struct PlotSet {
    pub original_signal: RenderedArtifact,
    pub filtered_signal: RenderedArtifact,

    /// Present only when spectra were requested
    pub original_spectrum: Option<RenderedArtifact>,
    pub filtered_spectrum: Option<RenderedArtifact>,
}

impl PlotSet {
    /// All plots that were rendered, time-domain first
    pub fn iter(&self) -> impl Iterator<Item = &RenderedArtifact> {
        [&self.original_signal, &self.filtered_signal]
            .into_iter()
            .chain(self.original_spectrum.as_ref())
            .chain(self.filtered_spectrum.as_ref())
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct FilterResponse {
    /// Mono input, after any downmix
    pub original: Signal,
    pub filtered: Signal,

    /// `None` unless `compute_spectrum` was set
    pub original_spectrum: Option<Spectrum>,
    pub filtered_spectrum: Option<Spectrum>,

    /// Filtered signal encoded as WAV
    pub audio: RenderedArtifact,

    pub plots: PlotSet,
}

impl FilterResponse {
    /// Every artifact: the filtered audio followed by the plots
    pub fn artifacts(&self) -> impl Iterator<Item = &RenderedArtifact> {
        std::iter::once(&self.audio).chain(self.plots.iter())
    }

    /// Write every artifact into `dir` (created if missing)
    ///
    /// # Returns
    /// Paths of the written files, in `artifacts()` order
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        self.artifacts().map(|a| a.write_to(dir)).collect()
    }
}
