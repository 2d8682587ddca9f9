//! Plot rendering and in-memory output artifacts

pub mod artifact;
pub mod plot;

pub use artifact::{ArtifactKind, RenderedArtifact};
pub use plot::{render_spectrum, render_waveform, PlotStyle};
