//! Filter Workbench - Butterworth filtering and spectral views of audio files
//!
//! Loads a WAV file, applies a zero-phase Butterworth lowpass/highpass/bandpass
//! filter, and renders time- and frequency-domain plots. Optional Python
//! bindings behind the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod audio;
pub mod filters;
pub mod spectrum;
pub mod render;
pub mod pipeline;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, WorkbenchError};
pub use audio::{encode_wav, load_audio, AudioClip, Signal};
pub use filters::{apply_filter, FilterKind, FilterSpec};
pub use spectrum::{compute_fourier, Spectrum};
pub use render::{ArtifactKind, RenderedArtifact};
pub use pipeline::{process_audio, process_signal, FilterRequest, FilterResponse, PipelineConfig};
