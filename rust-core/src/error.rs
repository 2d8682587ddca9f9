//! Error type shared by every pipeline stage

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, WorkbenchError>;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    /// Cutoff outside (0, Nyquist), wrong cutoff count for the filter kind,
    /// bandpass edges out of order, or a zero order
    #[error("Invalid filter spec: {0}")]
    InvalidFilterSpec(String),

    /// Signal with no samples or a zero sample rate
    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    /// Decode/encode failure from the WAV collaborator, propagated unchanged
    #[error("Audio I/O failed: {0}")]
    Audio(#[from] hound::Error),

    #[error("FFT processing failed: {0}")]
    Fft(String),

    #[error("Failed to render plot: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WorkbenchError {
    /// True for errors caused by the caller's filter parameters
    pub fn is_invalid_spec(&self) -> bool {
        matches!(self, WorkbenchError::InvalidFilterSpec(_))
    }
}
