//! One-shot filtering pipeline driven by explicit request objects

pub mod request;
pub mod processor;

pub use request::{FilterRequest, FilterResponse, PipelineConfig, PlotSet, DEFAULT_SPECTRUM_MAX_HZ};
pub use processor::{process_audio, process_signal};
