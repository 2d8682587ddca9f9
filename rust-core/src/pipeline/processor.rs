//! Load -> filter -> {spectrum, plots, WAV} orchestration
//!
//! Strictly sequential: each stage finishes before the next starts, and no
//! artifact leaves this module unless every stage succeeded.

use super::request::{FilterRequest, FilterResponse, PipelineConfig, PlotSet};
use crate::audio::{encode_wav, load_audio, Signal};
use crate::error::Result;
use crate::filters::{apply_filter, FilterSpec};
use crate::render::{render_spectrum, render_waveform, ArtifactKind, RenderedArtifact};
use crate::spectrum::compute_fourier;

/// Artifact base names
pub const FILTERED_AUDIO_NAME: &str = "filtered_audio";
pub const ORIGINAL_SIGNAL_PLOT: &str = "original_signal";
pub const FILTERED_SIGNAL_PLOT: &str = "filtered_signal";
pub const ORIGINAL_SPECTRUM_PLOT: &str = "original_spectrum";
pub const FILTERED_SPECTRUM_PLOT: &str = "filtered_spectrum";

/// Run the full pipeline on an audio file
///
/// Multi-channel input is averaged down to mono before filtering.
///
/// # Errors
/// Decode failures, `InvalidFilterSpec`, or rendering/encoding failures;
/// the run produces nothing on error
pub fn process_audio(request: &FilterRequest, config: &PipelineConfig) -> Result<FilterResponse> {
    let clip = load_audio(&request.input)?;
    let signal = clip.to_mono()?;

    process_signal(signal, &request.spec, request.compute_spectrum, config)
}

/// Run the pipeline on an already-loaded mono signal
pub fn process_signal(
    signal: Signal,
    spec: &FilterSpec,
    compute_spectrum: bool,
    config: &PipelineConfig,
) -> Result<FilterResponse> {
    log::info!(
        "Processing {} samples at {} Hz ({:.2} s)",
        signal.len(),
        signal.sample_rate(),
        signal.duration_secs()
    );

    let filtered = apply_filter(&signal, spec)?;

    let (original_spectrum, filtered_spectrum) = if compute_spectrum {
        (Some(compute_fourier(&signal)?), Some(compute_fourier(&filtered)?))
    } else {
        (None, None)
    };

    let style = &config.plot_style;
    let png = |name: &str, bytes: Vec<u8>| RenderedArtifact::new(name, ArtifactKind::Png, bytes);

    let original_signal = png(ORIGINAL_SIGNAL_PLOT, render_waveform(&signal, style)?);
    let filtered_signal = png(FILTERED_SIGNAL_PLOT, render_waveform(&filtered, style)?);

    let original_spectrum_plot = original_spectrum
        .as_ref()
        .map(|s| render_spectrum(s, config.spectrum_max_hz, style))
        .transpose()?
        .map(|bytes| png(ORIGINAL_SPECTRUM_PLOT, bytes));
    let filtered_spectrum_plot = filtered_spectrum
        .as_ref()
        .map(|s| render_spectrum(s, config.spectrum_max_hz, style))
        .transpose()?
        .map(|bytes| png(FILTERED_SPECTRUM_PLOT, bytes));

    let audio = RenderedArtifact::new(FILTERED_AUDIO_NAME, ArtifactKind::Wav, encode_wav(&filtered)?);

    log::info!(
        "Pipeline complete: {} plots, {} bytes of audio",
        2 + original_spectrum_plot.iter().count() + filtered_spectrum_plot.iter().count(),
        audio.bytes.len()
    );

    Ok(FilterResponse {
        original: signal,
        filtered,
        original_spectrum,
        filtered_spectrum,
        audio,
        plots: PlotSet {
            original_signal,
            filtered_signal,
            original_spectrum: original_spectrum_plot,
            filtered_spectrum: filtered_spectrum_plot,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlotStyle;
    use std::f64::consts::PI;

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            plot_style: PlotStyle::with_size(200, 100),
            ..PipelineConfig::default()
        }
    }

    fn tone_300hz() -> Signal {
        let samples = (0..4000)
            .map(|n| (2.0 * PI * 300.0 * n as f64 / 8000.0).sin())
            .collect();
        Signal::new(samples, 8000).unwrap()
    }

    #[test]
    fn test_spectra_absent_unless_requested() {
        let response = process_signal(
            tone_300hz(),
            &FilterSpec::lowpass(1000.0, 4),
            false,
            &small_config(),
        )
        .unwrap();

        assert!(response.original_spectrum.is_none());
        assert!(response.filtered_spectrum.is_none());
        assert!(response.plots.original_spectrum.is_none());
        assert!(response.plots.filtered_spectrum.is_none());
        assert_eq!(response.artifacts().count(), 3);
    }

    #[test]
    fn test_spectra_present_when_requested() {
        let response = process_signal(
            tone_300hz(),
            &FilterSpec::highpass(100.0, 2),
            true,
            &small_config(),
        )
        .unwrap();

        let original = response.original_spectrum.as_ref().unwrap();
        let filtered = response.filtered_spectrum.as_ref().unwrap();
        assert_eq!(original.len(), 2000);
        assert_eq!(filtered.len(), 2000);

        let names: Vec<String> = response.artifacts().map(|a| a.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "filtered_audio.wav",
                "original_signal.png",
                "filtered_signal.png",
                "original_spectrum.png",
                "filtered_spectrum.png",
            ]
        );
    }

    #[test]
    fn test_invalid_spec_produces_nothing() {
        let result = process_signal(
            tone_300hz(),
            &FilterSpec::lowpass(4000.0, 4),
            true,
            &small_config(),
        );
        assert!(result.unwrap_err().is_invalid_spec());
    }
}
