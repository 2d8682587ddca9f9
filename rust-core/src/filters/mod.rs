//! Butterworth IIR design and zero-phase filtering

pub mod design;
pub mod sos;
pub mod filtfilt;

pub use design::{
    butter, frequency_response, magnitude_response_db, ButterworthDesign, FilterKind, FilterSpec,
    NormalizedBand,
};
pub use sos::{Biquad, SosCascade};
pub use filtfilt::filtfilt;

use crate::audio::Signal;
use crate::error::Result;

/// Filter a signal with a zero-phase Butterworth filter
///
/// # Returns
/// A new signal with the same length and sample rate
///
/// # Errors
/// `InvalidFilterSpec` if the spec does not fit the signal's sample rate;
/// nothing is filtered in that case
pub fn apply_filter(signal: &Signal, spec: &FilterSpec) -> Result<Signal> {
    let band = spec.normalize(signal.sample_rate())?;
    let design = butter(spec.order, band)?;

    log::info!(
        "Applying order-{} {} filter at {:?} Hz to {} samples",
        spec.order,
        spec.kind,
        spec.cutoffs_hz,
        signal.len()
    );

    signal.with_samples(filtfilt(&design.sections, signal.samples()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::compute_fourier;
    use std::f64::consts::PI;

    fn tone_mix(freqs: &[f64], sample_rate: u32, len: usize) -> Signal {
        let samples = (0..len)
            .map(|n| {
                let t = n as f64 / sample_rate as f64;
                freqs.iter().map(|f| (2.0 * PI * f * t).sin()).sum()
            })
            .collect();
        Signal::new(samples, sample_rate).unwrap()
    }

    fn local_peaks(x: &[f64], range: std::ops::Range<usize>) -> Vec<usize> {
        range
            .filter(|&i| x[i] > x[i - 1] && x[i] >= x[i + 1] && x[i] > 0.5)
            .collect()
    }

    #[test]
    fn test_lowpass_and_highpass_preserve_shape() {
        let signal = tone_mix(&[300.0, 3000.0], 16000, 4001);

        for spec in [FilterSpec::lowpass(1000.0, 4), FilterSpec::highpass(1000.0, 6)] {
            let filtered = apply_filter(&signal, &spec).unwrap();
            assert_eq!(filtered.len(), signal.len());
            assert_eq!(filtered.sample_rate(), signal.sample_rate());
        }
    }

    #[test]
    fn test_passband_sine_peaks_not_shifted() {
        let signal = tone_mix(&[200.0], 8000, 8000);
        let filtered = apply_filter(&signal, &FilterSpec::lowpass(1000.0, 4)).unwrap();

        let original_peaks = local_peaks(signal.samples(), 1000..7000);
        let filtered_peaks = local_peaks(filtered.samples(), 1000..7000);

        assert!(!original_peaks.is_empty());
        assert_eq!(original_peaks, filtered_peaks);
    }

    #[test]
    fn test_bandpass_selectivity() {
        let signal = tone_mix(&[500.0, 1500.0, 4000.0], 44100, 44100);
        let filtered = apply_filter(&signal, &FilterSpec::bandpass(1000.0, 2000.0, 4)).unwrap();
        let spectrum = compute_fourier(&filtered).unwrap();

        let pass = spectrum.magnitude_at(1500.0);
        let low = spectrum.magnitude_at(500.0);
        let high = spectrum.magnitude_at(4000.0);

        assert!(pass > 0.9, "Passband magnitude {}", pass);
        assert!(low < 0.01 * pass, "500 Hz leaked: {}", low);
        assert!(high < 0.01 * pass, "4000 Hz leaked: {}", high);
    }

    #[test]
    fn test_invalid_specs_fail_before_filtering() {
        let signal = tone_mix(&[440.0], 44100, 1024);

        let single_cutoff_band = FilterSpec {
            kind: FilterKind::Bandpass,
            cutoffs_hz: vec![1000.0],
            order: 4,
        };
        assert!(apply_filter(&signal, &single_cutoff_band).unwrap_err().is_invalid_spec());

        let above_nyquist = FilterSpec::lowpass(22050.0, 4);
        assert!(apply_filter(&signal, &above_nyquist).unwrap_err().is_invalid_spec());
    }

    #[test]
    fn test_high_order_low_cutoff_stays_bounded() {
        // Order 8 bandpass at the bottom of the UI range
        let signal = tone_mix(&[150.0, 5000.0], 44100, 44100);
        let filtered = apply_filter(&signal, &FilterSpec::bandpass(100.0, 200.0, 8)).unwrap();

        assert!(filtered.samples().iter().all(|s| s.is_finite()));
        assert!(filtered.peak_amplitude() < 2.0);
    }
}
