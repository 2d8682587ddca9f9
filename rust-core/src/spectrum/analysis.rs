//! Single-sided magnitude spectrum of a signal

use super::fft::FftEngine;
use crate::audio::Signal;
use crate::error::Result;

/// Non-negative half of a signal's Fourier magnitude spectrum
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz, ascending from 0
    frequencies_hz: Vec<f64>,

    /// Single-sided amplitude per bin
    magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn frequencies_hz(&self) -> &[f64] {
        &self.frequencies_hz
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Keep only bins at or below `max_hz` (display window)
    pub fn restrict(&self, max_hz: f64) -> Spectrum {
        let keep = self.frequencies_hz.partition_point(|&f| f <= max_hz);
        Spectrum {
            frequencies_hz: self.frequencies_hz[..keep].to_vec(),
            magnitudes: self.magnitudes[..keep].to_vec(),
        }
    }

    /// Frequency and magnitude of the strongest bin
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, &m)| (self.frequencies_hz[i], m))
    }

    /// Magnitude of the bin nearest to `hz` (0.0 for an empty spectrum)
    pub fn magnitude_at(&self, hz: f64) -> f64 {
        self.frequencies_hz
            .iter()
            .zip(&self.magnitudes)
            .min_by(|(fa, _), (fb, _)| (*fa - hz).abs().total_cmp(&(*fb - hz).abs()))
            .map(|(_, &m)| m)
            .unwrap_or(0.0)
    }
}

/// Compute the single-sided magnitude spectrum of a signal
///
/// Bins `k` in `[0, N/2)` with frequency `k * sample_rate / N` and magnitude
/// `2/N * |X[k]|`. A one-sample signal yields an empty spectrum.
pub fn compute_fourier(signal: &Signal) -> Result<Spectrum> {
    let n = signal.len();
    let half = n / 2;
    if half == 0 {
        return Ok(Spectrum {
            frequencies_hz: Vec::new(),
            magnitudes: Vec::new(),
        });
    }

    let mut engine = FftEngine::new(n);
    let magnitude = engine.compute_magnitude(signal.samples())?;

    let scale = 2.0 / n as f64;
    let sample_rate = signal.sample_rate() as f64;

    log::debug!("Computed {}-point FFT, keeping {} bins", n, half);

    Ok(Spectrum {
        frequencies_hz: (0..half).map(|k| engine.bin_to_hz(k, sample_rate)).collect(),
        magnitudes: magnitude[..half].iter().map(|&m| m * scale).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, amplitude: f64, sample_rate: u32, len: usize) -> Signal {
        let samples = (0..len)
            .map(|n| amplitude * (2.0 * PI * freq_hz * n as f64 / sample_rate as f64).sin())
            .collect();
        Signal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_bins_and_scaling() {
        let spectrum = compute_fourier(&sine(1000.0, 0.5, 8000, 800)).unwrap();

        assert_eq!(spectrum.len(), 400);
        assert_eq!(spectrum.frequencies_hz()[0], 0.0);
        assert!((spectrum.frequencies_hz()[1] - 10.0).abs() < 1e-12);
        assert!(*spectrum.frequencies_hz().last().unwrap() < 4000.0);

        // Single-sided scaling recovers the amplitude
        let (freq, mag) = spectrum.peak().unwrap();
        assert!((freq - 1000.0).abs() < 1e-9);
        assert!((mag - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_peak_nearest_bin_for_off_grid_tone() {
        // 44100 / 4096 Hz bins; 1234 Hz falls between bins
        let spectrum = compute_fourier(&sine(1234.0, 1.0, 44100, 4096)).unwrap();
        let (freq, _) = spectrum.peak().unwrap();

        let bin_width = 44100.0 / 4096.0;
        assert!((freq - 1234.0).abs() <= bin_width / 2.0, "Peak at {} Hz", freq);
    }

    #[test]
    fn test_odd_length_bin_count() {
        let spectrum = compute_fourier(&sine(100.0, 1.0, 1000, 101)).unwrap();
        assert_eq!(spectrum.len(), 50);
    }

    #[test]
    fn test_single_sample_gives_empty_spectrum() {
        let spectrum = compute_fourier(&Signal::new(vec![0.3], 44100).unwrap()).unwrap();
        assert!(spectrum.is_empty());
        assert!(spectrum.peak().is_none());
        assert_eq!(spectrum.magnitude_at(100.0), 0.0);
    }

    #[test]
    fn test_restrict_display_window() {
        let spectrum = compute_fourier(&sine(440.0, 1.0, 44100, 44100)).unwrap();
        let window = spectrum.restrict(5000.0);

        assert_eq!(window.len(), 5001);
        assert!(window.frequencies_hz().iter().all(|&f| f <= 5000.0));
        assert_eq!(window.peak(), spectrum.peak());
    }
}
