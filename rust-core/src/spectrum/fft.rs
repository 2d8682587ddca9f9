//! FFT engine using realfft for real-valued signals
//!
//! The transform length equals the signal length: no padding, no windowing

use crate::error::{Result, WorkbenchError};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued signals of one fixed length
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples, any length >= 1)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute |X[k]| for k = 0..=fft_size/2
    ///
    /// # Errors
    /// `Fft` if `signal.len()` differs from the planned size
    pub fn compute_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.len() != self.fft_size {
            return Err(WorkbenchError::Fft(format!(
                "expected {} samples, got {}",
                self.fft_size,
                signal.len()
            )));
        }

        self.input_buffer.copy_from_slice(signal);
        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| WorkbenchError::Fft(e.to_string()))?;

        Ok(self.output_buffer.iter().map(|c| c.norm()).collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of bins produced by the real transform (fft_size/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Convert bin index to Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(100);

        let spectrum = fft.compute_magnitude(&vec![1.0; 100]).unwrap();

        assert_eq!(spectrum.len(), 51);
        assert!((spectrum[0] - 100.0).abs() < 1e-9);
        assert!(spectrum[10] < 1e-9);
    }

    #[test]
    fn test_fft_odd_length_sine() {
        // 7 full cycles over 999 samples
        let n = 999;
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 7.0 * i as f64 / n as f64).sin())
            .collect();

        let mut fft = FftEngine::new(n);
        let spectrum = fft.compute_magnitude(&signal).unwrap();

        assert_eq!(spectrum.len(), fft.num_bins());
        assert!((spectrum[7] - n as f64 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let mut fft = FftEngine::new(64);
        assert!(fft.compute_magnitude(&[0.0; 32]).is_err());
    }

    #[test]
    fn test_bin_to_hz() {
        let fft = FftEngine::new(1000);
        assert!((fft.bin_to_hz(10, 8000.0) - 80.0).abs() < 1e-12);
    }
}
