//! Mono sample sequence with its sample rate

use crate::error::{Result, WorkbenchError};

/// Immutable mono signal
///
/// Every pipeline stage takes a `&Signal` and produces a new value; samples
/// are never modified in place once a `Signal` exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Signal {
    /// Create a signal
    ///
    /// # Errors
    /// `InvalidSignal` if `samples` is empty or `sample_rate` is zero
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(WorkbenchError::InvalidSignal(
                "sample rate must be greater than 0 Hz".into(),
            ));
        }
        if samples.is_empty() {
            return Err(WorkbenchError::InvalidSignal(
                "signal must contain at least one sample".into(),
            ));
        }

        Ok(Self { samples, sample_rate })
    }

    /// Build a signal of the same sample rate from new samples
    ///
    /// Used by stages that preserve the rate (filtering).
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Result<Self> {
        Self::new(samples, self.sample_rate)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed signal; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Half the sample rate in Hz
    pub fn nyquist_hz(&self) -> f64 {
        0.5 * self.sample_rate as f64
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Time of each sample in seconds, spread evenly over `[0, duration]`
    pub fn time_axis(&self) -> Vec<f64> {
        let n = self.samples.len();
        if n == 1 {
            return vec![0.0];
        }

        let step = self.duration_secs() / (n - 1) as f64;
        (0..n).map(|i| i as f64 * step).collect()
    }

    /// Largest absolute sample value
    pub fn peak_amplitude(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, &s| acc.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_zero_rate() {
        assert!(matches!(
            Signal::new(vec![], 44100),
            Err(WorkbenchError::InvalidSignal(_))
        ));
        assert!(matches!(
            Signal::new(vec![0.0; 4], 0),
            Err(WorkbenchError::InvalidSignal(_))
        ));
    }

    #[test]
    fn test_derived_quantities() {
        let signal = Signal::new(vec![0.0, 0.5, -1.0, 0.25], 8).unwrap();

        assert_eq!(signal.len(), 4);
        assert!((signal.nyquist_hz() - 4.0).abs() < 1e-12);
        assert!((signal.duration_secs() - 0.5).abs() < 1e-12);
        assert!((signal.peak_amplitude() - 1.0).abs() < 1e-12);

        let t = signal.time_axis();
        assert_eq!(t.len(), 4);
        assert_eq!(t[0], 0.0);
        assert!((t[3] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_time_axis() {
        let signal = Signal::new(vec![1.0], 48000).unwrap();
        assert_eq!(signal.time_axis(), vec![0.0]);
    }
}
