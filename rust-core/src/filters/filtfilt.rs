//! Zero-phase (forward-backward) filtering
//!
//! Running the cascade forward and then over the time-reversed output
//! cancels the phase response, so filtered samples line up with the input.
//! The magnitude response is applied twice.

use super::sos::{Biquad, SosCascade};

/// Samples of odd reflection added at each end before filtering
///
/// Three times the tap count of the equivalent transfer function, clamped so
/// the reflection never reaches past the other end of the signal.
pub fn pad_length(sections: usize, signal_len: usize) -> usize {
    let taps = 2 * sections + 1;
    (3 * taps).min(signal_len.saturating_sub(1))
}

/// Extend `x` by `padlen` samples of odd reflection about each endpoint
fn odd_extend(x: &[f64], padlen: usize) -> Vec<f64> {
    let n = x.len();
    let (first, last) = (x[0], x[n - 1]);

    let mut ext = Vec::with_capacity(n + 2 * padlen);
    ext.extend((1..=padlen).rev().map(|i| 2.0 * first - x[i]));
    ext.extend_from_slice(x);
    ext.extend((1..=padlen).map(|i| 2.0 * last - x[n - 1 - i]));
    ext
}

/// Apply a section cascade with zero phase distortion
///
/// # Arguments
/// * `sections` - Second-order sections of the filter
/// * `x` - Input samples
///
/// # Returns
/// Filtered samples, same length as `x`
pub fn filtfilt(sections: &[Biquad], x: &[f64]) -> Vec<f64> {
    if x.is_empty() || sections.is_empty() {
        return x.to_vec();
    }

    let padlen = pad_length(sections.len(), x.len());
    log::debug!(
        "Zero-phase filtering {} samples through {} sections (pad {})",
        x.len(),
        sections.len(),
        padlen
    );

    let mut cascade = SosCascade::new(sections.to_vec());
    let mut buffer = odd_extend(x, padlen);

    // Forward pass
    cascade.prime(buffer[0]);
    cascade.process_block_inplace(&mut buffer);

    // Backward pass
    buffer.reverse();
    cascade.prime(buffer[0]);
    cascade.process_block_inplace(&mut buffer);
    buffer.reverse();

    buffer.drain(..padlen);
    buffer.truncate(x.len());
    buffer
}
