//! Python bindings for spectrum analysis

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use super::to_py_err;
use crate::audio::Signal;
use crate::spectrum;

/// Single-sided magnitude spectrum
///
/// Args:
///     samples: Mono signal as numpy array
///     sample_rate: Sample rate in Hz
///
/// Returns:
///     Tuple of (frequencies_hz, magnitudes) as numpy arrays
#[pyfunction]
pub fn compute_fourier<'py>(
    py: Python<'py>,
    samples: PyReadonlyArray1<f64>,
    sample_rate: u32,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let signal = Signal::new(samples.as_array().to_vec(), sample_rate).map_err(to_py_err)?;
    let spectrum = spectrum::compute_fourier(&signal).map_err(to_py_err)?;

    Ok((
        PyArray1::from_slice(py, spectrum.frequencies_hz()),
        PyArray1::from_slice(py, spectrum.magnitudes()),
    ))
}
