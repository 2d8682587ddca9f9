//! Python bindings for Butterworth filtering

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use super::to_py_err;
use crate::audio::Signal;
use crate::filters::{self, FilterKind, FilterSpec};

/// Accept either a single number or a sequence of numbers
///
/// Without a value, 1000 Hz is used (1000 and 2000 Hz for Bandpass).
pub(crate) fn extract_cutoffs(kind: FilterKind, cutoff: Option<&PyAny>) -> PyResult<Vec<f64>> {
    match cutoff {
        None if kind == FilterKind::Bandpass => Ok(vec![1000.0, 2000.0]),
        None => Ok(vec![1000.0]),
        Some(value) => match value.extract::<f64>() {
            Ok(single) => Ok(vec![single]),
            Err(_) => value.extract::<Vec<f64>>(),
        },
    }
}

pub(crate) fn build_spec(filter_type: &str, cutoff: Option<&PyAny>, order: usize) -> PyResult<FilterSpec> {
    let kind: FilterKind = filter_type.parse().map_err(to_py_err)?;
    Ok(FilterSpec {
        kind,
        cutoffs_hz: extract_cutoffs(kind, cutoff)?,
        order,
    })
}

/// Apply a zero-phase Butterworth filter
///
/// Args:
///     samples: Mono signal as numpy array
///     sample_rate: Sample rate in Hz
///     filter_type: "Lowpass", "Highpass" or "Bandpass"
///     cutoff: Cutoff in Hz, or [low, high] for Bandpass (default: 1000, or [1000, 2000])
///     order: Filter order (default: 4)
///
/// Returns:
///     Filtered signal as numpy array
///
/// Raises:
///     ValueError: invalid filter parameters
#[pyfunction]
#[pyo3(signature = (samples, sample_rate, filter_type="Lowpass", cutoff=None, order=4))]
pub fn apply_filter<'py>(
    py: Python<'py>,
    samples: PyReadonlyArray1<f64>,
    sample_rate: u32,
    filter_type: &str,
    cutoff: Option<&PyAny>,
    order: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let spec = build_spec(filter_type, cutoff, order)?;
    let signal = Signal::new(samples.as_array().to_vec(), sample_rate).map_err(to_py_err)?;

    let filtered = filters::apply_filter(&signal, &spec).map_err(to_py_err)?;
    Ok(PyArray1::from_vec(py, filtered.into_samples()))
}

/// Design a Butterworth filter
///
/// Args:
///     order: Filter order
///     cutoff: Cutoff in Hz, or [low, high] for Bandpass
///     sample_rate: Sample rate in Hz
///     filter_type: "Lowpass", "Highpass" or "Bandpass"
///
/// Returns:
///     Tuple of (b, a) transfer-function coefficients
#[pyfunction]
#[pyo3(signature = (order, cutoff, sample_rate, filter_type="Lowpass"))]
pub fn butter<'py>(
    py: Python<'py>,
    order: usize,
    cutoff: &PyAny,
    sample_rate: u32,
    filter_type: &str,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let spec = build_spec(filter_type, Some(cutoff), order)?;
    let band = spec.normalize(sample_rate).map_err(to_py_err)?;
    let design = filters::butter(order, band).map_err(to_py_err)?;

    let (b, a) = design.to_transfer_function();
    Ok((PyArray1::from_vec(py, b), PyArray1::from_vec(py, a)))
}
