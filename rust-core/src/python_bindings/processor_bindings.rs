//! Python bindings for the full pipeline

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};
use numpy::PyArray1;
use super::filter_bindings::build_spec;
use super::to_py_err;
use crate::pipeline::{self, FilterRequest, PipelineConfig};
use crate::render::RenderedArtifact;

/// Load, filter, plot and encode an audio file
///
/// Args:
///     path: WAV file to process
///     filter_type: "Lowpass", "Highpass" or "Bandpass"
///     cutoff: Cutoff in Hz, or [low, high] for Bandpass
///     order: Filter order
///     apply_fourier: Also compute and plot spectra
///
/// Returns:
///     Dictionary with keys 'audio' (WAV bytes), 'original_signal',
///     'filtered_signal', 'original_spectrum', 'filtered_spectrum'
///     (PNG bytes or None), 'filtered' (numpy array) and 'sample_rate'
#[pyfunction]
#[pyo3(signature = (path, filter_type="Lowpass", cutoff=None, order=4, apply_fourier=false))]
pub fn process_audio<'py>(
    py: Python<'py>,
    path: &str,
    filter_type: &str,
    cutoff: Option<&PyAny>,
    order: usize,
    apply_fourier: bool,
) -> PyResult<&'py PyDict> {
    let spec = build_spec(filter_type, cutoff, order)?;
    let request = FilterRequest::new(path, spec).with_spectrum(apply_fourier);

    let response = pipeline::process_audio(&request, &PipelineConfig::default()).map_err(to_py_err)?;

    let bytes = |artifact: Option<&RenderedArtifact>| -> PyObject {
        match artifact {
            Some(a) => PyBytes::new(py, &a.bytes).into_py(py),
            None => py.None(),
        }
    };

    let dict = PyDict::new(py);
    dict.set_item("audio", bytes(Some(&response.audio)))?;
    dict.set_item("original_signal", bytes(Some(&response.plots.original_signal)))?;
    dict.set_item("filtered_signal", bytes(Some(&response.plots.filtered_signal)))?;
    dict.set_item("original_spectrum", bytes(response.plots.original_spectrum.as_ref()))?;
    dict.set_item("filtered_spectrum", bytes(response.plots.filtered_spectrum.as_ref()))?;
    dict.set_item("filtered", PyArray1::from_slice(py, response.filtered.samples()))?;
    dict.set_item("sample_rate", response.filtered.sample_rate())?;

    Ok(dict)
}
