//! PyO3 bindings for Python integration

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use crate::error::WorkbenchError;

mod filter_bindings;
mod spectrum_bindings;
mod processor_bindings;

/// Map crate errors onto the closest Python exception
pub(crate) fn to_py_err(err: WorkbenchError) -> PyErr {
    match err {
        WorkbenchError::InvalidFilterSpec(_) | WorkbenchError::InvalidSignal(_) => {
            PyValueError::new_err(err.to_string())
        }
        WorkbenchError::Audio(_) | WorkbenchError::Io(_) => PyIOError::new_err(err.to_string()),
        WorkbenchError::Fft(_) | WorkbenchError::Render(_) => {
            PyRuntimeError::new_err(err.to_string())
        }
    }
}

/// Python module definition
#[pymodule]
fn filter_workbench(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(filter_bindings::apply_filter, m)?)?;
    m.add_function(wrap_pyfunction!(filter_bindings::butter, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::compute_fourier, m)?)?;
    m.add_function(wrap_pyfunction!(processor_bindings::process_audio, m)?)?;

    Ok(())
}
