#[macro_use]
mod macros;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::error::DebiasError;

impl From<DebiasError> for PyErr {
    fn from(err: DebiasError) -> PyErr {
        match err {
            DebiasError::GradientDisabled => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

debiaser_class!("HardDebiaser", PyHardDebiaser, crate::HardDebiaser);
debiaser_class!("LinearDebiaser", PyLinearDebiaser, crate::LinearDebiaser);

/// fairness_debias - bias-direction removal for embedding batches
#[pymodule]
pub fn fairness_debias(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyHardDebiaser>()?;
    m.add_class::<PyLinearDebiaser>()?;
    Ok(())
}
