/// Generates a Python class wrapping a Rust debiaser.
///
/// Usage:
/// `debiaser_class!("PythonName", WrapperType, crate::RustType);`
///
/// The class takes `requires_grad=False` in its constructor and exposes
/// `forward(embeddings, bias_direction)` and
/// `backward(grad_output, embeddings, bias_direction)` over float32 numpy
/// arrays of any rank.
#[macro_export]
macro_rules! debiaser_class {
    ($py_name:literal, $wrapper:ident, $inner:ty) => {
        #[pyo3::prelude::pyclass(name = $py_name, module = "fairness_debias")]
        pub struct $wrapper {
            inner: $inner,
        }

        #[pyo3::prelude::pymethods]
        impl $wrapper {
            #[new]
            #[pyo3(signature = (requires_grad = false))]
            fn new(requires_grad: bool) -> Self {
                Self {
                    inner: <$inner>::new(requires_grad),
                }
            }

            #[getter]
            fn requires_grad(&self) -> bool {
                $crate::Debiaser::requires_grad(&self.inner)
            }

            fn forward<'py>(
                &self,
                py: pyo3::prelude::Python<'py>,
                embeddings: numpy::PyReadonlyArrayDyn<'py, f32>,
                bias_direction: numpy::PyReadonlyArray1<'py, f32>,
            ) -> pyo3::PyResult<&'py numpy::PyArrayDyn<f32>> {
                let result = $crate::Debiaser::forward(
                    &self.inner,
                    &embeddings.as_array(),
                    &bias_direction.as_array(),
                )?;
                Ok(numpy::IntoPyArray::into_pyarray(result, py))
            }

            fn backward<'py>(
                &self,
                py: pyo3::prelude::Python<'py>,
                grad_output: numpy::PyReadonlyArrayDyn<'py, f32>,
                embeddings: numpy::PyReadonlyArrayDyn<'py, f32>,
                bias_direction: numpy::PyReadonlyArray1<'py, f32>,
            ) -> pyo3::PyResult<(&'py numpy::PyArrayDyn<f32>, &'py numpy::PyArray1<f32>)> {
                let grads = $crate::Debiaser::backward(
                    &self.inner,
                    &grad_output.as_array(),
                    &embeddings.as_array(),
                    &bias_direction.as_array(),
                )?;
                Ok((
                    numpy::IntoPyArray::into_pyarray(grads.embeddings, py),
                    numpy::IntoPyArray::into_pyarray(grads.bias_direction, py),
                ))
            }

            fn __repr__(&self) -> String {
                let flag = if $crate::Debiaser::requires_grad(&self.inner) { "True" } else { "False" };
                format!("{}(requires_grad={})", $py_name, flag)
            }
        }
    };
}
