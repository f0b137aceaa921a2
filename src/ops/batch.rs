use crate::error::{DebiasError, Result};
use ndarray::{Array1, ArrayView1, ArrayView2, ArrayViewD, Axis, CowArray, Ix2};
use rayon::prelude::*;

/// Views an array of shape `(..., dim)` as a `(rows, dim)` matrix.
///
/// Every leading axis is folded into the row axis. Contiguous inputs are
/// borrowed; other layouts are copied once.
/// Fails with [`DebiasError::ShapeMismatch`] if the trailing axis is not `dim`
/// long, which includes 0-d inputs.
pub fn as_rows<'a>(x: &'a ArrayViewD<'_, f32>, dim: usize) -> Result<CowArray<'a, f32, Ix2>> {
    match x.shape().last() {
        Some(&last) if last == dim => {}
        _ => {
            return Err(DebiasError::ShapeMismatch {
                expected: dim,
                found: x.shape().to_vec(),
            })
        }
    }
    let rows: usize = x.shape()[..x.ndim() - 1].iter().product();
    Ok(x.to_shape((rows, dim))?)
}

/// Dot product of every row of `x` with `direction`.
/// x: (rows, dim), direction: (dim,). Returns (rows,).
pub fn dot_rows(x: &ArrayView2<f32>, direction: &ArrayView1<f32>) -> Array1<f32> {
    let dots: Vec<f32> = x
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|row| row.dot(direction))
        .collect();
    Array1::from_vec(dots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2, Array3};

    #[test]
    fn test_as_rows_folds_leading_axes() {
        let x = Array3::<f32>::zeros((2, 3, 4)).into_dyn();
        let view = x.view();
        let rows = as_rows(&view, 4).unwrap();
        assert_eq!(rows.shape(), &[6, 4]);
    }

    #[test]
    fn test_as_rows_single_vector() {
        let x = arr1(&[3.0f32, 4.0]).into_dyn();
        let view = x.view();
        let rows = as_rows(&view, 2).unwrap();
        assert_eq!(rows.shape(), &[1, 2]);
    }

    #[test]
    fn test_as_rows_rejects_wrong_trailing_dim() {
        let x = arr2(&[[1.0f32, 2.0, 3.0]]).into_dyn();
        let view = x.view();
        match as_rows(&view, 2) {
            Err(DebiasError::ShapeMismatch { expected, found }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, vec![1, 3]);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other.map(|r| r.shape().to_vec())),
        }
    }

    #[test]
    fn test_as_rows_rejects_scalar() {
        let x = ndarray::arr0(1.0f32).into_dyn();
        let view = x.view();
        assert!(matches!(
            as_rows(&view, 1),
            Err(DebiasError::ShapeMismatch { expected: 1, .. })
        ));
    }

    #[test]
    fn test_as_rows_copies_transposed_layout() {
        let x = arr2(&[[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let t = x.t().into_dyn();
        let rows = as_rows(&t, 3).unwrap();
        assert_eq!(rows, arr2(&[[1.0f32, 3.0, 5.0], [2.0, 4.0, 6.0]]));
    }

    #[test]
    fn test_dot_rows() {
        let x = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let b = arr1(&[1.0f32, -1.0]);
        let dots = dot_rows(&x.view(), &b.view());
        assert_relative_eq!(dots, arr1(&[-1.0f32, -1.0]));
    }
}
