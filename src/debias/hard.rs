use super::Debiaser;
use crate::ops::Projection;

/// Hard debiaser.
///
/// Neutralizes embeddings by removing their orthogonal projection onto the
/// bias direction, `x - (x·b) / (b·b) * b`. The division by `‖b‖²` makes the
/// result exact for directions that are not unit length.
///
/// A zero bias direction is not rejected: `0/0` propagates and every output
/// element is NaN.
///
/// Based on Rathore et al. (2021), *VERB: Visualizing and Interpreting Bias
/// Mitigation Techniques for Word Representations*, arXiv:2104.02797.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardDebiaser {
    requires_grad: bool,
}

impl HardDebiaser {
    pub fn new(requires_grad: bool) -> Self {
        Self { requires_grad }
    }
}

impl Debiaser for HardDebiaser {
    fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    fn projection(&self) -> Projection {
        Projection::Orthogonal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DebiasError;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2, Array1};

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_default_does_not_require_grad() {
        assert!(!HardDebiaser::default().requires_grad());
        assert!(HardDebiaser::new(true).requires_grad());
    }

    #[test]
    fn test_single_vector() {
        let e = arr1(&[3.0f32, 4.0]).into_dyn();
        let b = arr1(&[1.0f32, 0.0]);
        let out = HardDebiaser::default().forward(&e.view(), &b.view()).unwrap();
        assert_eq!(out.shape(), &[2]);
        assert_relative_eq!(out, arr1(&[0.0f32, 4.0]).into_dyn(), epsilon = EPSILON);
    }

    #[test]
    fn test_normalizes_non_unit_direction() {
        let e = arr2(&[[1.0f32, 0.0], [0.0, 1.0]]).into_dyn();
        let b = arr1(&[1.0f32, 1.0]);
        let out = HardDebiaser::default().forward(&e.view(), &b.view()).unwrap();
        let expected = arr2(&[[0.5f32, -0.5], [-0.5, 0.5]]).into_dyn();
        assert_relative_eq!(out, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_zero_direction_propagates_nan() {
        let e = arr2(&[[1.0f32, 2.0], [0.0, 0.0]]).into_dyn();
        let b = Array1::<f32>::zeros(2);
        let out = HardDebiaser::default().forward(&e.view(), &b.view()).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_shape_mismatch() {
        let e = arr2(&[[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn();
        let b = arr1(&[1.0f32, 0.0]);
        let err = HardDebiaser::default().forward(&e.view(), &b.view()).unwrap_err();
        assert!(matches!(err, DebiasError::ShapeMismatch { expected: 2, .. }));
    }

    #[test]
    fn test_direction_gradient_is_orthogonal_to_direction() {
        // Output is invariant to rescaling b, so dL/db has no component along b.
        let e = arr2(&[[0.4f32, -1.0, 2.0], [1.2, 0.1, -0.3]]).into_dyn();
        let b = arr1(&[2.0f32, -1.0, 0.5]);
        let g = arr2(&[[1.0f32, 2.0, 3.0], [-1.0, 0.5, 0.0]]).into_dyn();
        let grads = HardDebiaser::new(true).backward(&g.view(), &e.view(), &b.view()).unwrap();
        assert_relative_eq!(grads.bias_direction.dot(&b), 0.0, epsilon = 1e-4);
    }
}
