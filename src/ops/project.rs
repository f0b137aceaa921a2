use crate::ops::batch::dot_rows;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};

/// How the projection coefficient along a direction is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Divide by `b·b`; exact for any nonzero direction.
    Orthogonal,
    /// Assume `‖b‖ = 1` and skip the division.
    Unit,
}

impl Projection {
    /// Factor applied to `x·b` before subtracting along `b`.
    ///
    /// `Orthogonal` on a zero direction gives `inf`; every output element
    /// then comes out NaN.
    pub fn scale(self, direction: &ArrayView1<f32>) -> f32 {
        match self {
            Projection::Orthogonal => 1.0 / direction.dot(direction),
            Projection::Unit => 1.0,
        }
    }
}

/// Removes the component along `direction` from every row of `x`.
/// x: (rows, dim), direction: (dim,). Returns `x - (x·b) * scale * b` per row.
///
/// The result is always in standard (row-major) layout, whatever the layout
/// of `x`, so callers can `into_shape` it back to the folded shape.
pub fn remove_projection(x: &ArrayView2<f32>, direction: &ArrayView1<f32>, scale: f32) -> Array2<f32> {
    let coef = dot_rows(x, direction) * scale;
    let mut result = x.as_standard_layout().into_owned();
    Zip::from(result.rows_mut())
        .and(&coef)
        .par_for_each(|mut row, &k| row.scaled_add(-k, direction));
    result
}

/// Vector-Jacobian product of [`remove_projection`].
///
/// Returns `(grad_x, grad_direction)` for upstream gradient `grad_output`
/// of shape (rows, dim). With `a = x·b`, `h = g·b` and `k` the projection
/// scale:
///
/// * `grad_x = g - h·k·b`
/// * `grad_b = -k·Σ(h·x + a·g)`, plus `2·k²·Σ(a·h)·b` for
///   [`Projection::Orthogonal`] since `k` itself depends on `b`.
pub fn remove_projection_vjp(
    grad_output: &ArrayView2<f32>,
    x: &ArrayView2<f32>,
    direction: &ArrayView1<f32>,
    projection: Projection,
) -> (Array2<f32>, Array1<f32>) {
    let scale = projection.scale(direction);
    let a = dot_rows(x, direction);
    let h = dot_rows(grad_output, direction);

    let grad_x = remove_projection(grad_output, direction, scale);

    let mut grad_b = (&x.t().dot(&h) + &grad_output.t().dot(&a)) * (-scale);
    if projection == Projection::Orthogonal {
        grad_b.scaled_add(2.0 * scale * scale * a.dot(&h), direction);
    }
    (grad_x, grad_b)
}
