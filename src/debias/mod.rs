//! Debiasers: remove a bias direction from a batch of embeddings.
//!
//! Both variants take embeddings of shape `(batch_size, ..., dim)` and a
//! direction of shape `(dim,)`, and return an array of the embeddings'
//! shape whose rows carry no component along the direction.
//!
//! | Variant            | Per-row update                 |
//! |--------------------|--------------------------------|
//! | [`HardDebiaser`]   | `x - (x·b) / (b·b) * b`        |
//! | [`LinearDebiaser`] | `x - (x·b) * b` (assumes unit `b`) |

pub mod hard;
pub mod linear;

pub use self::hard::HardDebiaser;
pub use self::linear::LinearDebiaser;

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, ArrayD, ArrayView1, ArrayViewD};

use crate::autograd::{is_grad_enabled, set_grad_enabled};
use crate::error::{DebiasError, Result};
use crate::ops::{as_rows, remove_projection, remove_projection_vjp, Projection};

/// Shared capability of every debiaser.
///
/// Implementors only say how they scale the projection and whether they
/// record gradients; the forward and backward passes are shared.
pub trait Debiaser: fmt::Debug + Send + Sync {
    /// Whether calls run with gradient recording enabled.
    fn requires_grad(&self) -> bool;

    /// Projection rule applied along the bias direction.
    fn projection(&self) -> Projection;

    /// Removes the `bias_direction` component from every embedding.
    ///
    /// Fails with [`DebiasError::ShapeMismatch`] when the trailing dimension
    /// of `embeddings` is not `bias_direction.len()`.
    fn forward(&self, embeddings: &ArrayViewD<f32>, bias_direction: &ArrayView1<f32>) -> Result<ArrayD<f32>> {
        let _grad = set_grad_enabled(self.requires_grad());
        debias(self.projection(), embeddings, bias_direction)
    }

    /// Same as [`Debiaser::forward`], but keeps the inputs for a backward
    /// pass when gradient recording is on.
    fn forward_traced(&self, embeddings: &ArrayViewD<f32>, bias_direction: &ArrayView1<f32>) -> Result<Traced> {
        let _grad = set_grad_enabled(self.requires_grad());
        let output = debias(self.projection(), embeddings, bias_direction)?;
        let grad_fn = is_grad_enabled().then(|| ProjectionBackward {
            projection: self.projection(),
            embeddings: embeddings.to_owned(),
            bias_direction: bias_direction.to_owned(),
        });
        Ok(Traced { output, grad_fn })
    }

    /// Vector-Jacobian product of [`Debiaser::forward`] at
    /// `(embeddings, bias_direction)`.
    fn backward(
        &self,
        grad_output: &ArrayViewD<f32>,
        embeddings: &ArrayViewD<f32>,
        bias_direction: &ArrayView1<f32>,
    ) -> Result<Gradients> {
        if !self.requires_grad() {
            return Err(DebiasError::GradientDisabled);
        }
        let _grad = set_grad_enabled(true);
        debias_backward(self.projection(), grad_output, embeddings, bias_direction)
    }
}

/// Gradients of a scalar loss with respect to both debiaser inputs.
#[derive(Debug, Clone)]
pub struct Gradients {
    /// Same shape as the embeddings.
    pub embeddings: ArrayD<f32>,
    /// Same shape as the bias direction.
    pub bias_direction: Array1<f32>,
}

/// Saved inputs of a recorded forward call.
#[derive(Debug, Clone)]
pub struct ProjectionBackward {
    projection: Projection,
    embeddings: ArrayD<f32>,
    bias_direction: Array1<f32>,
}

impl ProjectionBackward {
    /// Gradients of both inputs for upstream gradient `grad_output`.
    pub fn apply(&self, grad_output: &ArrayViewD<f32>) -> Result<Gradients> {
        debias_backward(
            self.projection,
            grad_output,
            &self.embeddings.view(),
            &self.bias_direction.view(),
        )
    }
}

/// Output of [`Debiaser::forward_traced`].
#[derive(Debug, Clone)]
pub struct Traced {
    /// Debiased embeddings, same shape as the input.
    pub output: ArrayD<f32>,
    /// `None` when the forward ran with gradient recording off.
    pub grad_fn: Option<ProjectionBackward>,
}

impl Traced {
    /// Whether a backward pass is available.
    pub fn requires_grad(&self) -> bool {
        self.grad_fn.is_some()
    }

    /// Fails with [`DebiasError::GradientDisabled`] if nothing was recorded.
    pub fn backward(&self, grad_output: &ArrayViewD<f32>) -> Result<Gradients> {
        self.grad_fn
            .as_ref()
            .ok_or(DebiasError::GradientDisabled)?
            .apply(grad_output)
    }
}

/// Registry names for building a debiaser from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebiaserKind {
    Hard,
    Linear,
}

impl DebiaserKind {
    /// Boxed debiaser of this kind.
    pub fn build(self, requires_grad: bool) -> Box<dyn Debiaser> {
        match self {
            DebiaserKind::Hard => Box::new(HardDebiaser::new(requires_grad)),
            DebiaserKind::Linear => Box::new(LinearDebiaser::new(requires_grad)),
        }
    }
}

impl FromStr for DebiaserKind {
    type Err = DebiasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hard" => Ok(DebiaserKind::Hard),
            "linear" => Ok(DebiaserKind::Linear),
            _ => Err(DebiasError::UnknownDebiaser(s.to_string())),
        }
    }
}

impl fmt::Display for DebiaserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebiaserKind::Hard => f.write_str("hard"),
            DebiaserKind::Linear => f.write_str("linear"),
        }
    }
}

fn debias(projection: Projection, embeddings: &ArrayViewD<f32>, bias_direction: &ArrayView1<f32>) -> Result<ArrayD<f32>> {
    let rows = as_rows(embeddings, bias_direction.len())?;
    tracing::trace!(
        rows = rows.nrows(),
        dim = bias_direction.len(),
        ?projection,
        "removing bias direction"
    );
    let out = remove_projection(&rows.view(), bias_direction, projection.scale(bias_direction));
    Ok(out.into_shape(embeddings.raw_dim())?)
}

fn debias_backward(
    projection: Projection,
    grad_output: &ArrayViewD<f32>,
    embeddings: &ArrayViewD<f32>,
    bias_direction: &ArrayView1<f32>,
) -> Result<Gradients> {
    let dim = bias_direction.len();
    let x = as_rows(embeddings, dim)?;
    if grad_output.shape() != embeddings.shape() {
        return Err(DebiasError::GradShapeMismatch {
            expected: embeddings.shape().to_vec(),
            found: grad_output.shape().to_vec(),
        });
    }
    let g = as_rows(grad_output, dim)?;
    tracing::trace!(rows = x.nrows(), dim, ?projection, "bias removal backward");

    let (grad_x, grad_b) = remove_projection_vjp(&g.view(), &x.view(), bias_direction, projection);
    Ok(Gradients {
        embeddings: grad_x.into_shape(embeddings.raw_dim())?,
        bias_direction: grad_b,
    })
}
