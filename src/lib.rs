//! # fairness_debias
//!
//! Removes a bias direction (for example a gender axis) from batches of
//! word or sentence embeddings.
//!
//! ```
//! use fairness_debias::{Debiaser, HardDebiaser};
//! use ndarray::{arr1, arr2};
//!
//! let embeddings = arr2(&[[1.0f32, 0.0], [0.0, 1.0]]).into_dyn();
//! let direction = arr1(&[1.0f32, 1.0]);
//! let out = HardDebiaser::default()
//!     .forward(&embeddings.view(), &direction.view())
//!     .unwrap();
//! assert!((out[[0, 0]] - 0.5).abs() < 1e-6);
//! ```
//!
//! With the `python` feature the crate also builds as a Python extension
//! module exposing `HardDebiaser` and `LinearDebiaser`.

pub mod autograd;
pub mod debias;
pub mod error;
pub mod ops;

#[cfg(feature = "python")]
mod bindings;

pub use autograd::{is_grad_enabled, no_grad, set_grad_enabled, GradModeGuard};
pub use debias::{
    Debiaser, DebiaserKind, Gradients, HardDebiaser, LinearDebiaser, ProjectionBackward, Traced,
};
pub use error::{DebiasError, Result};
pub use ops::Projection;
