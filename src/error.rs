//! Error types for fairness_debias.

/// Errors raised by debiaser calls.
#[derive(Debug, thiserror::Error)]
pub enum DebiasError {
    /// Trailing dimension of the embeddings disagrees with the bias direction.
    #[error("shape mismatch: embeddings of shape {found:?} cannot be debiased along a direction of length {expected}")]
    ShapeMismatch {
        /// Length of the bias direction.
        expected: usize,
        /// Full shape of the embeddings.
        found: Vec<usize>,
    },

    /// Upstream gradient does not have the shape of the embeddings.
    #[error("gradient shape mismatch: expected {expected:?}, got {found:?}")]
    GradShapeMismatch {
        /// Shape of the embeddings passed to forward.
        expected: Vec<usize>,
        /// Shape of the gradient handed to backward.
        found: Vec<usize>,
    },

    /// Backward was requested from a call that recorded nothing.
    #[error("gradient recording is disabled for this debiaser (requires_grad = false)")]
    GradientDisabled,

    /// Registry name not recognised by [`crate::DebiaserKind`].
    #[error("unknown debiaser: {0:?} (expected \"hard\" or \"linear\")")]
    UnknownDebiaser(String),

    /// Reshape failure from ndarray.
    #[error(transparent)]
    Layout(#[from] ndarray::ShapeError),
}

/// Result type alias for debiaser operations.
pub type Result<T> = std::result::Result<T, DebiasError>;
