use super::Debiaser;
use crate::ops::Projection;

/// Linear debiaser.
///
/// Removes the component along the bias direction as `x - (x·b) * b`,
/// taking `b` to be unit length. With a non-unit `b` the result is not an
/// orthogonal projection; use [`super::HardDebiaser`] for that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearDebiaser {
    requires_grad: bool,
}

impl LinearDebiaser {
    pub fn new(requires_grad: bool) -> Self {
        Self { requires_grad }
    }
}

impl Debiaser for LinearDebiaser {
    fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    fn projection(&self) -> Projection {
        Projection::Unit
    }
}
