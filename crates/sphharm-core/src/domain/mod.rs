pub mod errors;

pub use errors::{ErrorCategory, HarmonicError, HarmonicResult};

use serde::{Deserialize, Serialize};

/// Potential value and its Cartesian gradient, expressed in the frame of the
/// query point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct ValueAndGradient {
    pub value: f64,
    pub gradient: [f64; 3],
}

impl ValueAndGradient {
    pub const fn new(value: f64, gradient: [f64; 3]) -> Self {
        Self { value, gradient }
    }

    pub fn gradient_norm(&self) -> f64 {
        let [gx, gy, gz] = self.gradient;
        gx.hypot(gy).hypot(gz)
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.gradient.iter().all(|component| component.is_finite())
    }
}
