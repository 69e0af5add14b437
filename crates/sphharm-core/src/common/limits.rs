//! Floating-point limits shared by the Clenshaw recurrences.
//!
//! Both values depend only on the working float type, never on the degree or
//! the query point. They are derived in [`NumericLimits::for_f64`] and cannot
//! be constructed any other way.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericLimits {
    scale: f64,
    epsilon_floor: f64,
}

impl NumericLimits {
    pub fn for_f64() -> Self {
        Self {
            scale: f64::from(f64::RADIX).powi(-(f64::MAX_EXP / 2)),
            epsilon_floor: f64::EPSILON * f64::EPSILON,
        }
    }

    /// `radix^(-max_exponent / 2)`, applied to every coefficient on input and
    /// divided back out of the final sums.
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Square of machine epsilon; lower bound for the sine of colatitude.
    pub const fn epsilon_floor(&self) -> f64 {
        self.epsilon_floor
    }
}

impl Default for NumericLimits {
    fn default() -> Self {
        Self::for_f64()
    }
}
