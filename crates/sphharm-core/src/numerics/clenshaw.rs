//! Potential synthesis from a fully normalized spherical-harmonic expansion
//! via a doubly nested Clenshaw recurrence.
//!
//! ```text
//! V(r, theta, lambda) = sum(m = 0..N) sum(n = m..N)
//!     q^(n+1) * (C[n,m] cos(m lambda) + S[n,m] sin(m lambda)) * P[n,m](cos theta)
//! ```
//!
//! The inner sum over degree runs at fixed order and yields one cosine and
//! one sine scalar per order; those feed an outer recurrence over order whose
//! `m = 0` step closes the sum. Neither recurrence materializes a Legendre
//! function, so the sum stays stable at degrees where `P[n,m]` itself would
//! underflow. Every coefficient is multiplied by [`NumericLimits::scale`] on
//! input and the result divided by it at the end.
//!
//! References: R. E. Deakin, "Derivatives of the earth's potentials" (1998);
//! S. A. Holmes and W. E. Featherstone, J. Geodesy 76, 279-299 (2002).

use super::frame::SphericalFrame;
use super::recurrence::{OuterSeed, SeriesPair, inner_alpha, inner_beta, outer_alpha, outer_beta};
use crate::coefficients::{CoefficientView, TraversalCounter};
use crate::common::NumericLimits;
use crate::domain::{HarmonicResult, ValueAndGradient};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClenshawEngine {
    limits: NumericLimits,
}

impl ClenshawEngine {
    pub fn new() -> Self {
        Self {
            limits: NumericLimits::for_f64(),
        }
    }

    pub const fn limits(&self) -> NumericLimits {
        self.limits
    }

    /// Potential at `point` for coefficients referred to `reference_radius`.
    pub fn value(
        &self,
        coefficients: &CoefficientView<'_>,
        point: [f64; 3],
        reference_radius: f64,
    ) -> HarmonicResult<f64> {
        let degree = coefficients.degree();
        tracing::trace!(
            degree,
            coefficient_count = coefficients.index().len(),
            "evaluating potential value"
        );

        let epsilon_floor = self.limits.epsilon_floor();
        let frame = SphericalFrame::from_cartesian(point, reference_radius, epsilon_floor);
        let (tq, q2, uq, uq2) = (frame.tq(), frame.q2(), frame.uq(), frame.uq2());
        let scale = self.limits.scale();
        let cosine = coefficients.cosine();
        let sine = coefficients.sine();

        let mut slots = TraversalCounter::new(coefficients.index());
        let mut outer = SeriesPair::default();
        let mut value = 0.0;
        for m in (0..=degree).rev() {
            let mut inner = SeriesPair::default();
            for n in (m..=degree).rev() {
                let k = slots.next_slot(n, m)?;
                inner.step(
                    inner_alpha(n, m, tq),
                    inner_beta(n, m, q2),
                    scale * cosine[k],
                    scale * sine[k],
                );
            }

            let (cv, sv) = inner.current();
            if m > 0 {
                outer.step(outer_alpha(m, frame.clam, uq), outer_beta(m, uq2), cv, sv);
            } else {
                let seed = OuterSeed::new(uq, uq2);
                value = frame.q * outer.close_order_zero(cv, frame.clam, frame.slam, seed);
            }
        }
        slots.finish()?;

        Ok(value / scale)
    }
}

pub trait PotentialEvaluationApi {
    fn evaluate_value(
        &self,
        coefficients: &CoefficientView<'_>,
        point: [f64; 3],
        reference_radius: f64,
    ) -> HarmonicResult<f64>;

    fn evaluate_value_and_gradient(
        &self,
        coefficients: &CoefficientView<'_>,
        point: [f64; 3],
        reference_radius: f64,
    ) -> HarmonicResult<ValueAndGradient>;
}

impl PotentialEvaluationApi for ClenshawEngine {
    fn evaluate_value(
        &self,
        coefficients: &CoefficientView<'_>,
        point: [f64; 3],
        reference_radius: f64,
    ) -> HarmonicResult<f64> {
        self.value(coefficients, point, reference_radius)
    }

    fn evaluate_value_and_gradient(
        &self,
        coefficients: &CoefficientView<'_>,
        point: [f64; 3],
        reference_radius: f64,
    ) -> HarmonicResult<ValueAndGradient> {
        self.value_and_gradient(coefficients, point, reference_radius)
    }
}

/// Evaluates the degree-`degree` expansion with flattened order-major
/// coefficients at `(x, y, z)`.
pub fn evaluate_value(
    degree: usize,
    cosine: &[f64],
    sine: &[f64],
    x: f64,
    y: f64,
    z: f64,
    reference_radius: f64,
) -> HarmonicResult<f64> {
    let coefficients = CoefficientView::new(degree, cosine, sine)?;
    ClenshawEngine::new().value(&coefficients, [x, y, z], reference_radius)
}

/// Like [`evaluate_value`], additionally returning the Cartesian gradient.
pub fn evaluate_value_and_gradient(
    degree: usize,
    cosine: &[f64],
    sine: &[f64],
    x: f64,
    y: f64,
    z: f64,
    reference_radius: f64,
) -> HarmonicResult<ValueAndGradient> {
    let coefficients = CoefficientView::new(degree, cosine, sine)?;
    ClenshawEngine::new().value_and_gradient(&coefficients, [x, y, z], reference_radius)
}

#[cfg(test)]
mod tests {
    use super::{ClenshawEngine, evaluate_value};
    use crate::coefficients::CoefficientView;
    use crate::common::NumericLimits;
    use crate::domain::HarmonicError;

    fn assert_scalar_close(label: &str, expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) {
        let abs_diff = (actual - expected).abs();
        let rel_diff = abs_diff / expected.abs().max(1.0e-300);
        assert!(
            abs_diff <= abs_tol || rel_diff <= rel_tol,
            "{label} expected={expected:.15e} actual={actual:.15e} abs_diff={abs_diff:.15e} rel_diff={rel_diff:.15e}"
        );
    }

    #[test]
    fn degree_zero_is_scaled_monopole() {
        let a = 6_378_137.0;
        let points: [[f64; 3]; 3] = [[7.0e6, 0.0, 0.0], [1.0e6, -2.0e6, 3.0e6], [0.0, 0.0, -9.0e6]];
        for point in points {
            let r = point[0].hypot(point[1]).hypot(point[2]);
            let value = evaluate_value(0, &[3.5], &[0.0], point[0], point[1], point[2], a)
                .expect("degree 0 should evaluate");
            assert_scalar_close("monopole", 3.5 * a / r, value, 0.0, 1.0e-15);
        }
    }

    #[test]
    fn sine_of_order_zero_does_not_contribute() {
        let with_sine = evaluate_value(1, &[1.0, 0.2, 0.0], &[5.0, 7.0, 0.0], 1.0, 2.0, 3.0, 1.5)
            .expect("degree 1");
        let without_sine = evaluate_value(1, &[1.0, 0.2, 0.0], &[0.0, 0.0, 0.0], 1.0, 2.0, 3.0, 1.5)
            .expect("degree 1");
        assert_eq!(with_sine, without_sine);
    }

    #[test]
    fn dipole_matches_closed_form() {
        // V = a C00 / r + sqrt(3) a^2 (C10 z + C11 x + S11 y) / r^3
        let (c00, c10, c11, s11) = (1.0, -0.3, 0.7, 0.45);
        let a = 2.0;
        let [x, y, z]: [f64; 3] = [1.2, -0.7, 2.9];
        let r = (x * x + y * y + z * z).sqrt();
        let expected =
            a * c00 / r + 3.0_f64.sqrt() * a * a * (c10 * z + c11 * x + s11 * y) / (r * r * r);

        let value = evaluate_value(1, &[c00, c10, c11], &[0.0, 0.0, s11], x, y, z, a)
            .expect("degree 1");
        assert_scalar_close("dipole", expected, value, 1.0e-15, 1.0e-13);
    }

    #[test]
    fn shape_errors_surface_before_evaluation() {
        let error = evaluate_value(2, &[0.0; 6], &[0.0; 5], 1.0, 0.0, 0.0, 1.0)
            .expect_err("short sine vector");
        assert_eq!(
            error,
            HarmonicError::CoefficientSizeMismatch {
                degree: 2,
                expected: 6,
                cosine: 6,
                sine: 5,
            }
        );
    }

    #[test]
    fn origin_and_pole_values_are_finite() {
        let cosine = [1.0, 0.5, 0.25, -0.1, 0.3, 0.2];
        let sine = [0.0, 0.0, 0.1, 0.0, -0.2, 0.05];
        let coefficients = CoefficientView::new(2, &cosine, &sine).expect("degree 2");
        let engine = ClenshawEngine::new();

        for point in [[0.0, 0.0, 0.0], [0.0, 0.0, 1.3], [0.0, 0.0, -4.0]] {
            let value = engine
                .value(&coefficients, point, 1.0)
                .expect("degenerate point should evaluate");
            assert!(value.is_finite(), "point {point:?} gave {value}");
        }
    }

    #[test]
    fn engines_always_use_f64_limits() {
        assert_eq!(ClenshawEngine::new().limits(), NumericLimits::for_f64());
        assert_eq!(ClenshawEngine::default().limits(), NumericLimits::for_f64());
    }
}
