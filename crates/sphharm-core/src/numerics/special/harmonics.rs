//! Direct evaluation of fully normalized associated Legendre functions and of
//! the potential double sum built from them.
//!
//! This path forms every `P[n,m]` explicitly, so it loses range quickly with
//! degree. It exists as an independent reference for the Clenshaw engine at
//! low degree and is limited to [`DIRECT_SUMMATION_MAX_DEGREE`].

use crate::coefficients::CoefficientView;
use crate::common::NumericLimits;
use crate::numerics::frame::SphericalFrame;

pub const DIRECT_SUMMATION_MAX_DEGREE: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectSummationError {
    #[error("direct summation supports degree <= {limit}, got {degree}")]
    DegreeAboveLimit { degree: usize, limit: usize },
    #[error("associated Legendre function requires order <= degree, got n={degree} m={order}")]
    OrderAboveDegree { degree: usize, order: usize },
}

/// Fully normalized `P[n,m](t)` in the geodesy convention: no Condon-Shortley
/// phase and `(2 - delta_m0)(2n + 1)` normalization over the sphere.
pub fn normalized_legendre(
    degree: usize,
    order: usize,
    t: f64,
) -> Result<f64, DirectSummationError> {
    if order > degree {
        return Err(DirectSummationError::OrderAboveDegree { degree, order });
    }
    if degree > DIRECT_SUMMATION_MAX_DEGREE {
        return Err(DirectSummationError::DegreeAboveLimit {
            degree,
            limit: DIRECT_SUMMATION_MAX_DEGREE,
        });
    }

    let order_weight = if order == 0 { 1.0 } else { 2.0 };
    let normalization =
        (order_weight * ((2 * degree + 1) as f64) * factorial_ratio(degree, order)).sqrt();
    Ok(normalization * associated_legendre_polynomial(degree, order, t))
}

/// Potential double sum evaluated term by term.
pub fn evaluate_direct(
    coefficients: &CoefficientView<'_>,
    point: [f64; 3],
    reference_radius: f64,
) -> Result<f64, DirectSummationError> {
    let degree = coefficients.degree();
    if degree > DIRECT_SUMMATION_MAX_DEGREE {
        return Err(DirectSummationError::DegreeAboveLimit {
            degree,
            limit: DIRECT_SUMMATION_MAX_DEGREE,
        });
    }

    let frame = SphericalFrame::from_cartesian(
        point,
        reference_radius,
        NumericLimits::for_f64().epsilon_floor(),
    );
    let longitude = frame.slam.atan2(frame.clam);

    let mut total = 0.0;
    let mut radial_power = frame.q;
    for n in 0..=degree {
        let mut degree_sum = 0.0;
        for m in 0..=n {
            let Some((c, s)) = coefficients.get(n, m) else {
                continue;
            };
            let angle = (m as f64) * longitude;
            let legendre = normalized_legendre(n, m, frame.t)?;
            degree_sum += (c * angle.cos() + s * angle.sin()) * legendre;
        }
        total += radial_power * degree_sum;
        radial_power *= frame.q;
    }

    Ok(total)
}

fn associated_legendre_polynomial(degree: usize, order: usize, x: f64) -> f64 {
    debug_assert!(order <= degree);

    let mut p_mm = 1.0;
    if order > 0 {
        let root = (1.0 - x * x).max(0.0).sqrt();
        for k in 1..=order {
            p_mm *= ((2 * k - 1) as f64) * root;
        }
    }

    if degree == order {
        return p_mm;
    }

    let p_m_plus_1_m = x * ((2 * order + 1) as f64) * p_mm;
    if degree == order + 1 {
        return p_m_plus_1_m;
    }

    let mut p_lm2 = p_mm;
    let mut p_lm1 = p_m_plus_1_m;
    for l in (order + 2)..=degree {
        let numerator = ((2 * l - 1) as f64) * x * p_lm1 - ((l + order - 1) as f64) * p_lm2;
        let p_lm = numerator / ((l - order) as f64);
        p_lm2 = p_lm1;
        p_lm1 = p_lm;
    }

    p_lm1
}

/// `(n - m)! / (n + m)!`
fn factorial_ratio(degree: usize, order: usize) -> f64 {
    if order == 0 {
        return 1.0;
    }

    let mut ratio = 1.0;
    for term in (degree - order + 1)..=(degree + order) {
        ratio /= term as f64;
    }

    ratio
}
