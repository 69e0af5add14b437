//! Value and gradient in a single pass of the Clenshaw recurrence.
//!
//! Four accumulator families share the recurrence coefficients of
//! [`ClenshawEngine::value`]: the value itself, the radial derivative (terms
//! weighted by `n + 1`), the longitude derivative (`m S`, `-m C` fed into the
//! outer sum) and the colatitude derivative. The latter uses
//!
//! ```text
//! dP[n,m]/dtheta = m (t/u) P[n,m] - e[n,m] P[n,m+1]
//! ```
//!
//! so it needs an auxiliary inner sum over the next lower order's
//! coefficients `C[n,m-1]`, `S[n,m-1]`, carried from one order to the next.

use super::clenshaw::ClenshawEngine;
use super::frame::SphericalFrame;
use super::recurrence::{
    OuterSeed, SeriesPair, diagonal_ratio, inner_alpha, inner_beta, lower_order_weight,
    outer_alpha, outer_beta,
};
use crate::coefficients::{CoefficientView, TraversalCounter};
use crate::domain::{HarmonicError, HarmonicResult, ValueAndGradient};

#[derive(Debug, Default)]
struct InnerFamilies {
    value: SeriesPair,
    radial: SeriesPair,
    lower_order: SeriesPair,
}

#[derive(Debug, Default)]
struct OuterFamilies {
    value: SeriesPair,
    radial: SeriesPair,
    longitude: SeriesPair,
    colatitude: SeriesPair,
}

/// `V`, `dV/dr`, `dV/(r u dlambda)` and `dV/(r dtheta)` at the query point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SphericalPartials {
    value: f64,
    radial: f64,
    longitude: f64,
    colatitude: f64,
}

impl ClenshawEngine {
    pub fn value_and_gradient(
        &self,
        coefficients: &CoefficientView<'_>,
        point: [f64; 3],
        reference_radius: f64,
    ) -> HarmonicResult<ValueAndGradient> {
        let degree = coefficients.degree();
        tracing::trace!(
            degree,
            coefficient_count = coefficients.index().len(),
            "evaluating potential value and gradient"
        );

        let limits = self.limits();
        let epsilon_floor = limits.epsilon_floor();
        let frame = SphericalFrame::from_cartesian(point, reference_radius, epsilon_floor);
        let (tq, q2, uq, uq2) = (frame.tq(), frame.q2(), frame.uq(), frame.uq2());
        let tu = frame.t / frame.u;
        let scale = limits.scale();
        let index = coefficients.index();
        let cosine = coefficients.cosine();
        let sine = coefficients.sine();

        let mut slots = TraversalCounter::new(index);
        let mut outer = OuterFamilies::default();
        // lower-order sums of the previous (higher) order
        let mut carried = (0.0, 0.0);
        let mut partials = SphericalPartials::default();
        for m in (0..=degree).rev() {
            let mut inner = InnerFamilies::default();
            let stride = index.lower_order_stride(m);
            for n in (m..=degree).rev() {
                let k = slots.next_slot(n, m)?;
                let alpha = inner_alpha(n, m, tq);
                let beta = inner_beta(n, m, q2);
                let ck = scale * cosine[k];
                let sk = scale * sine[k];
                let weight = (n + 1) as f64;

                inner.value.step(alpha, beta, ck, sk);
                inner.radial.step(alpha, beta, weight * ck, weight * sk);
                if m > 0 {
                    let lower = k
                        .checked_sub(stride)
                        .ok_or(HarmonicError::IndexCounterUnderflow { degree: n, order: m })?;
                    let e = lower_order_weight(n, m) * scale;
                    inner
                        .lower_order
                        .step(alpha, beta, e * cosine[lower], e * sine[lower]);
                }
            }

            let order = m as f64;
            let (cv, sv) = inner.value.current();
            let (cvr, svr) = inner.radial.current();
            let ratio = diagonal_ratio(m, uq);
            let cvt = order * tu * cv - ratio * carried.0;
            let svt = order * tu * sv - ratio * carried.1;
            carried = inner.lower_order.current();

            if m > 0 {
                let alpha = outer_alpha(m, frame.clam, uq);
                let beta = outer_beta(m, uq2);
                outer.value.step(alpha, beta, cv, sv);
                outer.radial.step(alpha, beta, cvr, svr);
                outer.longitude.step(alpha, beta, order * sv, -order * cv);
                outer.colatitude.step(alpha, beta, cvt, svt);
            } else {
                let seed = OuterSeed::new(uq, uq2);
                let close = |family: &SeriesPair, term: f64| {
                    family.close_order_zero(term, frame.clam, frame.slam, seed)
                };
                let qs = frame.q / scale;
                let qr = qs * frame.inverse_r;
                partials = SphericalPartials {
                    value: qs * close(&outer.value, cv),
                    radial: -qr * close(&outer.radial, cvr),
                    longitude: qr / frame.u * close(&outer.longitude, 0.0),
                    colatitude: qr * close(&outer.colatitude, cvt),
                };
            }
        }
        slots.finish()?;

        let gradient =
            frame.rotate_to_cartesian(partials.radial, partials.longitude, partials.colatitude);
        Ok(ValueAndGradient::new(partials.value, gradient))
    }
}
