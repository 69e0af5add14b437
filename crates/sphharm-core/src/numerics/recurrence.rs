//! Clenshaw accumulators and the closed-form recurrence coefficients for
//! fully normalized associated Legendre functions (Holmes and Featherstone
//! 2002, eqs. 11 and 13).

/// `y[k] = alpha * y[k+1] + beta * y[k+2] + c[k]`, keeping only the last two
/// partial sums.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ClenshawPair {
    pub(crate) current: f64,
    pub(crate) previous: f64,
}

impl ClenshawPair {
    pub(crate) fn step(&mut self, alpha: f64, beta: f64, term: f64) {
        let next = alpha * self.current + beta * self.previous + term;
        self.previous = self.current;
        self.current = next;
    }
}

/// Cosine and sine series advanced with the same recurrence coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SeriesPair {
    pub(crate) cosine: ClenshawPair,
    pub(crate) sine: ClenshawPair,
}

impl SeriesPair {
    pub(crate) fn step(&mut self, alpha: f64, beta: f64, cosine_term: f64, sine_term: f64) {
        self.cosine.step(alpha, beta, cosine_term);
        self.sine.step(alpha, beta, sine_term);
    }

    pub(crate) fn current(&self) -> (f64, f64) {
        (self.cosine.current, self.sine.current)
    }

    /// Final `m = 0` combination of an outer series with its order-zero term.
    pub(crate) fn close_order_zero(&self, term: f64, clam: f64, slam: f64, seed: OuterSeed) -> f64 {
        term + seed.alpha * (clam * self.cosine.current + slam * self.sine.current)
            + seed.beta * self.cosine.previous
    }
}

/// `alpha[l]` of the inner (degree) recurrence at fixed order.
pub(crate) fn inner_alpha(n: usize, m: usize, tq: f64) -> f64 {
    let (n, m) = (n as f64, m as f64);
    tq * (((2.0 * n + 1.0) * (2.0 * n + 3.0)) / ((n - m + 1.0) * (n + m + 1.0))).sqrt()
}

/// `beta[l + 1]` of the inner (degree) recurrence at fixed order.
pub(crate) fn inner_beta(n: usize, m: usize, q2: f64) -> f64 {
    let (n, m) = (n as f64, m as f64);
    -q2 * (((n - m + 1.0) * (n + m + 1.0) * (2.0 * n + 5.0))
        / ((n - m + 2.0) * (n + m + 2.0) * (2.0 * n + 1.0)))
        .sqrt()
}

/// `alpha[m]` of the outer (order) recurrence, `m > 0`.
pub(crate) fn outer_alpha(m: usize, clam: f64, uq: f64) -> f64 {
    let m = m as f64;
    clam * ((2.0 * (2.0 * m + 3.0)) / (m + 1.0)).sqrt() * uq
}

/// `beta[m + 1]` of the outer (order) recurrence, `m > 0`.
pub(crate) fn outer_beta(m: usize, uq2: f64) -> f64 {
    let m = m as f64;
    -(((2.0 * m + 3.0) * (2.0 * m + 5.0)) / (4.0 * (m + 1.0) * (m + 2.0))).sqrt() * uq2
}

/// Seed coefficients of the order-zero step, where the sine series vanishes
/// and the normalization differs by `sqrt(2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OuterSeed {
    pub(crate) alpha: f64,
    pub(crate) beta: f64,
}

impl OuterSeed {
    pub(crate) fn new(uq: f64, uq2: f64) -> Self {
        Self {
            alpha: 3.0_f64.sqrt() * uq,
            beta: -(15.0_f64 / 4.0).sqrt() * uq2,
        }
    }
}

/// `e[n, m - 1] = sqrt((n + m)(n - m + 1) / (m == 1 ? 2 : 1))`, linking
/// `P[n, m]` to the colatitude derivative of `P[n, m - 1]`.
pub(crate) fn lower_order_weight(n: usize, m: usize) -> f64 {
    let (nf, mf) = (n as f64, m as f64);
    let divisor = if m > 1 { 1.0 } else { 2.0 };
    ((nf + mf) * (nf - mf + 1.0) / divisor).sqrt()
}

/// `uq * sqrt((2m + 3)(m ? 1 : 2) / (2m + 2))`, the ratio `q P[m+1, m+1] / P[m, m]`
/// folded with the `e[n, m]` normalization.
pub(crate) fn diagonal_ratio(m: usize, uq: f64) -> f64 {
    let order_factor = if m > 0 { 1.0 } else { 2.0 };
    let m = m as f64;
    uq * ((2.0 * m + 3.0) * order_factor / (2.0 * m + 2.0)).sqrt()
}
