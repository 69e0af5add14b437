//! Triangular `(degree, order)` indexing for flattened coefficient storage.
//!
//! Coefficients are stored order-major: every `m = 0` term by increasing
//! degree, then every `m = 1` term, and so on. This is exactly the reverse of
//! the Clenshaw traversal (order descending from `N`, degree descending from
//! `N` to `m`), so a counter decremented once per inner step lands on the
//! slot of the term being summed.

use crate::domain::{HarmonicError, HarmonicResult};

/// Largest coefficient count whose `f64` storage fits in the allocation
/// limit of the target platform. Bounded by `isize::MAX` bytes rather than
/// `usize::MAX` elements, so 32-bit targets stop below degree 23170.
pub const MAX_COEFFICIENTS: usize = isize::MAX as usize / size_of::<f64>();

/// Number of `(n, m)` pairs with `0 <= m <= n <= degree`, or `None` when the
/// count overflows `usize`.
pub fn coefficient_count(degree: usize) -> Option<usize> {
    let rows = degree.checked_add(1)?;
    let columns = degree.checked_add(2)?;
    if rows % 2 == 0 {
        (rows / 2).checked_mul(columns)
    } else {
        rows.checked_mul(columns / 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangularIndex {
    degree: usize,
    len: usize,
}

impl TriangularIndex {
    pub fn new(degree: usize) -> HarmonicResult<Self> {
        let len = coefficient_count(degree)
            .filter(|count| *count <= MAX_COEFFICIENTS)
            .ok_or(HarmonicError::DegreeTooLarge {
                degree,
                max_degree: Self::max_degree(),
            })?;

        Ok(Self { degree, len })
    }

    pub fn max_degree() -> usize {
        let fits = |degree: usize| {
            coefficient_count(degree).is_some_and(|count| count <= MAX_COEFFICIENTS)
        };

        let mut degree = (2.0 * MAX_COEFFICIENTS as f64).sqrt() as usize;
        while !fits(degree) {
            degree -= 1;
        }
        while fits(degree + 1) {
            degree += 1;
        }
        degree
    }

    pub const fn degree(&self) -> usize {
        self.degree
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flat slot of the `(n, m)` coefficient.
    pub fn offset(&self, n: usize, m: usize) -> Option<usize> {
        if m > n || n > self.degree {
            return None;
        }

        Some(self.order_start(m) + (n - m))
    }

    /// Inverse of [`TriangularIndex::offset`].
    pub fn degree_order(&self, slot: usize) -> Option<(usize, usize)> {
        let mut remainder = slot;
        for m in 0..=self.degree {
            let block = self.degree - m + 1;
            if remainder < block {
                return Some((m + remainder, m));
            }
            remainder -= block;
        }

        None
    }

    /// Distance between the slots of `(n, m)` and `(n, m - 1)` for `m >= 1`.
    pub const fn lower_order_stride(&self, m: usize) -> usize {
        self.degree - m + 1
    }

    /// `(n, m)` pairs in the order the Clenshaw summation visits them.
    pub fn summation_order(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let degree = self.degree;
        (0..=degree)
            .rev()
            .flat_map(move |m| (m..=degree).rev().map(move |n| (n, m)))
    }

    fn order_start(&self, m: usize) -> usize {
        // sum over j < m of (degree - j + 1)
        m * (2 * self.degree + 3 - m) / 2
    }
}

/// Running slot counter decremented in lockstep with the summation loops.
#[derive(Debug)]
pub struct TraversalCounter {
    remaining: usize,
}

impl TraversalCounter {
    pub fn new(index: &TriangularIndex) -> Self {
        Self {
            remaining: index.len(),
        }
    }

    pub fn next_slot(&mut self, degree: usize, order: usize) -> HarmonicResult<usize> {
        self.remaining = self
            .remaining
            .checked_sub(1)
            .ok_or(HarmonicError::IndexCounterUnderflow { degree, order })?;
        Ok(self.remaining)
    }

    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn finish(self) -> HarmonicResult<()> {
        if self.remaining != 0 {
            tracing::error!(
                residual = self.remaining,
                "triangular index counter not exhausted after summation"
            );
            return Err(HarmonicError::IndexCounterMismatch {
                residual: self.remaining,
            });
        }

        Ok(())
    }
}
