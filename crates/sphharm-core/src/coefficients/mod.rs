//! Fully normalized spherical-harmonic coefficient storage.

pub mod index;

pub use index::{MAX_COEFFICIENTS, TraversalCounter, TriangularIndex, coefficient_count};

use crate::domain::{HarmonicError, HarmonicResult};
use serde::{Deserialize, Serialize};

/// Borrowed, size-validated cosine/sine coefficient slices for one degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientView<'a> {
    index: TriangularIndex,
    cosine: &'a [f64],
    sine: &'a [f64],
}

impl<'a> CoefficientView<'a> {
    pub fn new(degree: usize, cosine: &'a [f64], sine: &'a [f64]) -> HarmonicResult<Self> {
        let index = TriangularIndex::new(degree)?;
        validate_lengths(&index, cosine.len(), sine.len())?;

        Ok(Self {
            index,
            cosine,
            sine,
        })
    }

    pub const fn degree(&self) -> usize {
        self.index.degree()
    }

    pub const fn index(&self) -> &TriangularIndex {
        &self.index
    }

    pub const fn cosine(&self) -> &'a [f64] {
        self.cosine
    }

    pub const fn sine(&self) -> &'a [f64] {
        self.sine
    }

    pub fn get(&self, n: usize, m: usize) -> Option<(f64, f64)> {
        let slot = self.index.offset(n, m)?;
        Some((self.cosine[slot], self.sine[slot]))
    }
}

fn validate_lengths(index: &TriangularIndex, cosine: usize, sine: usize) -> HarmonicResult<()> {
    if cosine != index.len() || sine != index.len() {
        return Err(HarmonicError::CoefficientSizeMismatch {
            degree: index.degree(),
            expected: index.len(),
            cosine,
            sine,
        });
    }

    Ok(())
}

/// Owned coefficient set. Deserialization re-validates the triangular shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawCoefficientSet", into = "RawCoefficientSet")]
pub struct CoefficientSet {
    index: TriangularIndex,
    cosine: Vec<f64>,
    sine: Vec<f64>,
}

impl CoefficientSet {
    pub fn new(degree: usize, cosine: Vec<f64>, sine: Vec<f64>) -> HarmonicResult<Self> {
        let index = TriangularIndex::new(degree)?;
        validate_lengths(&index, cosine.len(), sine.len())?;

        Ok(Self {
            index,
            cosine,
            sine,
        })
    }

    pub fn zeros(degree: usize) -> HarmonicResult<Self> {
        let index = TriangularIndex::new(degree)?;
        Ok(Self {
            index,
            cosine: vec![0.0; index.len()],
            sine: vec![0.0; index.len()],
        })
    }

    /// Builds a set from `(C[n,m], S[n,m])` pairs produced in storage order.
    pub fn from_fn<F>(degree: usize, mut coefficient: F) -> HarmonicResult<Self>
    where
        F: FnMut(usize, usize) -> (f64, f64),
    {
        let index = TriangularIndex::new(degree)?;
        let mut cosine = Vec::with_capacity(index.len());
        let mut sine = Vec::with_capacity(index.len());
        for m in 0..=degree {
            for n in m..=degree {
                let (c, s) = coefficient(n, m);
                cosine.push(c);
                sine.push(s);
            }
        }

        Ok(Self {
            index,
            cosine,
            sine,
        })
    }

    pub const fn degree(&self) -> usize {
        self.index.degree()
    }

    pub const fn index(&self) -> &TriangularIndex {
        &self.index
    }

    pub fn cosine(&self) -> &[f64] {
        &self.cosine
    }

    pub fn sine(&self) -> &[f64] {
        &self.sine
    }

    pub fn view(&self) -> CoefficientView<'_> {
        CoefficientView {
            index: self.index,
            cosine: &self.cosine,
            sine: &self.sine,
        }
    }

    pub fn get(&self, n: usize, m: usize) -> Option<(f64, f64)> {
        self.view().get(n, m)
    }

    /// Replaces the `(n, m)` pair, returning the previous one, or `None` when
    /// `(n, m)` lies outside the triangle.
    pub fn set(&mut self, n: usize, m: usize, cosine: f64, sine: f64) -> Option<(f64, f64)> {
        let slot = self.index.offset(n, m)?;
        let previous = (self.cosine[slot], self.sine[slot]);
        self.cosine[slot] = cosine;
        self.sine[slot] = sine;
        Some(previous)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            index: self.index,
            cosine: self.cosine.iter().map(|value| value * factor).collect(),
            sine: self.sine.iter().map(|value| value * factor).collect(),
        }
    }

    /// Truncates to a lower degree or zero-pads to a higher one.
    pub fn with_degree(&self, degree: usize) -> HarmonicResult<Self> {
        Self::from_fn(degree, |n, m| self.get(n, m).unwrap_or((0.0, 0.0)))
    }
}

#[derive(Deserialize, Serialize)]
struct RawCoefficientSet {
    degree: usize,
    cosine: Vec<f64>,
    sine: Vec<f64>,
}

impl TryFrom<RawCoefficientSet> for CoefficientSet {
    type Error = HarmonicError;

    fn try_from(raw: RawCoefficientSet) -> Result<Self, Self::Error> {
        Self::new(raw.degree, raw.cosine, raw.sine)
    }
}

impl From<CoefficientSet> for RawCoefficientSet {
    fn from(set: CoefficientSet) -> Self {
        Self {
            degree: set.index.degree(),
            cosine: set.cosine,
            sine: set.sine,
        }
    }
}
