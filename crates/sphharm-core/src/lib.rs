//! Spherical-harmonic potential synthesis.
//!
//! Evaluates a degree-`N` fully normalized expansion (gravity or magnetic
//! potential models) and its Cartesian gradient at arbitrary points using
//! Clenshaw summation over a flattened triangular coefficient array.

pub mod coefficients;
pub mod common;
pub mod domain;
pub mod model;
pub mod numerics;

pub use coefficients::{CoefficientSet, CoefficientView, TriangularIndex};
pub use domain::{ErrorCategory, HarmonicError, HarmonicResult, ValueAndGradient};
pub use model::SphericalHarmonicModel;
pub use numerics::{
    ClenshawEngine, PotentialEvaluationApi, evaluate_value, evaluate_value_and_gradient,
};
