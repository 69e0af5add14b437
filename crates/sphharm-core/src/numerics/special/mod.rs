pub mod harmonics;

pub use harmonics::{
    DIRECT_SUMMATION_MAX_DEGREE, DirectSummationError, evaluate_direct, normalized_legendre,
};
