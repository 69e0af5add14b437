pub mod clenshaw;
pub mod frame;
pub mod gradient;
pub(crate) mod recurrence;
pub mod special;

pub use clenshaw::{
    ClenshawEngine, PotentialEvaluationApi, evaluate_value, evaluate_value_and_gradient,
};
pub use frame::SphericalFrame;
