use crate::coefficients::CoefficientSet;
use crate::domain::{HarmonicResult, ValueAndGradient};
use crate::numerics::ClenshawEngine;
use serde::{Deserialize, Serialize};

/// A coefficient set bound to the reference radius it was normalized with.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SphericalHarmonicModel {
    coefficients: CoefficientSet,
    reference_radius: f64,
    #[serde(skip)]
    engine: ClenshawEngine,
}

impl SphericalHarmonicModel {
    pub fn new(coefficients: CoefficientSet, reference_radius: f64) -> Self {
        Self {
            coefficients,
            reference_radius,
            engine: ClenshawEngine::new(),
        }
    }

    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coefficients
    }

    pub const fn reference_radius(&self) -> f64 {
        self.reference_radius
    }

    pub const fn degree(&self) -> usize {
        self.coefficients.degree()
    }

    pub fn value(&self, point: [f64; 3]) -> HarmonicResult<f64> {
        self.engine
            .value(&self.coefficients.view(), point, self.reference_radius)
    }

    pub fn value_and_gradient(&self, point: [f64; 3]) -> HarmonicResult<ValueAndGradient> {
        self.engine
            .value_and_gradient(&self.coefficients.view(), point, self.reference_radius)
    }

    /// Evaluates every point, stopping at the first failure.
    pub fn values(&self, points: &[[f64; 3]]) -> HarmonicResult<Vec<f64>> {
        let view = self.coefficients.view();
        points
            .iter()
            .map(|point| self.engine.value(&view, *point, self.reference_radius))
            .collect()
    }

    /// Model of the same field truncated (or zero-padded) to `degree`.
    pub fn with_degree(&self, degree: usize) -> HarmonicResult<Self> {
        Ok(Self {
            coefficients: self.coefficients.with_degree(degree)?,
            reference_radius: self.reference_radius,
            engine: self.engine,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SphericalHarmonicModel;
    use crate::coefficients::CoefficientSet;
    use crate::common::NumericLimits;

    fn sample_model() -> SphericalHarmonicModel {
        let set = CoefficientSet::from_fn(3, |n, m| {
            if n == 0 {
                (1.0, 0.0)
            } else {
                (0.5_f64.powi((n + m + 8) as i32), -0.25 * m as f64)
            }
        })
        .expect("degree 3");
        SphericalHarmonicModel::new(set, 6_378_137.0)
    }

    #[test]
    fn values_match_pointwise_evaluation() {
        let model = sample_model();
        let points = [[7.0e6, 1.0e5, -2.0e5], [-6.5e6, 2.0e6, 1.0e6]];

        let values = model.values(&points).expect("batch");
        for (point, value) in points.iter().zip(&values) {
            assert_eq!(*value, model.value(*point).expect("single"));
        }
    }

    #[test]
    fn truncation_to_degree_zero_leaves_monopole() {
        let model = sample_model().with_degree(0).expect("degree 0");
        let point = [0.0, 7.0e6, 0.0];
        let value = model.value(point).expect("monopole");
        assert!((value - 6_378_137.0 / 7.0e6).abs() < 1.0e-15);
    }

    #[test]
    fn serde_round_trip_keeps_coefficients_and_radius() {
        let model = sample_model();
        let json = serde_json::to_string(&model).expect("serialize");
        assert!(!json.contains("engine"));
        assert!(!json.contains("scale"));
        let decoded: SphericalHarmonicModel = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, model);
        assert_eq!(decoded.degree(), 3);
    }

    #[test]
    fn deserialized_model_ignores_injected_limits() {
        let json = r#"{
            "coefficients": {"degree": 1, "cosine": [1.0, 0.5, 0.25], "sine": [0.0, 0.0, 0.1]},
            "reference_radius": 1.0,
            "engine": {"limits": {"scale": 1.0, "epsilon_floor": 0.0}}
        }"#;
        let model: SphericalHarmonicModel = serde_json::from_str(json).expect("deserialize");
        assert_eq!(model.engine.limits(), NumericLimits::for_f64());

        for point in [[0.0, 0.0, 2.0], [0.0, 0.0, -2.0], [0.0, 0.0, 0.0]] {
            let result = model.value_and_gradient(point).expect("degenerate point");
            assert!(result.is_finite(), "point {point:?} gave {result:?}");
        }
    }
}
