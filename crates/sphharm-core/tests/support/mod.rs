//! Tolerance policy shared by the integration tests.
//!
//! Categories live in `tasks/numeric-tolerance-policy.json` at the workspace
//! root; each carries an absolute tolerance, a relative tolerance and the
//! floor applied to the relative denominator.

#![allow(dead_code)]

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const NUMERIC_TOLERANCE_POLICY_PATH: &str = "tasks/numeric-tolerance-policy.json";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NumericTolerance {
    #[serde(rename = "absTol")]
    pub abs_tol: f64,
    #[serde(rename = "relTol")]
    pub rel_tol: f64,
    #[serde(rename = "relativeFloor")]
    pub relative_floor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

impl NumericTolerance {
    /// Judges `actual` against a trusted `baseline`, scaling by the baseline.
    pub fn compare(&self, baseline: f64, actual: f64) -> ToleranceComparison {
        let abs_diff = (actual - baseline).abs();
        let denominator = baseline.abs().max(self.relative_floor);
        ToleranceComparison {
            abs_diff,
            rel_diff: abs_diff / denominator,
            passes: abs_diff <= self.abs_tol || abs_diff <= self.rel_tol * denominator,
        }
    }

    /// Symmetric check for two results neither of which is a reference.
    pub fn accepts(&self, lhs: f64, rhs: f64) -> bool {
        (lhs - rhs).abs() <= self.abs_tol
            || relative_difference(lhs, rhs, self.relative_floor) <= self.rel_tol
    }
}

/// `|lhs - rhs|` over the larger magnitude, never dividing by less than
/// `relative_floor`.
pub fn relative_difference(lhs: f64, rhs: f64, relative_floor: f64) -> f64 {
    (lhs - rhs).abs() / lhs.abs().max(rhs.abs()).max(relative_floor)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TolerancePolicy {
    #[serde(rename = "policyVersion")]
    pub policy_version: String,
    #[serde(default)]
    pub categories: Vec<ToleranceCategory>,
}

impl TolerancePolicy {
    pub fn tolerance_for_category(&self, category_id: &str) -> Option<NumericTolerance> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.tolerance)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToleranceCategory {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub tolerance: NumericTolerance,
}

#[derive(Debug, thiserror::Error)]
pub enum TolerancePolicyError {
    #[error("failed to read tolerance policy '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse tolerance policy '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_tolerance_policy(
    policy_path: impl AsRef<Path>,
) -> Result<TolerancePolicy, TolerancePolicyError> {
    let policy_path = policy_path.as_ref();
    let source = fs::read_to_string(policy_path).map_err(|source| TolerancePolicyError::Read {
        path: policy_path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| TolerancePolicyError::Parse {
        path: policy_path.to_path_buf(),
        source,
    })
}

/// Category from the workspace policy file; panics when it is missing.
pub fn tolerance_for(category: &str) -> NumericTolerance {
    let policy_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(NUMERIC_TOLERANCE_POLICY_PATH);
    load_tolerance_policy(&policy_path)
        .expect("tolerance policy should load")
        .tolerance_for_category(category)
        .unwrap_or_else(|| panic!("tolerance category '{category}' should exist"))
}

pub fn assert_with_tolerance(label: &str, baseline: f64, actual: f64, tolerance: NumericTolerance) {
    let comparison = tolerance.compare(baseline, actual);
    assert!(
        comparison.passes,
        "{label} baseline={baseline:.15e} actual={actual:.15e} abs_diff={:.3e} rel_diff={:.3e}",
        comparison.abs_diff,
        comparison.rel_diff
    );
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
