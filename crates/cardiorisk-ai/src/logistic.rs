//! Logistic-regression classifier loaded from a JSON export.
//!
//! Artifact layout (`format_version` 1):
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "features": ["age", "sex", ...],
//!   "coefficients": [...],
//!   "intercept": 0.15,
//!   "mean": [...],
//!   "scale": [...],
//!   "threshold": 0.5
//! }
//! ```
//!
//! `features`, `mean`, `scale`, and `threshold` are optional. When present,
//! `mean` and `scale` standardise each input before the linear term, matching
//! a scikit-learn `StandardScaler` + `LogisticRegression` pipeline. A row is
//! positive when its probability is strictly above `threshold`.

use std::path::Path;

use cardiorisk_core::Label;
use serde::Deserialize;

use crate::classifier::Classifier;
use crate::error::ModelError;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct Artifact {
    format_version: u32,
    #[serde(default)]
    features: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    mean: Option<Vec<f64>>,
    #[serde(default)]
    scale: Option<Vec<f64>>,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone)]
pub struct LogisticModel {
    features: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    mean: Vec<f64>,
    scale: Vec<f64>,
    threshold: f64,
}

impl LogisticModel {
    /// Model without standardisation and the default 0.5 threshold.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        Self::from_artifact(Artifact {
            format_version: FORMAT_VERSION,
            features: Vec::new(),
            coefficients,
            intercept,
            mean: None,
            scale: None,
            threshold: default_threshold(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let artifact: Artifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(a: Artifact) -> Result<Self, ModelError> {
        if a.format_version != FORMAT_VERSION {
            return Err(ModelError::IncompatibleVersion {
                found: a.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let n = a.coefficients.len();
        if n == 0 {
            return Err(ModelError::InvalidParameters("no coefficients".into()));
        }
        if !a.features.is_empty() && a.features.len() != n {
            return Err(ModelError::InvalidParameters(format!(
                "{} feature names for {n} coefficients",
                a.features.len()
            )));
        }

        let mean = a.mean.unwrap_or_else(|| vec![0.0; n]);
        let scale = a.scale.unwrap_or_else(|| vec![1.0; n]);
        if mean.len() != n || scale.len() != n {
            return Err(ModelError::InvalidParameters(format!(
                "scaler has {} means and {} scales for {n} coefficients",
                mean.len(),
                scale.len()
            )));
        }
        if let Some(i) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ModelError::InvalidParameters(format!(
                "scale[{i}] must be finite and non-zero"
            )));
        }
        if !(a.threshold > 0.0 && a.threshold < 1.0) {
            return Err(ModelError::InvalidParameters(format!(
                "threshold {} outside (0, 1)",
                a.threshold
            )));
        }

        Ok(Self {
            features: a.features,
            coefficients: a.coefficients,
            intercept: a.intercept,
            mean,
            scale,
            threshold: a.threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Linear decision value (log-odds of the positive class).
    pub fn decision(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::Input(cardiorisk_core::FeatureError::Length {
                expected: self.coefficients.len(),
                actual: features.len(),
            }));
        }

        let z = features
            .iter()
            .zip(&self.coefficients)
            .zip(self.mean.iter().zip(&self.scale))
            .map(|((x, w), (m, s))| w * (x - m) / s)
            .sum::<f64>();
        Ok(self.intercept + z)
    }
}

impl Classifier for LogisticModel {
    fn classify(&self, features: &[f64]) -> Result<Label, ModelError> {
        let p = self.classify_probability(features)?;
        Ok(if p > self.threshold {
            Label::Positive
        } else {
            Label::Negative
        })
    }

    fn classify_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        Ok(sigmoid(self.decision(features)?))
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn feature_names(&self) -> Option<&[String]> {
        (!self.features.is_empty()).then_some(self.features.as_slice())
    }
}

/// Numerically stable logistic function.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
