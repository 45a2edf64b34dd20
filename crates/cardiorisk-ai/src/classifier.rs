//! The classifier capability and artifact loading.
//!
//! A trained model is an opaque binary contract: the server only needs a
//! predicted class and the probability of the positive class. The on-disk
//! format is chosen by file extension.

use std::path::Path;

use cardiorisk_core::{FeatureSchema, FeatureVector, Label, Prediction};
use tracing::{debug, info};

use crate::error::ModelError;
use crate::logistic::LogisticModel;

/// A pre-trained binary classifier.
pub trait Classifier: Send + Sync {
    /// Predicted class for a single feature vector.
    fn classify(&self, features: &[f64]) -> Result<Label, ModelError>;

    /// Probability of the positive class for a single feature vector.
    fn classify_probability(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Number of features the model was trained on, when the artifact records it.
    fn input_len(&self) -> Option<usize> {
        None
    }

    /// Training-order feature names, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Fail unless `schema` places fields where the model expects them.
///
/// Named schemas must list exactly the artifact's feature names in order,
/// or at least match its input length when no names are recorded.
/// Positional schemas are only checked per request.
pub fn ensure_compatible(model: &dyn Classifier, schema: &FeatureSchema) -> Result<(), ModelError> {
    if schema.is_positional() {
        return Ok(());
    }

    if let Some(names) = model.feature_names() {
        if names != schema.names() {
            return Err(ModelError::SchemaMismatch(format!(
                "model expects [{}], schema lists [{}]",
                names.join(", "),
                schema.names().join(", ")
            )));
        }
    }
    if let Some(expected) = model.input_len() {
        if expected != schema.len() {
            return Err(ModelError::SchemaMismatch(format!(
                "model takes {expected} features, schema lists {}",
                schema.len()
            )));
        }
    }
    Ok(())
}

/// Run both inference calls and bundle the outcome.
///
/// Checks the vector length against [`Classifier::input_len`] first so a
/// wrong-arity submission fails as an input error instead of deep inside
/// the model.
pub fn predict(model: &dyn Classifier, features: &FeatureVector) -> Result<Prediction, ModelError> {
    if let Some(expected) = model.input_len() {
        features.ensure_len(expected)?;
    }

    let label = model.classify(features.as_slice())?;
    let probability = model.classify_probability(features.as_slice())?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(ModelError::UnexpectedOutput(format!(
            "probability {probability} outside [0, 1]"
        )));
    }

    debug!(?label, probability, "inference complete");
    Ok(Prediction { label, probability })
}

/// Load a classifier from disk.
///
/// - `.json`: logistic-regression export ([`LogisticModel`])
/// - `.onnx`: scikit-learn ONNX export (requires the `onnx` feature)
pub fn load_model(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let model: Box<dyn Classifier> = match ext.as_deref() {
        Some("json") => Box::new(LogisticModel::load(path)?),
        #[cfg(feature = "onnx")]
        Some("onnx") => Box::new(crate::onnx::OnnxClassifier::load(path)?),
        _ => return Err(ModelError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(
        model = %path.display(),
        n_features = ?model.input_len(),
        "loaded classifier"
    );
    Ok(model)
}
