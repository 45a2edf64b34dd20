//! ONNX Runtime classifier for scikit-learn exports.
//!
//! Expects a model converted with `skl2onnx` and `zipmap=False`:
//! one float input of shape `[batch, n_features]`, output 0 the predicted
//! class (`int64[batch]`), output 1 the class probabilities
//! (`float[batch, 2]`). Column 1 is the positive class.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use cardiorisk_core::Label;
use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use crate::classifier::Classifier;
use crate::error::ModelError;

pub struct OnnxClassifier {
    // `Session::run` needs exclusive access.
    session: Mutex<Session>,
    input_len: Option<usize>,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(onnx_err)?
            .commit_from_file(path)
            .map_err(onnx_err)?;

        if session.outputs().len() < 2 {
            return Err(ModelError::UnexpectedOutput(format!(
                "expected label and probability outputs, model has {}",
                session.outputs().len()
            )));
        }

        let input_len = session
            .inputs()
            .first()
            .and_then(|input| infer_len(input.dtype()));

        info!(input_len = ?input_len, model = %path.display(), "loaded onnx classifier");
        Ok(Self {
            session: Mutex::new(session),
            input_len,
        })
    }

    /// Run one row through the model, returning `(class, positive_probability)`.
    fn run(&self, features: &[f64]) -> Result<(i64, f64), ModelError> {
        let n = features.len();
        let data: Vec<f32> = features.iter().map(|&x| x as f32).collect();
        let tensor = Tensor::from_array(([1i64, n as i64], data.into_boxed_slice()))
            .map_err(onnx_err)?;

        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        let outputs = session.run(ort::inputs![tensor]).map_err(onnx_err)?;

        let (_, labels) = outputs[0].try_extract_tensor::<i64>().map_err(onnx_err)?;
        let class = *labels
            .first()
            .ok_or_else(|| ModelError::UnexpectedOutput("empty label output".into()))?;

        let (shape, probs) = outputs[1].try_extract_tensor::<f32>().map_err(onnx_err)?;
        let dims: &[i64] = shape;
        if dims.last() != Some(&2) || probs.len() < 2 {
            return Err(ModelError::UnexpectedOutput(format!(
                "probability output shape {dims:?}, expected [1, 2]"
            )));
        }

        Ok((class, probs[1] as f64))
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, features: &[f64]) -> Result<Label, ModelError> {
        let (class, _) = self.run(features)?;
        Ok(Label::from_class(class))
    }

    fn classify_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        let (_, p) = self.run(features)?;
        Ok(p)
    }

    fn input_len(&self) -> Option<usize> {
        self.input_len
    }
}

fn onnx_err(e: impl std::fmt::Display) -> ModelError {
    ModelError::Onnx(e.to_string())
}

/// Try to infer the feature count from the model input type.
fn infer_len(input_type: &ort::value::ValueType) -> Option<usize> {
    match input_type {
        ort::value::ValueType::Tensor { shape, .. } => {
            // Last dimension is the feature count; -1 means dynamic.
            shape
                .last()
                .and_then(|&d| if d > 0 { Some(d as usize) } else { None })
        }
        _ => None,
    }
}
