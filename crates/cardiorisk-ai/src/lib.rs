//! Inference layer: a minimal classifier capability over pre-trained artifacts.

mod classifier;
mod error;
mod logistic;
#[cfg(feature = "onnx")]
mod onnx;

pub use classifier::{Classifier, ensure_compatible, load_model, predict};
pub use error::ModelError;
pub use logistic::LogisticModel;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
