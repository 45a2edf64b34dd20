//! Feature schema: the ordered list of form fields the model was trained on.
//!
//! The classifier only sees a bare vector of numbers, so the mapping from
//! named clinical measurements to vector positions is an external contract.
//! A [`FeatureSchema`] carries that contract. An empty schema means
//! "positional": values are taken in the order they were submitted.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// The 13 features of the UCI Cleveland heart-disease dataset, in training order.
pub const UCI_HEART_FEATURES: [&str; 13] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("field '{field}' is not a number: {value:?}")]
    NotNumeric { field: String, value: String },

    #[error("missing field '{0}'")]
    Missing(String),

    #[error("unexpected field '{0}'")]
    Unknown(String),

    #[error("field '{0}' submitted more than once")]
    Duplicate(String),

    #[error("expected {expected} features, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("no features submitted")]
    Empty,

    #[error("feature '{0}' is listed more than once")]
    DuplicateName(String),
}

/// Ordered numeric measurements fed to the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fail with [`FeatureError::Length`] unless the vector has `expected` entries.
    pub fn ensure_len(&self, expected: usize) -> Result<(), FeatureError> {
        if self.0.len() == expected {
            Ok(())
        } else {
            Err(FeatureError::Length {
                expected,
                actual: self.0.len(),
            })
        }
    }
}

/// Ordered field names matching the model's training order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::uci_heart()
    }
}

impl FeatureSchema {
    /// Build a named schema. Names are trimmed, blanks are dropped, and a
    /// name listed twice is an error.
    pub fn new<I, S>(names: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for name in names {
            let name: String = name.into();
            let name = name.trim().to_string();
            if name.is_empty() {
                continue;
            }
            if !seen.insert(name.clone()) {
                return Err(FeatureError::DuplicateName(name));
            }
            out.push(name);
        }
        Ok(Self { names: out })
    }

    /// Schema for models trained on the UCI Cleveland column order.
    pub fn uci_heart() -> Self {
        Self {
            names: UCI_HEART_FEATURES.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// No names: build vectors in submission order.
    pub fn positional() -> Self {
        Self { names: Vec::new() }
    }

    pub fn is_positional(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Build a feature vector from submitted `(name, value)` pairs.
    ///
    /// Positional schemas keep submission order and accept any names; a
    /// repeated name contributes only its first value. Named schemas place
    /// each value at its field's position and reject missing, unknown, or
    /// repeated fields.
    pub fn assemble(&self, fields: &[(String, String)]) -> Result<FeatureVector, FeatureError> {
        if fields.is_empty() {
            return Err(FeatureError::Empty);
        }

        if self.is_positional() {
            let mut seen = HashSet::new();
            let mut values = Vec::with_capacity(fields.len());
            for (name, value) in fields {
                if seen.insert(name.as_str()) {
                    values.push(parse_value(name, value)?);
                }
            }
            return Ok(FeatureVector(values));
        }

        let position: HashMap<&str, usize> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();

        let mut slots: Vec<Option<f64>> = vec![None; self.names.len()];
        for (name, value) in fields {
            let idx = *position
                .get(name.as_str())
                .ok_or_else(|| FeatureError::Unknown(name.clone()))?;
            if slots[idx].is_some() {
                return Err(FeatureError::Duplicate(name.clone()));
            }
            slots[idx] = Some(parse_value(name, value)?);
        }

        let values = slots
            .into_iter()
            .zip(&self.names)
            .map(|(slot, name)| slot.ok_or_else(|| FeatureError::Missing(name.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FeatureVector(values))
    }
}

fn parse_value(field: &str, value: &str) -> Result<f64, FeatureError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| FeatureError::NotNumeric {
            field: field.to_string(),
            value: value.to_string(),
        })
}
