use crate::domain::model::FeatureSizes;
use crate::domain::ports::Predictor;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::validate_finite;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of a linear model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

/// `intercept + c0*F0 + c1*F1 + c2*F2`, in hours.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    name: String,
    intercept: f64,
    coefficients: [f64; 3],
}

impl LinearModel {
    pub fn new(name: impl Into<String>, intercept: f64, coefficients: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            intercept,
            coefficients,
        }
    }

    pub fn from_parts(name: &str, intercept: f64, coefficients: &[f64]) -> Result<Self> {
        validate_finite(&format!("{}.intercept", name), intercept)?;

        let coefficients: [f64; 3] =
            coefficients
                .try_into()
                .map_err(|_| EstimatorError::ConfigValidationError {
                    field: format!("{}.coefficients", name),
                    message: format!(
                        "expected 3 coefficients (F0, F1, F2), found {}",
                        coefficients.len()
                    ),
                })?;

        for (i, c) in coefficients.iter().enumerate() {
            validate_finite(&format!("{}.coefficients[{}]", name, i), *c)?;
        }

        Ok(Self::new(name, intercept, coefficients))
    }

    pub fn from_artifact(name: &str, artifact: &LinearArtifact) -> Result<Self> {
        Self::from_parts(name, artifact.intercept, &artifact.coefficients)
    }

    pub fn from_json_str(name: &str, content: &str) -> Result<Self> {
        let artifact: LinearArtifact = serde_json::from_str(content)?;
        Self::from_artifact(name, &artifact)
    }

    pub fn from_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self> {
        tracing::debug!("Loading {} model from {}", name, path.as_ref().display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(name, &content)
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64; 3] {
        &self.coefficients
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureSizes) -> Result<f64> {
        let hours = features
            .as_array()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (f, c)| acc + (*f as f64) * c);

        if !hours.is_finite() {
            return Err(EstimatorError::PredictionError {
                model: self.name.clone(),
                message: "prediction overflowed".to_string(),
            });
        }

        Ok(hours)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
