//! Price Models

use crate::InferenceError;
use feature_engine::EncodedRow;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A trained price model.
///
/// Implementations only see rows already aligned to the training layout.
pub trait RentModel: Send + Sync {
    /// Predict the monthly rent for one encoded row
    fn predict(&self, row: &EncodedRow) -> Result<f64, InferenceError>;

    /// Model name for logs and health output
    fn name(&self) -> &str;

    /// Column layout the model was trained on, if known
    fn expected_columns(&self) -> Option<&[String]> {
        None
    }
}

/// Linear regression exported as JSON:
///
/// ```json
/// { "name": "ols-2024", "intercept": 310.5,
///   "columns": ["bathrooms", "bedrooms", "..."],
///   "coefficients": [120.0, 85.2, 0.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRentModel {
    #[serde(default = "default_name")]
    name: String,
    intercept: f64,
    columns: Vec<String>,
    coefficients: Vec<f64>,
}

fn default_name() -> String {
    "linear".to_string()
}

impl LinearRentModel {
    /// Create a model from named coefficients
    pub fn new(
        name: &str,
        intercept: f64,
        columns: Vec<String>,
        coefficients: Vec<f64>,
    ) -> Result<Self, InferenceError> {
        let model = Self {
            name: name.to_string(),
            intercept,
            columns,
            coefficients,
        };
        model.check()?;
        Ok(model)
    }

    /// Parse a model from its JSON form
    pub fn from_json_str(json: &str) -> Result<Self, InferenceError> {
        let model: Self =
            serde_json::from_str(json).map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;
        model.check()?;
        Ok(model)
    }

    /// Load a model from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        })?;
        let model = Self::from_json_str(&json)?;
        info!(
            "Loaded model '{}' with {} coefficients from {}",
            model.name,
            model.coefficients.len(),
            path.display()
        );
        Ok(model)
    }

    /// Intercept term
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    fn check(&self) -> Result<(), InferenceError> {
        if self.columns.len() != self.coefficients.len() {
            return Err(InferenceError::ModelLoadError(format!(
                "{} columns but {} coefficients",
                self.columns.len(),
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::ModelLoadError(
                "coefficients must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl RentModel for LinearRentModel {
    fn predict(&self, row: &EncodedRow) -> Result<f64, InferenceError> {
        if row.len() != self.columns.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("{} columns", self.columns.len()),
                actual: format!("{} columns", row.len()),
            });
        }

        if let Some((idx, (expected, actual))) = self
            .columns
            .iter()
            .zip(row.columns())
            .enumerate()
            .find(|(_, (expected, actual))| expected != actual)
        {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("column {} named '{}'", idx, expected),
                actual: format!("'{}'", actual),
            });
        }

        let price = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.values())
                .map(|(w, x)| w * x)
                .sum::<f64>();

        if !price.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "non-finite prediction {}",
                price
            )));
        }

        Ok(price)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn expected_columns(&self) -> Option<&[String]> {
        Some(&self.columns)
    }
}
