//! Price Predictor

use crate::model::RentModel;
use crate::InferenceError;
use data_validator::Validator;
use feature_engine::{format_currency, FeatureAligner, RawFeatureRow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Estimated monthly rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Estimated price, never negative
    pub price: f64,
    /// Price formatted as currency
    pub formatted: String,
    /// Time spent validating, aligning and predicting (microseconds)
    pub latency_us: u64,
}

/// Result of a prediction request as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    /// Model produced an estimate
    Success {
        prediction: Prediction,
        message: String,
    },
    /// Any failure along the way, as plain text
    Error { message: String },
}

impl PredictionOutcome {
    /// Text for display
    pub fn message(&self) -> &str {
        match self {
            PredictionOutcome::Success { message, .. } => message,
            PredictionOutcome::Error { message } => message,
        }
    }

    /// Whether an estimate was produced
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success { .. })
    }
}

/// Validates, aligns and predicts.
///
/// The aligner (with its reference frame) and the model are loaded once and
/// shared read-only.
pub struct PricePredictor {
    aligner: Arc<FeatureAligner>,
    model: Arc<dyn RentModel>,
    validator: Validator,
}

impl PricePredictor {
    /// Create a predictor from its dependencies
    pub fn new(aligner: Arc<FeatureAligner>, model: Arc<dyn RentModel>, validator: Validator) -> Self {
        match model.expected_columns() {
            Some(columns) if columns != aligner.columns() => warn!(
                "Model '{}' expects {} columns, aligner produces {}; predictions will fail",
                model.name(),
                columns.len(),
                aligner.columns().len()
            ),
            _ => info!(
                "Price predictor ready with model '{}' ({} features)",
                model.name(),
                aligner.columns().len()
            ),
        }

        Self {
            aligner,
            model,
            validator,
        }
    }

    /// Name of the loaded model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Aligner used for encoding
    pub fn aligner(&self) -> &FeatureAligner {
        &self.aligner
    }

    /// Estimate the rent of one listing
    pub fn estimate(&self, row: &RawFeatureRow) -> Result<Prediction, InferenceError> {
        let start = std::time::Instant::now();

        self.validator.validate_row(row).into_result()?;
        let encoded = self.aligner.align(std::slice::from_ref(row))?;
        let raw = self.model.predict(&encoded)?;

        let price = if raw < 0.0 {
            warn!("Model returned negative price {:.2}, clamping to 0", raw);
            0.0
        } else {
            raw
        };

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Prediction {:.2} in {}us", price, latency_us);

        Ok(Prediction {
            price,
            formatted: format_currency(price),
            latency_us,
        })
    }

    /// Estimate the rent and turn any failure into a message
    pub fn estimate_message(&self, row: &RawFeatureRow) -> PredictionOutcome {
        match self.estimate(row) {
            Ok(prediction) => PredictionOutcome::Success {
                message: format!("Estimated price: {}", prediction.formatted),
                prediction,
            },
            Err(e) => {
                warn!("Prediction failed: {}", e);
                PredictionOutcome::Error {
                    message: format!("Prediction failed: {}", e),
                }
            }
        }
    }
}
