//! Rent Price Inference
//!
//! Aligns a user-entered listing to the training layout and asks the price
//! model for an estimate.

mod engine;
mod model;

pub use engine::{Prediction, PredictionOutcome, PricePredictor};
pub use model::{LinearRentModel, RentModel};

use data_validator::ValidationError;
use feature_engine::AlignError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    #[error("Alignment failed: {0}")]
    Alignment(#[from] AlignError),
}
