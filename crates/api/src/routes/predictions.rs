//! Prediction Routes

use axum::{extract::State, Json};
use feature_engine::{body_count, RawFeatureRow};
use inference_engine::PredictionOutcome;
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;

/// Body count used when neither a count nor a description is sent
const DEFAULT_BODY_COUNT: u32 = 100;

/// Prediction form. Omitted fields take the form's preset values.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionForm {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_rooms")]
    pub bathrooms: f64,
    #[serde(default = "default_rooms")]
    pub bedrooms: f64,
    #[serde(default)]
    pub has_photo: Option<String>,
    #[serde(default = "default_pets")]
    pub pets_allowed: Option<String>,
    #[serde(default = "default_square_feet")]
    pub square_feet: f64,
    #[serde(default)]
    pub cityname: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_source")]
    pub source: Option<String>,
    #[serde(default)]
    pub body_count: Option<u32>,
    /// Free text; its length is used when `body_count` is absent
    #[serde(default)]
    pub description: Option<String>,
}

fn default_rooms() -> f64 {
    1.0
}

fn default_square_feet() -> f64 {
    50.0
}

fn default_pets() -> Option<String> {
    Some("Cats,Dogs".to_string())
}

fn default_source() -> Option<String> {
    Some("RentLingo".to_string())
}

fn default_latitude() -> f64 {
    29.7714
}

fn default_longitude() -> f64 {
    -95.4343
}

impl PredictionForm {
    /// Build the raw feature row, filling the state when it was left empty
    pub fn into_row(self, default_state: Option<&str>) -> RawFeatureRow {
        let body_count = match (self.body_count, self.description.as_deref()) {
            (Some(count), _) => count,
            (None, Some(description)) => body_count(Some(description)),
            (None, None) => DEFAULT_BODY_COUNT,
        };

        RawFeatureRow {
            category: self.category,
            bathrooms: self.bathrooms,
            bedrooms: self.bedrooms,
            has_photo: self.has_photo,
            pets_allowed: self.pets_allowed,
            square_feet: self.square_feet,
            cityname: self.cityname,
            state: self.state.or_else(|| default_state.map(str::to_string)),
            latitude: self.latitude,
            longitude: self.longitude,
            source: self.source,
            body_count,
        }
    }
}

/// Estimate the rent of a listing.
///
/// Model and input failures come back as an error outcome with a message,
/// not as an HTTP error.
pub async fn create_prediction(
    State(state): State<Arc<AppState>>,
    Json(form): Json<PredictionForm>,
) -> Json<PredictionOutcome> {
    let row = form.into_row(state.default_state.as_deref());
    let outcome = state.predictor.estimate_message(&row);

    metrics::counter!("predictions_total").increment(1);
    if !outcome.is_success() {
        metrics::counter!("prediction_failures_total").increment(1);
    }

    Json(outcome)
}
