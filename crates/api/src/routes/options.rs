//! Filter Option Routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Options for the dashboard filters and the prediction form
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    /// States in dataset order
    pub states: Vec<String>,
    /// Bedroom counts, sorted
    pub bedrooms: Vec<f64>,
    /// States for the prediction form, sorted
    pub prediction_states: Vec<String>,
    /// Preselected prediction state
    pub default_state: Option<String>,
}

/// Get filter options
pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FiltersResponse> {
    Json(FiltersResponse {
        states: state.repository.state_options(),
        bedrooms: state.repository.bedroom_options(),
        prediction_states: state.repository.sorted_states(),
        default_state: state.default_state.clone(),
    })
}

/// Query parameters for cities endpoint
#[derive(Debug, Deserialize)]
pub struct CitiesQuery {
    /// State code; the default prediction state when absent
    pub state: Option<String>,
}

/// Response for cities endpoint
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub state: Option<String>,
    pub cities: Vec<String>,
}

/// Get the cities of a state
pub async fn get_cities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CitiesQuery>,
) -> Json<CitiesResponse> {
    let selected = params.state.or_else(|| state.default_state.clone());
    let cities = selected
        .as_deref()
        .map(|s| state.repository.cities_for_state(s))
        .unwrap_or_default();

    Json(CitiesResponse {
        state: selected,
        cities,
    })
}
