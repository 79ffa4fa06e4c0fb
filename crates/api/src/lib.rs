//! Rental Dashboard API Server
//!
//! REST API over the listings dashboard and the rent price estimator.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use data_validator::Validator;
use feature_engine::FeatureAligner;
use inference_engine::{LinearRentModel, PricePredictor, RentModel};
use listing_store::ListingRepository;
use market_analysis::AnalysisConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
pub mod settings;

pub use error::ApiError;
pub use settings::{load_config, AppConfig};

/// Application state shared across handlers.
///
/// Everything here is loaded once at start-up and only read afterwards.
pub struct AppState {
    /// Dashboard listings
    pub repository: Arc<ListingRepository>,
    /// Aligner and model
    pub predictor: Arc<PricePredictor>,
    /// Dashboard settings
    pub analysis: AnalysisConfig,
    /// State preselected on the prediction form
    pub default_state: Option<String>,
    /// Prometheus handle when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state from loaded components
    pub fn new(repository: ListingRepository, predictor: PricePredictor, analysis: AnalysisConfig) -> Self {
        let default_state = repository.sorted_states().into_iter().next();
        Self {
            repository: Arc::new(repository),
            predictor: Arc::new(predictor),
            analysis,
            default_state,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Load listings, reference frame and model as configured
    pub fn load(config: &AppConfig) -> Result<Self, ApiError> {
        let delimiter = config.delimiter()?;
        let repository = ListingRepository::from_csv_path(&config.listings_path, delimiter)?;

        let reference = match &config.reference_path {
            Some(path) => ListingRepository::from_csv_path(path, delimiter)?.reference_frame(),
            None => repository.reference_frame(),
        };
        info!(
            "Reference frame from {}: {} rows",
            config.reference_source().display(),
            reference.len()
        );

        let aligner = Arc::new(FeatureAligner::new(Arc::new(reference))?);
        let model: Arc<dyn RentModel> = Arc::new(LinearRentModel::from_json_path(&config.model_path)?);
        let predictor = PricePredictor::new(aligner, model, Validator::new(config.validation.clone()));

        Ok(Self::new(repository, predictor, config.analysis.clone()))
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub listings: usize,
    pub skipped_rows: usize,
    pub model: String,
    pub encoded_columns: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/filters", get(routes::options::get_filters))
        .route("/api/v1/cities", get(routes::options::get_cities))
        .route("/api/v1/dashboard", get(routes::dashboard::get_dashboard))
        .route("/api/v1/predictions", post(routes::predictions::create_prediction))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        listings: state.repository.len(),
        skipped_rows: state.repository.skipped_rows(),
        model: state.predictor.model_name().to_string(),
        encoded_columns: state.predictor.aligner().columns().len(),
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}

/// Initialize logging
pub fn init_logging(level: &str) -> Result<(), ApiError> {
    let level = Level::from_str(level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ApiError::Logging(e.to_string()))
}

/// Run the server until it stops
pub async fn run_server(config: &AppConfig, metrics: Option<PrometheusHandle>) -> Result<(), ApiError> {
    let mut state = AppState::load(config)?;
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }
    let app = create_router(Arc::new(state));

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let app = create_router(test_support::state());
        let response = app
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["listings"], 4);
        assert_eq!(json["model"], "test");
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let app = create_router(test_support::state());
        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_default_state_is_first_sorted() {
        let state = test_support::state();
        assert_eq!(state.default_state.as_deref(), Some("CA"));
    }

    #[test]
    fn test_load_reports_missing_listings() {
        let config = AppConfig {
            listings_path: "/nonexistent/listings.csv".into(),
            ..Default::default()
        };
        assert!(matches!(AppState::load(&config), Err(ApiError::Store(_))));
    }
}
