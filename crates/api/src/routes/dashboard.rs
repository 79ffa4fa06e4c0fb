//! Dashboard Routes

use axum::{
    extract::{Query, State},
    Json,
};
use market_analysis::{DashboardView, FilterState};
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiError, AppState};

/// Query parameters for dashboard endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated state codes
    pub states: Option<String>,
    /// Comma-separated bedroom counts
    pub bedrooms: Option<String>,
}

impl DashboardQuery {
    /// Parse into a filter state
    pub fn into_filter(self) -> Result<FilterState, ApiError> {
        let states = split_list(self.states.as_deref())
            .map(str::to_string)
            .collect();

        let bedrooms = split_list(self.bedrooms.as_deref())
            .map(|b| {
                b.parse::<f64>()
                    .map_err(|_| ApiError::BadRequest(format!("invalid bedroom count '{}'", b)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FilterState { states, bedrooms })
    }
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Get dashboard statistics and chart data
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, ApiError> {
    let filter = params.into_filter()?;
    metrics::counter!("dashboard_requests_total").increment(1);

    Ok(Json(DashboardView::compute(
        state.repository.listings(),
        &filter,
        &state.analysis,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_router, test_support};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_query_parsing() {
        let query = DashboardQuery {
            states: Some("TX, CA,".to_string()),
            bedrooms: Some("1,2.5".to_string()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.states, vec!["TX", "CA"]);
        assert_eq!(filter.bedrooms, vec![1.0, 2.5]);

        assert!(DashboardQuery::default().into_filter().unwrap().states.is_empty());
    }

    #[tokio::test]
    async fn test_filtered_dashboard() {
        let response = create_router(test_support::state())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard?states=TX&bedrooms=1,2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["listing_count"], 2);
        assert_eq!(json["summary_text"]["mean"], "$1,000.00");
        assert_eq!(json["state_averages"][0]["state"], "TX");
        assert_eq!(json["scatter"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_bad_bedrooms_rejected() {
        let response = create_router(test_support::state())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard?bedrooms=two")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
