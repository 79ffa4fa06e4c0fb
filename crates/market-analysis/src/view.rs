//! Dashboard View Assembly

use crate::charts::{Histogram, ScatterPoint, StateAverage};
use crate::filter::FilterState;
use crate::statistics::{PriceSummary, SummaryText};
use listing_store::Listing;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of price histogram bins
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { histogram_bins: 50 }
    }
}

/// Everything the dashboard shows for one filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Filter the view was computed for
    pub filter: FilterState,
    /// Listings passing the filter
    pub listing_count: usize,
    /// Price statistics
    pub summary: PriceSummary,
    /// Price statistics as display strings
    pub summary_text: SummaryText,
    /// Price distribution
    pub histogram: Histogram,
    /// Price vs square feet
    pub scatter: Vec<ScatterPoint>,
    /// Mean price per state
    pub state_averages: Vec<StateAverage>,
}

impl DashboardView {
    /// Compute the dashboard for a filter state
    pub fn compute(listings: &[Listing], filter: &FilterState, config: &AnalysisConfig) -> Self {
        let filtered = filter.apply(listings);
        let prices: Vec<f64> = filtered
            .iter()
            .filter_map(|l| l.price)
            .filter(|p| p.is_finite())
            .collect();

        debug!(
            "Dashboard view: {} of {} listings, {} priced",
            filtered.len(),
            listings.len(),
            prices.len()
        );

        let summary = PriceSummary::compute(&prices);
        Self {
            filter: filter.clone(),
            listing_count: filtered.len(),
            summary_text: summary.text(),
            summary,
            histogram: Histogram::compute(&prices, config.histogram_bins),
            scatter: ScatterPoint::collect(&filtered),
            state_averages: StateAverage::collect(&filtered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(state: &str, bedrooms: f64, price: f64) -> Listing {
        Listing {
            state: Some(state.to_string()),
            bedrooms: Some(bedrooms),
            price: Some(price),
            square_feet: Some(500.0 + 100.0 * bedrooms),
            ..Default::default()
        }
    }

    fn listings() -> Vec<Listing> {
        vec![
            listing("TX", 1.0, 800.0),
            listing("TX", 2.0, 1200.0),
            listing("CA", 1.0, 2000.0),
            listing("CA", 2.0, 3000.0),
        ]
    }

    #[test]
    fn test_unfiltered_view() {
        let view = DashboardView::compute(&listings(), &FilterState::default(), &AnalysisConfig::default());
        assert_eq!(view.listing_count, 4);
        assert_eq!(view.histogram.total(), 4);
        assert_eq!(view.histogram.bins.len(), 50);
        assert_eq!(view.scatter.len(), 4);
        assert_eq!(view.state_averages.len(), 2);
        assert_eq!(view.summary_text.mean, "$1,750.00");
    }

    #[test]
    fn test_filtered_view() {
        let filter = FilterState {
            states: vec!["TX".to_string()],
            bedrooms: vec![2.0],
        };
        let view = DashboardView::compute(&listings(), &filter, &AnalysisConfig::default());

        assert_eq!(view.listing_count, 1);
        assert_eq!(view.summary_text.median, "$1,200.00");
        assert_eq!(view.summary_text.std_dev, "N/A");
        assert_eq!(view.state_averages[0].state, "TX");
    }

    #[test]
    fn test_no_matches() {
        let filter = FilterState {
            states: vec!["NY".to_string()],
            bedrooms: Vec::new(),
        };
        let view = DashboardView::compute(&listings(), &filter, &AnalysisConfig::default());

        assert_eq!(view.listing_count, 0);
        assert_eq!(view.summary_text.mean, "N/A");
        assert!(view.histogram.bins.is_empty());
        assert!(view.state_averages.is_empty());
    }
}
