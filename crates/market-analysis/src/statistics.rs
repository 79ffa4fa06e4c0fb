//! Price Summary Statistics

use feature_engine::format_currency;
use serde::{Deserialize, Serialize};

/// Summary statistics over a set of prices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    /// Number of prices
    pub count: usize,
    /// Mean price
    pub mean: Option<f64>,
    /// Median price
    pub median: Option<f64>,
    /// Sample standard deviation (n - 1)
    pub std_dev: Option<f64>,
    /// Minimum price
    pub min: Option<f64>,
    /// Maximum price
    pub max: Option<f64>,
}

/// Display strings for the summary cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryText {
    pub mean: String,
    pub median: String,
    pub std_dev: String,
}

impl PriceSummary {
    /// Compute summary statistics; NaN prices must be filtered out by the caller
    pub fn compute(prices: &[f64]) -> Self {
        if prices.is_empty() {
            return Self::default();
        }

        let n = prices.len() as f64;
        let mean = prices.iter().sum::<f64>() / n;

        let min = prices.iter().cloned().fold(f64::MAX, f64::min);
        let max = prices.iter().cloned().fold(f64::MIN, f64::max);

        let mut sorted = prices.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        // Sample variance; undefined for a single price
        let std_dev = if prices.len() >= 2 {
            let m2: f64 = prices.iter().map(|p| (p - mean) * (p - mean)).sum();
            Some((m2 / (n - 1.0)).sqrt())
        } else {
            None
        };

        Self {
            count: prices.len(),
            mean: Some(mean),
            median: Some(median),
            std_dev,
            min: Some(min),
            max: Some(max),
        }
    }

    /// Currency strings, `N/A` where a statistic is undefined
    pub fn text(&self) -> SummaryText {
        let show = |value: Option<f64>| value.map_or_else(|| "N/A".to_string(), format_currency);
        SummaryText {
            mean: show(self.mean),
            median: show(self.median),
            std_dev: show(self.std_dev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median() {
        let stats = PriceSummary::compute(&[1000.0, 1500.0, 800.0, 2100.0]);
        assert_eq!(stats.count, 4);
        assert!((stats.mean.unwrap() - 1350.0).abs() < 1e-9);
        assert!((stats.median.unwrap() - 1250.0).abs() < 1e-9);
        assert_eq!(stats.min, Some(800.0));
        assert_eq!(stats.max, Some(2100.0));
    }

    #[test]
    fn test_sample_std_dev() {
        let stats = PriceSummary::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        // population std is 2.0, sample std is sqrt(32 / 7)
        assert!((stats.std_dev.unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_single_price_has_no_std_dev() {
        let stats = PriceSummary::compute(&[950.0]);
        assert_eq!(stats.median, Some(950.0));
        assert_eq!(stats.std_dev, None);
        assert_eq!(stats.text().std_dev, "N/A");
    }

    #[test]
    fn test_empty_prices() {
        let text = PriceSummary::compute(&[]).text();
        assert_eq!(text.mean, "N/A");
        assert_eq!(text.median, "N/A");
        assert_eq!(text.std_dev, "N/A");
    }

    #[test]
    fn test_text_formats_currency() {
        let text = PriceSummary::compute(&[1000.0, 1500.5]).text();
        assert_eq!(text.mean, "$1,250.25");
        assert_eq!(text.median, "$1,250.25");
    }
}
