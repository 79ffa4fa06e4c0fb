//! Chart Series

use listing_store::Listing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One histogram bin, `[start, end)`; the last bin also includes `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width price histogram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin values into `bins` equal-width bins spanning [min, max]
    pub fn compute(values: &[f64], bins: usize) -> Self {
        if values.is_empty() || bins == 0 {
            return Self::default();
        }

        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        if max <= min {
            return Self {
                bins: vec![HistogramBin {
                    start: min,
                    end: max,
                    count: values.len(),
                }],
            };
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self {
            bins: counts
                .into_iter()
                .enumerate()
                .map(|(i, count)| HistogramBin {
                    start: min + width * i as f64,
                    end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
                    count,
                })
                .collect(),
        }
    }

    /// Total number of binned values
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Price vs size point, coloured by bedrooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub square_feet: f64,
    pub price: f64,
    pub bedrooms: Option<f64>,
}

impl ScatterPoint {
    /// Points for listings with both size and price
    pub fn collect(listings: &[&Listing]) -> Vec<Self> {
        listings
            .iter()
            .filter_map(|l| match (l.square_feet, l.price) {
                (Some(square_feet), Some(price)) if square_feet.is_finite() && price.is_finite() => {
                    Some(ScatterPoint {
                        square_feet,
                        price,
                        bedrooms: l.bedrooms,
                    })
                }
                _ => None,
            })
            .collect()
    }
}

/// Mean price of one state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAverage {
    pub state: String,
    pub mean_price: f64,
    pub listings: usize,
}

impl StateAverage {
    /// Mean price per state, sorted by state code
    pub fn collect(listings: &[&Listing]) -> Vec<Self> {
        let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for listing in listings {
            if let (Some(state), Some(price)) = (listing.state.as_deref(), listing.price) {
                if price.is_finite() {
                    let entry = totals.entry(state).or_insert((0.0, 0));
                    entry.0 += price;
                    entry.1 += 1;
                }
            }
        }

        totals
            .into_iter()
            .map(|(state, (sum, count))| StateAverage {
                state: state.to_string(),
                mean_price: sum / count as f64,
                listings: count,
            })
            .collect()
    }
}
