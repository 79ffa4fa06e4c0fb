//! Market Analysis
//!
//! Pure computations behind the dashboard: a filter state goes in, summary
//! statistics and chart series come out.

mod charts;
mod filter;
mod statistics;
mod view;

pub use charts::{Histogram, HistogramBin, ScatterPoint, StateAverage};
pub use feature_engine::format_currency;
pub use filter::FilterState;
pub use statistics::{PriceSummary, SummaryText};
pub use view::{AnalysisConfig, DashboardView};
