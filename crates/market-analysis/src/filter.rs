//! Dashboard Filters

use listing_store::Listing;
use serde::{Deserialize, Serialize};

/// Current dashboard filter selection.
///
/// An empty selection does not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Selected states
    pub states: Vec<String>,
    /// Selected bedroom counts
    pub bedrooms: Vec<f64>,
}

impl FilterState {
    /// Whether a listing passes the filter
    pub fn matches(&self, listing: &Listing) -> bool {
        let state_ok = self.states.is_empty()
            || listing
                .state
                .as_deref()
                .is_some_and(|s| self.states.iter().any(|selected| selected == s));

        let bedrooms_ok = self.bedrooms.is_empty()
            || listing
                .bedrooms
                .is_some_and(|b| self.bedrooms.iter().any(|selected| *selected == b));

        state_ok && bedrooms_ok
    }

    /// Listings that pass the filter, in original order
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}
