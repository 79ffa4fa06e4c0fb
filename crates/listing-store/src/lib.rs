//! Listing Store
//!
//! Loads the apartment listings CSV once and answers read-only queries over it.

mod repository;

pub use repository::{Listing, ListingRepository};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("No listings could be read")]
    Empty,
}
