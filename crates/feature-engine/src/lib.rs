//! Feature Engineering Engine
//!
//! Turns a single rental listing entered by a user into the numeric row layout
//! the price model was trained on.

mod aligner;
mod currency;
mod encoder;
mod row;

pub use aligner::{EncodedRow, FeatureAligner, ReferenceFrame};
pub use currency::format_currency;
pub use encoder::{CategoryDomain, OneHotLayout};
pub use row::{
    body_count, canonical_pets, CategoricalColumn, NumericColumn, RawFeatureRow,
    MISSING_DESCRIPTION,
};

use thiserror::Error;

/// Errors during feature alignment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    #[error("Expected exactly one input row, got {actual}")]
    RowCount { actual: usize },
    #[error("Reference frame has no rows")]
    EmptyReference,
    #[error("Encoded row has {columns} columns but {values} values")]
    WidthMismatch { columns: usize, values: usize },
}
