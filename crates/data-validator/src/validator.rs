//! Listing Feature Validator

use crate::error::ValidationError;
use feature_engine::RawFeatureRow;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Smallest accepted bathroom count (inclusive)
    pub min_bathrooms: f64,
    /// Smallest accepted bedroom count (inclusive)
    pub min_bedrooms: f64,
    /// Square feet must be strictly greater than this
    pub min_square_feet: f64,
    /// Latitude valid range (degrees)
    pub latitude_range: (f64, f64),
    /// Longitude valid range (degrees)
    pub longitude_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_bathrooms: 0.0,
            min_bedrooms: 0.0,
            min_square_feet: 0.0,
            latitude_range: (-90.0, 90.0),
            longitude_range: (-180.0, 180.0),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }

    /// First error, if any
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Validator for listing feature rows
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            Err(ValidationError::NotFinite { field })
        } else if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate a single value against a lower bound.
    ///
    /// Counts have no upper bound; only finiteness caps them.
    pub fn validate_min(
        &self,
        field: &'static str,
        value: f64,
        min: f64,
        exclusive: bool,
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            Err(ValidationError::NotFinite { field })
        } else if exclusive && value <= min {
            Err(ValidationError::NotAboveMinimum { field, value, min })
        } else if value < min {
            Err(ValidationError::BelowMinimum { field, value, min })
        } else {
            Ok(())
        }
    }

    /// Validate bathrooms
    pub fn validate_bathrooms(&self, bathrooms: f64) -> Result<(), ValidationError> {
        self.validate_min("bathrooms", bathrooms, self.config.min_bathrooms, false)
    }

    /// Validate bedrooms
    pub fn validate_bedrooms(&self, bedrooms: f64) -> Result<(), ValidationError> {
        self.validate_min("bedrooms", bedrooms, self.config.min_bedrooms, false)
    }

    /// Validate square feet
    pub fn validate_square_feet(&self, square_feet: f64) -> Result<(), ValidationError> {
        self.validate_min("square_feet", square_feet, self.config.min_square_feet, true)
    }

    /// Validate latitude
    pub fn validate_latitude(&self, latitude: f64) -> Result<(), ValidationError> {
        self.validate_range("latitude", latitude, self.config.latitude_range)
    }

    /// Validate longitude
    pub fn validate_longitude(&self, longitude: f64) -> Result<(), ValidationError> {
        self.validate_range("longitude", longitude, self.config.longitude_range)
    }

    /// Validate every checked field of a row, collecting all errors
    pub fn validate_row(&self, row: &RawFeatureRow) -> ValidationResult {
        let checks = [
            self.validate_bathrooms(row.bathrooms),
            self.validate_bedrooms(row.bedrooms),
            self.validate_square_feet(row.square_feet),
            self.validate_latitude(row.latitude),
            self.validate_longitude(row.longitude),
            match row.state.as_deref() {
                Some(state) if !state.trim().is_empty() => Ok(()),
                _ => Err(ValidationError::MissingField("state")),
            },
        ];
        let fields_checked = checks.len();

        let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            debug!("Row failed validation: {:?}", errors);
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}
