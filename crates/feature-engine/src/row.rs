//! Raw Feature Rows

use serde::{Deserialize, Serialize};

/// Text a missing description is stringified to before its length is taken
pub const MISSING_DESCRIPTION: &str = "None";

/// Categorical feature columns, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    Category,
    HasPhoto,
    PetsAllowed,
    #[serde(rename = "cityname")]
    CityName,
    State,
    Source,
}

impl CategoricalColumn {
    /// All categorical columns in encoding order
    pub const ALL: [CategoricalColumn; 6] = [
        CategoricalColumn::Category,
        CategoricalColumn::HasPhoto,
        CategoricalColumn::PetsAllowed,
        CategoricalColumn::CityName,
        CategoricalColumn::State,
        CategoricalColumn::Source,
    ];

    /// Column name as it appears in the dataset header
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalColumn::Category => "category",
            CategoricalColumn::HasPhoto => "has_photo",
            CategoricalColumn::PetsAllowed => "pets_allowed",
            CategoricalColumn::CityName => "cityname",
            CategoricalColumn::State => "state",
            CategoricalColumn::Source => "source",
        }
    }
}

/// Numeric feature columns, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Bathrooms,
    Bedrooms,
    SquareFeet,
    Latitude,
    Longitude,
    BodyCount,
}

impl NumericColumn {
    /// All numeric columns in encoding order
    pub const ALL: [NumericColumn; 6] = [
        NumericColumn::Bathrooms,
        NumericColumn::Bedrooms,
        NumericColumn::SquareFeet,
        NumericColumn::Latitude,
        NumericColumn::Longitude,
        NumericColumn::BodyCount,
    ];

    /// Column name as it appears in the dataset header
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericColumn::Bathrooms => "bathrooms",
            NumericColumn::Bedrooms => "bedrooms",
            NumericColumn::SquareFeet => "square_feet",
            NumericColumn::Latitude => "latitude",
            NumericColumn::Longitude => "longitude",
            NumericColumn::BodyCount => "body_count",
        }
    }
}

/// One listing's features before encoding.
///
/// Categorical values are optional; a missing value encodes exactly like the
/// dropped first category (all indicators zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeatureRow {
    pub category: Option<String>,
    pub bathrooms: f64,
    pub bedrooms: f64,
    pub has_photo: Option<String>,
    pub pets_allowed: Option<String>,
    pub square_feet: f64,
    pub cityname: Option<String>,
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub source: Option<String>,
    /// Character length of the listing description
    pub body_count: u32,
}

impl RawFeatureRow {
    /// Get a categorical value by column
    pub fn categorical(&self, column: CategoricalColumn) -> Option<&str> {
        match column {
            CategoricalColumn::Category => self.category.as_deref(),
            CategoricalColumn::HasPhoto => self.has_photo.as_deref(),
            CategoricalColumn::PetsAllowed => self.pets_allowed.as_deref(),
            CategoricalColumn::CityName => self.cityname.as_deref(),
            CategoricalColumn::State => self.state.as_deref(),
            CategoricalColumn::Source => self.source.as_deref(),
        }
    }

    /// Get a numeric value by column
    pub fn numeric(&self, column: NumericColumn) -> f64 {
        match column {
            NumericColumn::Bathrooms => self.bathrooms,
            NumericColumn::Bedrooms => self.bedrooms,
            NumericColumn::SquareFeet => self.square_feet,
            NumericColumn::Latitude => self.latitude,
            NumericColumn::Longitude => self.longitude,
            NumericColumn::BodyCount => self.body_count as f64,
        }
    }

    /// Set `body_count` from a free-text description
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.body_count = body_count(description);
        self
    }
}

/// Character length of a listing description.
///
/// Empty and missing descriptions are measured as [`MISSING_DESCRIPTION`],
/// so they count 4.
pub fn body_count(description: Option<&str>) -> u32 {
    let text = match description {
        Some(text) if !text.is_empty() => text,
        _ => MISSING_DESCRIPTION,
    };
    text.chars().count() as u32
}

/// Canonical form of a `pets_allowed` value: trimmed, deduplicated, sorted,
/// comma-joined. `"Dogs, Cats"` becomes `"Cats,Dogs"`.
pub fn canonical_pets(value: &str) -> String {
    let mut parts: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    parts.sort_unstable();
    parts.dedup();
    parts.join(",")
}
