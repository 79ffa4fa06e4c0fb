//! Repository Implementation

use crate::StoreError;
use csv::{ByteRecord, ReaderBuilder, StringRecord};
use feature_engine::{body_count, RawFeatureRow, ReferenceFrame};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// One row of the listings CSV.
///
/// Columns not named here are ignored. Empty cells read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub has_photo: Option<String>,
    #[serde(default)]
    pub pets_allowed: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub square_feet: Option<f64>,
    #[serde(default)]
    pub cityname: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub body_count: Option<u32>,
}

impl Listing {
    /// Feature columns of this listing (price excluded).
    ///
    /// Missing numbers become NaN; `body_count` falls back to the length of
    /// `body` when the column is absent.
    pub fn features(&self) -> RawFeatureRow {
        RawFeatureRow {
            category: self.category.clone(),
            bathrooms: self.bathrooms.unwrap_or(f64::NAN),
            bedrooms: self.bedrooms.unwrap_or(f64::NAN),
            has_photo: self.has_photo.clone(),
            pets_allowed: self.pets_allowed.clone(),
            square_feet: self.square_feet.unwrap_or(f64::NAN),
            cityname: self.cityname.clone(),
            state: self.state.clone(),
            latitude: self.latitude.unwrap_or(f64::NAN),
            longitude: self.longitude.unwrap_or(f64::NAN),
            source: self.source.clone(),
            body_count: self
                .body_count
                .unwrap_or_else(|| body_count(self.body.as_deref())),
        }
    }
}

/// Read-only repository over the loaded listings
#[derive(Debug, Clone, Default)]
pub struct ListingRepository {
    listings: Vec<Listing>,
    /// Rows that could not be deserialized
    skipped: usize,
}

impl ListingRepository {
    /// Create a repository from already loaded listings
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            skipped: 0,
        }
    }

    /// Load listings from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self, StoreError> {
        let path = path.as_ref();
        info!("Loading listings from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), delimiter)
    }

    /// Load listings from any CSV source with a header row.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, NA markers such as
    /// `None` or `NA` read as missing, and rows that fail to deserialize are
    /// skipped.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, StoreError> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = lossy_record(csv_reader.byte_headers()?);
        let mut listings = Vec::new();
        let mut skipped = 0;
        let mut record = ByteRecord::new();

        while csv_reader.read_byte_record(&mut record)? {
            match data_record(&record).deserialize::<Listing>(Some(&headers)) {
                Ok(listing) => listings.push(listing),
                Err(e) => {
                    skipped += 1;
                    debug!("Skipping listing row: {}", e);
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} unreadable listing rows", skipped);
        }
        if listings.is_empty() {
            return Err(StoreError::Empty);
        }

        info!("Loaded {} listings", listings.len());
        Ok(Self { listings, skipped })
    }

    /// All listings in file order
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Number of listings
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the repository has no listings
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Number of rows skipped while loading
    pub fn skipped_rows(&self) -> usize {
        self.skipped
    }

    /// Distinct states in order of first appearance
    pub fn state_options(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.listings
            .iter()
            .filter_map(|l| l.state.as_deref())
            .filter(|state| seen.insert(*state))
            .map(str::to_string)
            .collect()
    }

    /// Distinct states, sorted
    pub fn sorted_states(&self) -> Vec<String> {
        self.listings
            .iter()
            .filter_map(|l| l.state.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct bedroom counts, sorted
    pub fn bedroom_options(&self) -> Vec<f64> {
        let mut bedrooms: Vec<f64> = self
            .listings
            .iter()
            .filter_map(|l| l.bedrooms)
            .filter(|b| b.is_finite())
            .collect();
        bedrooms.sort_by(f64::total_cmp);
        bedrooms.dedup();
        bedrooms
    }

    /// Distinct cities of a state, sorted
    pub fn cities_for_state(&self, state: &str) -> Vec<String> {
        self.listings
            .iter()
            .filter(|l| l.state.as_deref() == Some(state))
            .filter_map(|l| l.cityname.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Feature rows of every listing, for fitting the encoded layout
    pub fn reference_frame(&self) -> ReferenceFrame {
        self.listings.iter().map(Listing::features).collect()
    }
}

/// Cell values read as missing, matching the usual dataframe NA markers
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na_token(value: &str) -> bool {
    NA_TOKENS.contains(&value)
}

fn lossy_record(record: &ByteRecord) -> StringRecord {
    let fields: Vec<String> = record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();
    StringRecord::from(fields)
}

/// Data row with NA markers blanked, so they deserialize as `None`
fn data_record(record: &ByteRecord) -> StringRecord {
    let record = lossy_record(record);
    record
        .iter()
        .map(|field| if is_na_token(field) { "" } else { field })
        .collect()
}
