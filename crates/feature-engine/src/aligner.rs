//! Feature Alignment against the Training Layout

use crate::encoder::OneHotLayout;
use crate::row::{CategoricalColumn, RawFeatureRow};
use crate::AlignError;
use std::sync::Arc;
use tracing::{debug, info};

/// Feature rows of the training dataset (target column excluded).
///
/// Source of every category domain and of the encoded column order.
#[derive(Debug, Clone, Default)]
pub struct ReferenceFrame {
    rows: Vec<RawFeatureRow>,
}

impl ReferenceFrame {
    /// Create a reference frame from feature rows
    pub fn new(rows: Vec<RawFeatureRow>) -> Self {
        Self { rows }
    }

    /// Reference rows in their original order
    pub fn rows(&self) -> &[RawFeatureRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<RawFeatureRow> for ReferenceFrame {
    fn from_iter<T: IntoIterator<Item = RawFeatureRow>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A fully numeric row in the training column layout
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow {
    columns: Arc<[String]>,
    values: Vec<f64>,
}

impl EncodedRow {
    /// Create an encoded row; `values` must be as long as `columns`
    pub fn new(columns: Arc<[String]>, values: Vec<f64>) -> Result<Self, AlignError> {
        if columns.len() != values.len() {
            return Err(AlignError::WidthMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }
        Ok(Self { columns, values })
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in column order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// Iterate `(column, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Encodes single user-entered rows exactly like the reference frame was
/// encoded for training.
///
/// The layout is computed once from the reference frame. Encoding a row
/// against it gives the same result as appending the row to the reference
/// frame, encoding both jointly, reindexing to the reference-only columns and
/// keeping the last row: categories never seen in training are dropped
/// silently and the width never changes.
pub struct FeatureAligner {
    reference: Arc<ReferenceFrame>,
    layout: OneHotLayout,
}

impl FeatureAligner {
    /// Create an aligner for a reference frame
    pub fn new(reference: Arc<ReferenceFrame>) -> Result<Self, AlignError> {
        if reference.is_empty() {
            return Err(AlignError::EmptyReference);
        }

        let layout = OneHotLayout::fit(reference.rows());
        info!(
            "Feature aligner ready: {} reference rows, {} encoded columns",
            reference.len(),
            layout.width()
        );

        Ok(Self { reference, layout })
    }

    /// Canonical encoded column names
    pub fn columns(&self) -> &[String] {
        self.layout.columns()
    }

    /// Layout fitted on the reference frame
    pub fn layout(&self) -> &OneHotLayout {
        &self.layout
    }

    /// Reference frame the layout was fitted on
    pub fn reference(&self) -> &ReferenceFrame {
        &self.reference
    }

    /// Align a single-row input to the training layout.
    ///
    /// Anything other than exactly one row is rejected.
    pub fn align(&self, rows: &[RawFeatureRow]) -> Result<EncodedRow, AlignError> {
        let [row] = rows else {
            return Err(AlignError::RowCount { actual: rows.len() });
        };
        Ok(self.align_row(row))
    }

    /// Align one row
    pub fn align_row(&self, row: &RawFeatureRow) -> EncodedRow {
        let unknown = self.unknown_categories(row);
        if !unknown.is_empty() {
            debug!("Dropping categories unseen in training: {:?}", unknown);
        }

        EncodedRow {
            columns: self.layout.columns().clone(),
            values: self.layout.encode(row),
        }
    }

    /// Categorical values of a row that are outside the training domain
    pub fn unknown_categories(&self, row: &RawFeatureRow) -> Vec<(CategoricalColumn, String)> {
        self.layout
            .domains()
            .iter()
            .filter_map(|domain| {
                let value = row.categorical(domain.column())?;
                (!domain.contains(value)).then(|| (domain.column(), value.to_string()))
            })
            .collect()
    }

    /// Recover categorical values from an aligned row
    pub fn decode(&self, encoded: &EncodedRow) -> Vec<(CategoricalColumn, Option<String>)> {
        self.layout.decode(encoded.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn listing(state: &str, city: &str, source: &str) -> RawFeatureRow {
        RawFeatureRow {
            category: Some("housing/rent/apartment".to_string()),
            bathrooms: 1.0,
            bedrooms: 1.0,
            has_photo: Some("Thumbnail".to_string()),
            pets_allowed: Some("Cats,Dogs".to_string()),
            square_feet: 650.0,
            cityname: Some(city.to_string()),
            state: Some(state.to_string()),
            latitude: 29.7714,
            longitude: -95.4343,
            source: Some(source.to_string()),
            body_count: 100,
        }
    }

    fn reference() -> Arc<ReferenceFrame> {
        Arc::new(ReferenceFrame::new(vec![
            listing("TX", "Houston", "RentLingo"),
            listing("CA", "Fresno", "Listanza"),
            listing("TX", "Austin", "RentDigs.com"),
        ]))
    }

    /// Literal form of the alignment: append, encode jointly, reindex to the
    /// reference-only columns, keep the last row.
    fn concat_encode_reindex(reference: &ReferenceFrame, raw: &RawFeatureRow) -> Vec<f64> {
        let mut joined = reference.rows().to_vec();
        joined.push(raw.clone());

        let joint = OneHotLayout::fit(&joined);
        let last = joint.encode(raw);
        let canonical = OneHotLayout::fit(reference.rows());

        canonical
            .columns()
            .iter()
            .map(|column| {
                joint
                    .columns()
                    .iter()
                    .position(|c| c == column)
                    .map(|idx| last[idx])
                    .unwrap_or(0.0)
            })
            .collect()
    }

    #[test]
    fn test_encoded_row_width_checked() {
        let columns: Arc<[String]> = vec!["bedrooms".to_string(), "state_TX".to_string()].into();

        assert_eq!(
            EncodedRow::new(columns.clone(), vec![1.0]).unwrap_err(),
            AlignError::WidthMismatch { columns: 2, values: 1 }
        );

        let row = EncodedRow::new(columns, vec![2.0, 1.0]).unwrap();
        assert_eq!(row.get("state_TX"), Some(1.0));
        assert_eq!(row.get("state_CA"), None);
    }

    #[test]
    fn test_known_state_sets_indicator() {
        let aligner = FeatureAligner::new(reference()).unwrap();
        let encoded = aligner.align(&[listing("TX", "Houston", "RentLingo")]).unwrap();

        // CA is alphabetically first and dropped
        assert_eq!(encoded.get("state_TX"), Some(1.0));
        assert_eq!(encoded.get("state_CA"), None);
        assert_eq!(encoded.columns(), aligner.columns());
    }

    #[test]
    fn test_unknown_state_is_all_zero() {
        let aligner = FeatureAligner::new(reference()).unwrap();
        let encoded = aligner.align(&[listing("ZZ", "Houston", "RentLingo")]).unwrap();

        assert_eq!(encoded.len(), aligner.columns().len());
        let state_values: Vec<f64> = encoded
            .iter()
            .filter(|(c, _)| c.starts_with("state_"))
            .map(|(_, v)| v)
            .collect();
        assert!(!state_values.is_empty());
        assert!(state_values.iter().all(|v| *v == 0.0));

        let unknown = aligner.unknown_categories(&listing("ZZ", "Houston", "RentLingo"));
        assert_eq!(unknown, vec![(CategoricalColumn::State, "ZZ".to_string())]);
    }

    #[test]
    fn test_row_count_must_be_one() {
        let aligner = FeatureAligner::new(reference()).unwrap();

        assert_eq!(aligner.align(&[]), Err(AlignError::RowCount { actual: 0 }));

        let two = [listing("TX", "Houston", "RentLingo"), listing("CA", "Fresno", "Listanza")];
        assert_eq!(aligner.align(&two), Err(AlignError::RowCount { actual: 2 }));
    }

    #[test]
    fn test_empty_reference_rejected() {
        let result = FeatureAligner::new(Arc::new(ReferenceFrame::default()));
        assert!(matches!(result, Err(AlignError::EmptyReference)));
    }

    #[test]
    fn test_round_trip_in_domain() {
        let aligner = FeatureAligner::new(reference()).unwrap();
        let raw = listing("TX", "Austin", "Listanza");
        let decoded = aligner.decode(&aligner.align_row(&raw));

        for (column, value) in decoded {
            assert_eq!(value.as_deref(), raw.categorical(column), "{:?}", column);
        }
    }

    #[test]
    fn test_numeric_values_pass_through() {
        let aligner = FeatureAligner::new(reference()).unwrap();
        let mut raw = listing("CA", "Fresno", "Listanza");
        raw.square_feet = 1234.0;
        raw.body_count = 42;

        let encoded = aligner.align_row(&raw);
        assert_eq!(encoded.get("square_feet"), Some(1234.0));
        assert_eq!(encoded.get("body_count"), Some(42.0));
        assert_eq!(encoded.get("longitude"), Some(-95.4343));
    }

    #[test]
    fn test_reference_is_not_mutated() {
        let reference = reference();
        let aligner = FeatureAligner::new(reference.clone()).unwrap();
        aligner.align_row(&listing("ZZ", "Nowhere", "Unknown"));

        assert_eq!(aligner.reference().len(), 3);
        assert_eq!(aligner.reference().rows(), reference.rows());
    }

    fn arb_row() -> impl Strategy<Value = RawFeatureRow> {
        let state = proptest::option::of(prop::sample::select(vec!["AA", "CA", "NY", "TX", "ZZ"]));
        let city = proptest::option::of(prop::sample::select(vec!["Austin", "Fresno", "Houston", "Reno"]));
        let source = prop::sample::select(vec!["Listanza", "RentDigs.com", "RentLingo", "Zillow"]);
        let pets = prop::sample::select(vec!["Cats", "Cats,Dogs", "Dogs, Cats", "None"]);
        (state, city, source, pets, 0.0f64..5.0, 1.0f64..5000.0, 0u32..5000).prop_map(
            |(state, city, source, pets, bedrooms, square_feet, body_count)| RawFeatureRow {
                state: state.map(str::to_string),
                cityname: city.map(str::to_string),
                source: Some(source.to_string()),
                pets_allowed: Some(pets.to_string()),
                bedrooms,
                square_feet,
                body_count,
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn layout_is_stable_for_any_input(raw in arb_row()) {
            let aligner = FeatureAligner::new(reference()).unwrap();
            let encoded = aligner.align(std::slice::from_ref(&raw)).unwrap();
            let canonical = OneHotLayout::fit(reference().rows());

            prop_assert_eq!(encoded.columns(), &canonical.columns()[..]);
            prop_assert_eq!(encoded.values().len(), canonical.width());
        }

        #[test]
        fn matches_concat_encode_reindex(raw in arb_row()) {
            let reference = reference();
            let aligner = FeatureAligner::new(reference.clone()).unwrap();
            let encoded = aligner.align_row(&raw);
            let expected = concat_encode_reindex(&reference, &raw);

            prop_assert_eq!(encoded.values(), expected.as_slice());
        }

        #[test]
        fn alignment_is_deterministic(raw in arb_row()) {
            let aligner = FeatureAligner::new(reference()).unwrap();
            let first = aligner.align_row(&raw);
            let second = aligner.align_row(&raw);

            let first_bits: Vec<u64> = first.values().iter().map(|v| v.to_bits()).collect();
            let second_bits: Vec<u64> = second.values().iter().map(|v| v.to_bits()).collect();
            prop_assert_eq!(first_bits, second_bits);
        }
    }
}
