//! Drop-first One-Hot Layout

use crate::row::{canonical_pets, CategoricalColumn, NumericColumn, RawFeatureRow};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Normalize a categorical value before it is looked up or collected
fn category_key(column: CategoricalColumn, value: &str) -> Cow<'_, str> {
    match column {
        CategoricalColumn::PetsAllowed => Cow::Owned(canonical_pets(value)),
        _ => Cow::Borrowed(value),
    }
}

/// Categories seen for one column, split into the dropped reference category
/// and the ones that get indicator columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDomain {
    column: CategoricalColumn,
    dropped: Option<String>,
    kept: Vec<String>,
    /// Category -> position in the encoded values
    positions: HashMap<String, usize>,
}

impl CategoryDomain {
    /// Column this domain belongs to
    pub fn column(&self) -> CategoricalColumn {
        self.column
    }

    /// Alphabetically first category, encoded as all zeros
    pub fn dropped(&self) -> Option<&str> {
        self.dropped.as_deref()
    }

    /// Categories with an indicator column, sorted
    pub fn kept(&self) -> &[String] {
        &self.kept
    }

    /// Whether the category was seen when the layout was fitted
    pub fn contains(&self, value: &str) -> bool {
        let key = category_key(self.column, value);
        self.dropped.as_deref() == Some(&*key) || self.positions.contains_key(&*key)
    }

    /// Number of categories including the dropped one
    pub fn len(&self) -> usize {
        self.kept.len() + usize::from(self.dropped.is_some())
    }

    /// Whether no category was seen
    pub fn is_empty(&self) -> bool {
        self.dropped.is_none()
    }
}

/// Column layout produced by one-hot encoding a set of rows with the first
/// category of each column dropped.
///
/// Numeric columns come first in schema order, then each categorical column's
/// indicators named `{column}_{category}` in sorted category order.
#[derive(Debug, Clone)]
pub struct OneHotLayout {
    domains: Vec<CategoryDomain>,
    columns: Arc<[String]>,
}

impl OneHotLayout {
    /// Collect category domains from rows and build the column layout
    pub fn fit<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a RawFeatureRow>,
    {
        let mut seen: Vec<BTreeSet<String>> = vec![BTreeSet::new(); CategoricalColumn::ALL.len()];

        for row in rows {
            for (set, column) in seen.iter_mut().zip(CategoricalColumn::ALL) {
                if let Some(value) = row.categorical(column) {
                    let key = category_key(column, value);
                    if !set.contains(&*key) {
                        set.insert(key.into_owned());
                    }
                }
            }
        }

        let mut columns: Vec<String> = NumericColumn::ALL
            .iter()
            .map(|column| column.as_str().to_string())
            .collect();
        let mut domains = Vec::with_capacity(CategoricalColumn::ALL.len());

        for (set, column) in seen.into_iter().zip(CategoricalColumn::ALL) {
            let mut categories = set.into_iter();
            let dropped = categories.next();
            let kept: Vec<String> = categories.collect();

            let mut positions = HashMap::with_capacity(kept.len());
            for category in &kept {
                positions.insert(category.clone(), columns.len());
                columns.push(format!("{}_{}", column.as_str(), category));
            }

            domains.push(CategoryDomain {
                column,
                dropped,
                kept,
                positions,
            });
        }

        Self {
            domains,
            columns: columns.into(),
        }
    }

    /// Encoded column names in order
    pub fn columns(&self) -> &Arc<[String]> {
        &self.columns
    }

    /// Number of encoded columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Domain of a categorical column
    pub fn domain(&self, column: CategoricalColumn) -> &CategoryDomain {
        // domains are stored in CategoricalColumn::ALL order
        let idx = CategoricalColumn::ALL
            .iter()
            .position(|c| *c == column)
            .unwrap_or_default();
        &self.domains[idx]
    }

    /// All categorical domains in encoding order
    pub fn domains(&self) -> &[CategoryDomain] {
        &self.domains
    }

    /// Encode a row into this layout.
    ///
    /// Categories outside the fitted domain, the dropped category and missing
    /// values all leave the column's indicators at zero.
    pub fn encode(&self, row: &RawFeatureRow) -> Vec<f64> {
        let mut values = vec![0.0; self.width()];

        for (slot, column) in values.iter_mut().zip(NumericColumn::ALL) {
            *slot = row.numeric(column);
        }

        for domain in &self.domains {
            if let Some(value) = row.categorical(domain.column) {
                let key = category_key(domain.column, value);
                if let Some(&pos) = domain.positions.get(&*key) {
                    values[pos] = 1.0;
                }
            }
        }

        values
    }

    /// Recover categorical values from encoded values.
    ///
    /// An all-zero block decodes to the dropped first category.
    pub fn decode(&self, values: &[f64]) -> Vec<(CategoricalColumn, Option<String>)> {
        self.domains
            .iter()
            .map(|domain| {
                let hot = domain
                    .kept
                    .iter()
                    .find(|category| {
                        domain
                            .positions
                            .get(category.as_str())
                            .and_then(|&pos| values.get(pos))
                            .is_some_and(|&v| v == 1.0)
                    })
                    .cloned();
                (domain.column, hot.or_else(|| domain.dropped.clone()))
            })
            .collect()
    }
}
