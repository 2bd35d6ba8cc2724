use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Ordered alphabet category names are drawn from.
pub const CATEGORY_NAMES: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

/// Every dataset splits exactly this many percentage points.
pub const TOTAL_PERCENT: u32 = 100;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("a dataset needs at least 2 categories, got {len}")]
    TooFewCategories { len: usize },

    #[error("a dataset supports at most 10 categories, got {len}")]
    TooManyCategories { len: usize },

    #[error("category values must sum to 100, got {sum}")]
    SumMismatch { sum: u32 },

    #[error("category name cannot be empty")]
    EmptyName,

    #[error("duplicate category name: {0}")]
    DuplicateName(String),
}

//
// ─── CATEGORY VALUE ────────────────────────────────────────────────────────────
//

/// One named slice of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub name: String,
    pub value: u32,
}

impl CategoryValue {
    #[must_use]
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

//
// ─── DATASET ───────────────────────────────────────────────────────────────────
//

/// A named-category breakdown of 100 percentage points.
///
/// Category order is significant: it is the order charts draw slices in, the
/// order rank options are offered in, and the tie-break order for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CategoryValue>", into = "Vec<CategoryValue>")]
pub struct Dataset {
    categories: Vec<CategoryValue>,
}

impl Dataset {
    /// Builds a dataset from explicit categories.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError` if there are fewer than 2 or more than 10
    /// categories, a name is empty or repeated, or the values do not sum to 100.
    pub fn new(categories: Vec<CategoryValue>) -> Result<Self, DatasetError> {
        let len = categories.len();
        if len < 2 {
            return Err(DatasetError::TooFewCategories { len });
        }
        if len > CATEGORY_NAMES.len() {
            return Err(DatasetError::TooManyCategories { len });
        }

        let mut seen = HashSet::with_capacity(len);
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(DatasetError::EmptyName);
            }
            if !seen.insert(category.name.as_str()) {
                return Err(DatasetError::DuplicateName(category.name.clone()));
            }
        }

        let sum = categories
            .iter()
            .fold(0_u32, |acc, c| acc.saturating_add(c.value));
        if sum != TOTAL_PERCENT {
            return Err(DatasetError::SumMismatch { sum });
        }

        Ok(Self { categories })
    }

    /// Builds a dataset naming each value after the alphabet, in order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dataset::new`].
    pub fn from_values(values: &[u32]) -> Result<Self, DatasetError> {
        if values.len() > CATEGORY_NAMES.len() {
            return Err(DatasetError::TooManyCategories { len: values.len() });
        }
        let categories = values
            .iter()
            .zip(CATEGORY_NAMES)
            .map(|(value, name)| CategoryValue::new(name, *value))
            .collect();
        Self::new(categories)
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryValue] {
        &self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CategoryValue> {
        self.categories.get(index)
    }

    /// Category names in original order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<u32> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }

    /// Categories sorted by value, largest first.
    ///
    /// Ties keep their original order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&CategoryValue> {
        let mut sorted: Vec<&CategoryValue> = self.categories.iter().collect();
        sorted.sort_by(|a, b| b.value.cmp(&a.value));
        sorted
    }
}

impl TryFrom<Vec<CategoryValue>> for Dataset {
    type Error = DatasetError;

    fn try_from(categories: Vec<CategoryValue>) -> Result<Self, Self::Error> {
        Self::new(categories)
    }
}

impl From<Dataset> for Vec<CategoryValue> {
    fn from(dataset: Dataset) -> Self {
        dataset.categories
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
