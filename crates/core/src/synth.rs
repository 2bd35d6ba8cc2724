use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::model::{CATEGORY_NAMES, Dataset, DatasetError, TOTAL_PERCENT};

/// Smallest share a category may get in a bounded dataset.
pub const DEFAULT_MIN_PERCENT: u32 = 5;
/// Largest share a category may get in a bounded dataset.
pub const DEFAULT_MAX_PERCENT: u32 = 49;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Why a synthesis request can never produce a valid dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationIssue {
    #[error("category count {count} is below 2")]
    TooFewCategories { count: usize },

    #[error("category count {count} exceeds the {available} available names")]
    TooManyCategories { count: usize, available: usize },

    #[error("minimum {min}% exceeds maximum {max}%")]
    InvertedBounds { min: u32, max: u32 },

    #[error("{count} categories at a {min}% floor exceed 100%")]
    FloorExceedsTotal { count: usize, min: u32 },

    #[error("{count} categories capped at {max}% cannot reach 100%")]
    CeilingBelowTotal { count: usize, max: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SynthesisError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationIssue),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// Per-category bounds applied to datasets of 3 or more categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisPolicy {
    min_percent: u32,
    max_percent: u32,
}

impl SynthesisPolicy {
    /// # Errors
    ///
    /// Returns `ConfigurationIssue::InvertedBounds` if `min_percent > max_percent`.
    pub fn new(min_percent: u32, max_percent: u32) -> Result<Self, SynthesisError> {
        if min_percent > max_percent {
            return Err(ConfigurationIssue::InvertedBounds {
                min: min_percent,
                max: max_percent,
            }
            .into());
        }
        Ok(Self {
            min_percent,
            max_percent,
        })
    }

    /// Bounds of `[5, 49]`: every slice readable, none dominant.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            min_percent: DEFAULT_MIN_PERCENT,
            max_percent: DEFAULT_MAX_PERCENT,
        }
    }

    #[must_use]
    pub fn min_percent(&self) -> u32 {
        self.min_percent
    }

    #[must_use]
    pub fn max_percent(&self) -> u32 {
        self.max_percent
    }

    /// Checks that `count` categories can be synthesized at all.
    ///
    /// Two-category datasets ignore the bounds, so only the name limit
    /// applies to them.
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError::InvalidConfiguration` describing the first
    /// violated precondition.
    pub fn check(&self, count: usize) -> Result<(), SynthesisError> {
        if count < 2 {
            return Err(ConfigurationIssue::TooFewCategories { count }.into());
        }
        if count > CATEGORY_NAMES.len() {
            return Err(ConfigurationIssue::TooManyCategories {
                count,
                available: CATEGORY_NAMES.len(),
            }
            .into());
        }
        if count == 2 {
            return Ok(());
        }

        let n = u64::try_from(count).unwrap_or(u64::MAX);
        let total = u64::from(TOTAL_PERCENT);
        if n * u64::from(self.min_percent) > total {
            return Err(ConfigurationIssue::FloorExceedsTotal {
                count,
                min: self.min_percent,
            }
            .into());
        }
        if n * u64::from(self.max_percent) < total {
            return Err(ConfigurationIssue::CeilingBelowTotal {
                count,
                max: self.max_percent,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

//
// ─── SYNTHESIZER ───────────────────────────────────────────────────────────────
//

/// Produces random datasets whose values sum to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Synthesizer {
    policy: SynthesisPolicy,
}

impl Synthesizer {
    #[must_use]
    pub fn new(policy: SynthesisPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> SynthesisPolicy {
        self.policy
    }

    /// Synthesizes a dataset of `count` categories named `A`, `B`, ...
    ///
    /// Two categories get an unclamped split with both sides at least 1.
    /// Three or more start at the policy minimum and receive the remaining
    /// points one at a time, each to a uniformly chosen category still below
    /// the policy maximum.
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError::InvalidConfiguration` if `count` categories
    /// cannot sum to 100 under the policy. Nothing is drawn in that case.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Dataset, SynthesisError> {
        self.policy.check(count)?;

        let values = if count == 2 {
            let first = rng.random_range(1..TOTAL_PERCENT);
            vec![first, TOTAL_PERCENT - first]
        } else {
            self.bounded_fill(count, rng)
        };

        Ok(Dataset::from_values(&values)?)
    }

    // Budget strictly decreases on every increment and every sweep step, so
    // this performs at most 100 additions in total.
    fn bounded_fill<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<u32> {
        let min = self.policy.min_percent;
        let max = self.policy.max_percent;
        let floor_total = u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(min);

        let mut values = vec![min; count];
        let mut budget = TOTAL_PERCENT.saturating_sub(floor_total);

        while budget > 0 {
            let open: Vec<usize> = (0..count).filter(|&i| values[i] < max).collect();
            let Some(&chosen) = open.choose(rng) else {
                break;
            };
            values[chosen] += 1;
            budget -= 1;
        }

        // Guard only: `check` rejects policies whose ceilings cannot reach 100,
        // so the budget is already spent whenever every category is saturated.
        for value in &mut values {
            if budget == 0 {
                break;
            }
            let add = (max - *value).min(budget);
            *value += add;
            budget -= add;
        }

        values
    }
}

/// Synthesizes `count` categories under the standard `[5, 49]` policy.
///
/// # Errors
///
/// See [`Synthesizer::synthesize`].
pub fn synthesize<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
) -> Result<Dataset, SynthesisError> {
    Synthesizer::default().synthesize(count, rng)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
