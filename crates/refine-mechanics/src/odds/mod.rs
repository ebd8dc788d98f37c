//! Outcome probabilities for a single refinement attempt.
//!
//! Every attempt lands on one of three outcomes: a normal success, a greater
//! success or the greatest success, worth 10, 20 and 40 progress respectively.
//! How likely each outcome is depends on the recipe's tier (how many breath
//! slots it has) and on how many of those slots are filled.

pub mod bonus;

pub use bonus::{BonusOutcome, BonusRecord, ProgressRule, average_bonus_progress};

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{RefineError, RefineResult};

/// Progress awarded by each outcome, in table column order.
pub const PROGRESS_STEPS: [f64; 3] = [10.0, 20.0, 40.0];

/// Tolerance used when checking that a table row sums to one.
pub const TABLE_EPSILON: f64 = 1e-9;

/// Outcome odds for three-slot recipes: `THREE_SLOT_ODDS[breath_count]`.
///
/// Columns are normal, greater and greatest success.
const THREE_SLOT_ODDS: [[f64; 3]; 4] = [
    [0.8, 0.15, 0.05], // no breath
    [0.7, 0.2, 0.1],
    [0.6, 0.25, 0.15],
    [0.5, 0.3, 0.2], // all three slots
];

/// Outcome odds for one-slot recipes: `ONE_SLOT_ODDS[breath_count]`.
const ONE_SLOT_ODDS: [[f64; 3]; 2] = [
    [0.8, 0.15, 0.05], // no breath
    [0.5, 0.3, 0.2],
];

/// The breath cardinality of a recipe, which selects the odds table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Recipes with three breath slots.
    Three,
    /// Recipes with a single breath slot.
    One,
}

impl Tier {
    /// Determine the tier from the number of breath ingredients in a recipe.
    pub fn from_cardinality(cardinality: usize) -> RefineResult<Self> {
        match cardinality {
            3 => Ok(Self::Three),
            1 => Ok(Self::One),
            other => Err(RefineError::InvalidRecipe {
                cardinality: other,
            }),
        }
    }

    /// The largest breath count this tier allows.
    pub fn max_breath(self) -> usize {
        match self {
            Self::Three => 3,
            Self::One => 1,
        }
    }

    /// All valid breath counts for this tier, from zero to the maximum.
    pub fn breath_counts(self) -> RangeInclusive<usize> {
        0..=self.max_breath()
    }

    fn rows(self) -> &'static [[f64; 3]] {
        match self {
            Self::Three => &THREE_SLOT_ODDS,
            Self::One => &ONE_SLOT_ODDS,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier {}", self.max_breath())
    }
}

/// A validated odds table for one tier.
///
/// Construction checks that there is exactly one row per breath count and
/// that every row is a probability distribution, so lookups afterwards only
/// need a range check.
#[derive(Debug, Clone, Copy)]
pub struct OddsTable {
    tier: Tier,
    rows: &'static [[f64; 3]],
}

impl OddsTable {
    /// Load and validate the built-in table for a tier.
    pub fn for_tier(tier: Tier) -> RefineResult<Self> {
        Self::from_rows(tier, tier.rows())
    }

    fn from_rows(tier: Tier, rows: &'static [[f64; 3]]) -> RefineResult<Self> {
        let expected = tier.max_breath() + 1;
        if rows.len() != expected {
            return Err(RefineError::MalformedTable(format!(
                "{tier} needs {expected} rows, found {}",
                rows.len()
            )));
        }

        for (breath_count, row) in rows.iter().enumerate() {
            if row.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(RefineError::MalformedTable(format!(
                    "{tier} row {breath_count} has a negative or non-finite probability"
                )));
            }
            let mass: f64 = row.iter().sum();
            if (mass - 1.0).abs() > TABLE_EPSILON {
                return Err(RefineError::MalformedTable(format!(
                    "{tier} row {breath_count} sums to {mass}"
                )));
            }
        }

        Ok(Self { tier, rows })
    }

    /// The tier this table belongs to.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Outcome probabilities for a breath count.
    pub fn odds(&self, breath_count: usize) -> RefineResult<[f64; 3]> {
        self.rows
            .get(breath_count)
            .copied()
            .ok_or(RefineError::InvalidArgument {
                breath_count,
                tier: self.tier,
            })
    }

    /// Expected progress of a normal attempt with `breath_count` slots filled.
    pub fn average_progress(&self, breath_count: usize) -> RefineResult<f64> {
        let odds = self.odds(breath_count)?;
        Ok(odds
            .iter()
            .zip(PROGRESS_STEPS)
            .map(|(p, step)| p * step)
            .sum())
    }

    /// Expected progress of a bonus attempt with `breath_count` slots filled.
    pub fn average_bonus_progress(&self, breath_count: usize) -> RefineResult<f64> {
        let base = self.average_progress(breath_count)?;
        Ok(bonus::weighted_bonus_progress(base))
    }
}

/// Expected progress of a normal attempt for a tier and breath count.
pub fn average_progress(breath_count: usize, tier: Tier) -> RefineResult<f64> {
    OddsTable::for_tier(tier)?.average_progress(breath_count)
}
