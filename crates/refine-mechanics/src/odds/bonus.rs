//! Bonus attempts and their four outcome categories.
//!
//! A bonus attempt first rolls a normal outcome, then one of four bonus
//! categories transforms that progress: two multiply it, two add a flat
//! amount on top.

use serde::{Deserialize, Serialize};

use super::{OddsTable, Tier};
use crate::error::RefineResult;

/// How a bonus category transforms the progress of the underlying roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProgressRule {
    /// Multiply the base progress.
    Multiply(f64),
    /// Add a flat amount to the base progress.
    Add(f64),
}

impl ProgressRule {
    /// Apply the rule to a base progress value.
    pub fn apply(self, base: f64) -> f64 {
        match self {
            Self::Multiply(factor) => base * factor,
            Self::Add(offset) => base + offset,
        }
    }
}

/// The fixed rule and probability attached to a bonus category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusRecord {
    /// Transformation applied to the base progress.
    pub rule: ProgressRule,
    /// Probability that a bonus attempt lands in this category.
    pub weight: f64,
}

/// One of the four categories a bonus attempt can resolve into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusOutcome {
    /// Five times the base progress (15%).
    FiveFold,
    /// Three times the base progress (35%).
    ThreeFold,
    /// Base progress plus 30 (15%).
    PlusThirty,
    /// Base progress plus 10 (35%).
    PlusTen,
}

impl BonusOutcome {
    /// All bonus categories.
    pub fn all() -> &'static [Self] {
        &[Self::FiveFold, Self::ThreeFold, Self::PlusThirty, Self::PlusTen]
    }

    /// The rule and weight for this category.
    pub fn record(self) -> BonusRecord {
        match self {
            Self::FiveFold => BonusRecord {
                rule: ProgressRule::Multiply(5.0),
                weight: 0.15,
            },
            Self::ThreeFold => BonusRecord {
                rule: ProgressRule::Multiply(3.0),
                weight: 0.35,
            },
            Self::PlusThirty => BonusRecord {
                rule: ProgressRule::Add(30.0),
                weight: 0.15,
            },
            Self::PlusTen => BonusRecord {
                rule: ProgressRule::Add(10.0),
                weight: 0.35,
            },
        }
    }
}

impl std::fmt::Display for BonusOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FiveFold => write!(f, "x5"),
            Self::ThreeFold => write!(f, "x3"),
            Self::PlusThirty => write!(f, "+30"),
            Self::PlusTen => write!(f, "+10"),
        }
    }
}

/// Blend the four bonus transformations of `base` by their weights.
pub(crate) fn weighted_bonus_progress(base: f64) -> f64 {
    BonusOutcome::all()
        .iter()
        .map(|outcome| {
            let record = outcome.record();
            record.rule.apply(base) * record.weight
        })
        .sum()
}

/// Expected progress of a bonus attempt for a tier and breath count.
pub fn average_bonus_progress(breath_count: usize, tier: Tier) -> RefineResult<f64> {
    OddsTable::for_tier(tier)?.average_bonus_progress(breath_count)
}
