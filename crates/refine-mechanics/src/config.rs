//! Tunable constants for the expectation engine.

use serde::{Deserialize, Serialize};

use crate::error::{RefineError, RefineResult};

/// Chance that a normal attempt costs no ingredients (a 35% proc on one
/// attempt in six).
pub const FREE_RATE: f64 = (1.0 / 6.0) * 0.35;

/// Chance that an attempt resolves as a bonus attempt.
pub const BONUS_WEIGHT: f64 = 0.16106;

/// Progress needed to complete a refinement.
pub const TARGET_PROGRESS: f64 = 1000.0;

/// Configuration for the expectation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chance that a normal attempt consumes no base ingredients.
    pub free_rate: f64,
    /// Chance that an attempt is a bonus attempt.
    pub bonus_weight: f64,
    /// Progress needed to finish.
    pub target_progress: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            free_rate: FREE_RATE,
            bonus_weight: BONUS_WEIGHT,
            target_progress: TARGET_PROGRESS,
        }
    }
}

impl EngineConfig {
    /// Set the free-attempt rate.
    pub fn with_free_rate(mut self, free_rate: f64) -> Self {
        self.free_rate = free_rate;
        self
    }

    /// Set the bonus-attempt weight.
    pub fn with_bonus_weight(mut self, bonus_weight: f64) -> Self {
        self.bonus_weight = bonus_weight;
        self
    }

    /// Set the target progress.
    pub fn with_target_progress(mut self, target_progress: f64) -> Self {
        self.target_progress = target_progress;
        self
    }

    /// Check that both rates are probabilities and the target is positive.
    pub fn validate(&self) -> RefineResult<()> {
        check_probability("free_rate", self.free_rate)?;
        check_probability("bonus_weight", self.bonus_weight)?;
        if !self.target_progress.is_finite() || self.target_progress <= 0.0 {
            return Err(RefineError::InvalidConfig(format!(
                "target_progress must be positive, got {}",
                self.target_progress
            )));
        }
        Ok(())
    }

    /// Share of base ingredients an average attempt consumes.
    pub(crate) fn base_consumption_rate(&self) -> f64 {
        (1.0 - self.bonus_weight) * (1.0 - self.free_rate) + self.bonus_weight
    }
}

fn check_probability(field: &str, value: f64) -> RefineResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RefineError::InvalidConfig(format!(
            "{field} must be within 0..=1, got {value}"
        )))
    }
}
