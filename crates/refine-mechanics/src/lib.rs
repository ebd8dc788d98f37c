//! Expected cost and attempt calculator for advanced refinement.
//!
//! A refinement accumulates progress over repeated attempts until it reaches
//! a target. Each attempt consumes a recipe's base ingredients and, if a
//! strategy commits them, some optional breath ingredients that improve the
//! outcome odds. This crate enumerates every breath strategy for a recipe and
//! reports the expected attempts, price, and ingredient consumption of each,
//! cheapest first.

pub mod config;
pub mod cost;
pub mod engine;
pub mod error;
pub mod odds;
pub mod scenario;

pub use config::EngineConfig;
pub use cost::{BreathIngredient, PriceTable, Recipe, base_price, sorted_breath_ingredients};
pub use engine::{RefineEngine, compute_report};
pub use error::{RefineError, RefineResult};
pub use odds::{BonusOutcome, OddsTable, Tier, average_bonus_progress, average_progress};
pub use scenario::{BreathCounts, MaterialUsage, PricedRecipe, ScenarioReport};
