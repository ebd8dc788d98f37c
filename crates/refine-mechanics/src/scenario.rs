//! Expected attempts, price, and material use for one breath strategy.
//!
//! An attempt is either a normal attempt or, with probability
//! `bonus_weight`, a bonus attempt. Each kind commits its own number of
//! breath ingredients, always the cheapest ones first. A scenario fixes both
//! numbers and blends the two kinds of attempt into per-attempt averages,
//! which are then scaled by the expected number of attempts.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::cost::{BreathIngredient, PriceTable, Recipe, base_price, sorted_breath_ingredients};
use crate::error::RefineResult;
use crate::odds::{OddsTable, Tier};

/// How many breath ingredients each kind of attempt commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreathCounts {
    /// Breath ingredients committed on normal attempts.
    pub normal: usize,
    /// Breath ingredients committed on bonus attempts.
    pub bonus: usize,
}

impl BreathCounts {
    /// Create a breath count pair.
    pub fn new(normal: usize, bonus: usize) -> Self {
        Self { normal, bonus }
    }
}

impl std::fmt::Display for BreathCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "normal {} / bonus {}", self.normal, self.bonus)
    }
}

/// Expected consumption of one ingredient over a whole refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsage {
    /// Ingredient name.
    pub name: String,
    /// Expected quantity consumed.
    pub amount: f64,
}

/// A recipe with its prices resolved and breath ingredients ordered.
///
/// Building one checks the recipe's tier and every price up front, so no
/// scenario computed from it can fail on a missing price.
#[derive(Debug, Clone)]
pub struct PricedRecipe<'a> {
    recipe: &'a Recipe,
    table: OddsTable,
    base_price: f64,
    breath: Vec<BreathIngredient>,
}

impl<'a> PricedRecipe<'a> {
    /// Resolve prices for a recipe.
    pub fn new(recipe: &'a Recipe, prices: &PriceTable) -> RefineResult<Self> {
        let table = OddsTable::for_tier(recipe.tier()?)?;
        Ok(Self {
            recipe,
            table,
            base_price: base_price(recipe, prices)?,
            breath: sorted_breath_ingredients(recipe, prices)?,
        })
    }

    /// The recipe's tier.
    pub fn tier(&self) -> Tier {
        self.table.tier()
    }

    /// Cost of the base ingredients for one attempt.
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Breath ingredients, cheapest first.
    pub fn breath(&self) -> &[BreathIngredient] {
        &self.breath
    }

    /// Every breath count pair the tier allows, normal count varying slowest.
    pub fn breath_counts(&self) -> Vec<BreathCounts> {
        let tier = self.tier();
        tier.breath_counts()
            .flat_map(|normal| {
                tier.breath_counts()
                    .map(move |bonus| BreathCounts::new(normal, bonus))
            })
            .collect()
    }

    fn breath_names(&self, count: usize) -> Vec<String> {
        self.breath
            .iter()
            .take(count)
            .map(|b| b.name.clone())
            .collect()
    }
}

/// The expected outcome of refining with one breath strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// The strategy this report describes.
    pub breath: BreathCounts,
    /// Breath ingredients committed on normal attempts, cheapest first.
    pub normal_breath_names: Vec<String>,
    /// Breath ingredients committed on bonus attempts, cheapest first.
    pub bonus_breath_names: Vec<String>,
    /// Expected number of attempts to reach the target progress.
    pub expected_try_count: f64,
    /// Expected ingredient cost of a single attempt.
    pub expected_price_per_try: f64,
    /// Expected ingredient cost of the whole refinement.
    pub expected_price: f64,
    /// Expected consumption per ingredient: base ingredients in recipe order,
    /// then breath ingredients cheapest first.
    pub expected_materials: Vec<MaterialUsage>,
}

impl ScenarioReport {
    /// Evaluate one breath strategy against a priced recipe.
    pub fn evaluate(
        priced: &PricedRecipe<'_>,
        counts: BreathCounts,
        config: &EngineConfig,
    ) -> RefineResult<Self> {
        let expected_try_count = expected_try_count(&priced.table, counts, config)?;
        let expected_price_per_try =
            expected_price_per_try(priced.base_price, &priced.breath, counts, config);

        Ok(Self {
            breath: counts,
            normal_breath_names: priced.breath_names(counts.normal),
            bonus_breath_names: priced.breath_names(counts.bonus),
            expected_try_count,
            expected_price_per_try,
            expected_price: expected_try_count * expected_price_per_try,
            expected_materials: expected_materials(
                priced.recipe,
                &priced.breath,
                counts,
                expected_try_count,
                config,
            ),
        })
    }

    /// Total expected consumption of an ingredient, if the recipe uses it.
    pub fn material(&self, name: &str) -> Option<f64> {
        self.expected_materials
            .iter()
            .filter(|m| m.name == name)
            .map(|m| m.amount)
            .reduce(|a, b| a + b)
    }
}

/// Expected attempts to reach the target progress.
///
/// Only the breath counts matter here; which ingredients fill the slots
/// affects cost, not progress.
pub fn expected_try_count(
    table: &OddsTable,
    counts: BreathCounts,
    config: &EngineConfig,
) -> RefineResult<f64> {
    let normal = table.average_progress(counts.normal)?;
    let bonus = table.average_bonus_progress(counts.bonus)?;
    let per_try = normal * (1.0 - config.bonus_weight) + bonus * config.bonus_weight;
    Ok(config.target_progress / per_try)
}

/// Expected ingredient cost of a single attempt.
///
/// Normal attempts may be free of base ingredients; bonus attempts always
/// pay full price.
pub fn expected_price_per_try(
    base_price: f64,
    breath: &[BreathIngredient],
    counts: BreathCounts,
    config: &EngineConfig,
) -> f64 {
    let normal_extra: f64 = breath.iter().take(counts.normal).map(|b| b.price).sum();
    let bonus_extra: f64 = breath.iter().take(counts.bonus).map(|b| b.price).sum();

    let normal_price = base_price * (1.0 - config.free_rate) + normal_extra;
    let bonus_price = base_price + bonus_extra;

    normal_price * (1.0 - config.bonus_weight) + bonus_price * config.bonus_weight
}

/// Expected consumption of every ingredient over the whole refinement.
///
/// A breath ingredient committed by both kinds of attempt is counted under
/// both weights.
pub fn expected_materials(
    recipe: &Recipe,
    breath: &[BreathIngredient],
    counts: BreathCounts,
    expected_try_count: f64,
    config: &EngineConfig,
) -> Vec<MaterialUsage> {
    let base_rate = config.base_consumption_rate();
    let base = recipe.amount.iter().map(|(name, &quantity)| MaterialUsage {
        name: name.clone(),
        amount: f64::from(quantity) * expected_try_count * base_rate,
    });

    let optional = breath.iter().enumerate().map(|(index, ingredient)| {
        let amount = f64::from(ingredient.amount);
        let normal = if index < counts.normal { amount } else { 0.0 };
        let bonus = if index < counts.bonus { amount } else { 0.0 };
        MaterialUsage {
            name: ingredient.name.clone(),
            amount: (normal * (1.0 - config.bonus_weight) + bonus * config.bonus_weight)
                * expected_try_count,
        }
    });

    base.chain(optional).collect()
}
