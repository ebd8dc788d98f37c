//! Recipes, price tables, and per-attempt ingredient cost.
//!
//! A recipe consumes its base ingredients on every attempt. Breath
//! ingredients are optional and only consumed when a strategy commits them.
//! Breath ingredients are always committed cheapest first, so the cost model
//! hands out a price-sorted list that every strategy takes a prefix of.

use std::cmp::Ordering;
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{RefineError, RefineResult};
use crate::odds::Tier;

/// Ingredients consumed by one refinement attempt.
///
/// Both maps keep insertion order; breath ingredients with equal prices stay
/// in the order they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Ingredients consumed on every attempt, by name.
    #[serde(default)]
    pub amount: IndexMap<String, u32>,
    /// Optional breath ingredients, by name.
    #[serde(default)]
    pub breath: IndexMap<String, u32>,
}

impl Recipe {
    /// Create an empty recipe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a base ingredient consumed on every attempt.
    pub fn with_amount(mut self, name: impl Into<String>, quantity: u32) -> Self {
        self.amount.insert(name.into(), quantity);
        self
    }

    /// Add an optional breath ingredient.
    pub fn with_breath(mut self, name: impl Into<String>, quantity: u32) -> Self {
        self.breath.insert(name.into(), quantity);
        self
    }

    /// The tier implied by the number of breath ingredients.
    pub fn tier(&self) -> RefineResult<Tier> {
        Tier::from_cardinality(self.breath.len())
    }
}

/// Unit prices by ingredient name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    /// Create an empty price table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a unit price, builder style.
    pub fn with_price(mut self, name: impl Into<String>, price: f64) -> Self {
        self.insert(name, price);
        self
    }

    /// Add or replace a unit price.
    pub fn insert(&mut self, name: impl Into<String>, price: f64) {
        self.prices.insert(name.into(), price);
    }

    /// Look up a unit price, rejecting missing, negative, or non-finite ones.
    ///
    /// A price of `-0.0` is returned as `0.0`.
    pub fn unit_price(&self, name: &str) -> RefineResult<f64> {
        let price = *self
            .prices
            .get(name)
            .ok_or_else(|| RefineError::MissingPrice(name.to_string()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(RefineError::InvalidPrice {
                name: name.to_string(),
                price,
            });
        }
        Ok(if price == 0.0 { 0.0 } else { price })
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            prices: iter
                .into_iter()
                .map(|(name, price)| (name.into(), price))
                .collect(),
        }
    }
}

/// A breath ingredient with its per-attempt cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathIngredient {
    /// Ingredient name.
    pub name: String,
    /// Quantity consumed when committed.
    pub amount: u32,
    /// `amount` times the unit price.
    pub price: f64,
}

/// Cost of the base ingredients for one attempt.
pub fn base_price(recipe: &Recipe, prices: &PriceTable) -> RefineResult<f64> {
    recipe
        .amount
        .iter()
        .map(|(name, &quantity)| -> RefineResult<f64> {
            Ok(prices.unit_price(name)? * f64::from(quantity))
        })
        .sum()
}

/// Breath ingredients ordered by ascending per-attempt price.
///
/// The sort is stable, so equal prices keep recipe order.
pub fn sorted_breath_ingredients(
    recipe: &Recipe,
    prices: &PriceTable,
) -> RefineResult<Vec<BreathIngredient>> {
    let mut ingredients = recipe
        .breath
        .iter()
        .map(|(name, &amount)| -> RefineResult<BreathIngredient> {
            Ok(BreathIngredient {
                name: name.clone(),
                amount,
                price: prices.unit_price(name)? * f64::from(amount),
            })
        })
        .collect::<RefineResult<Vec<_>>>()?;
    ingredients.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
    Ok(ingredients)
}
