//! Scenario enumeration over every breath strategy.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::cost::{PriceTable, Recipe};
use crate::error::RefineResult;
use crate::scenario::{BreathCounts, PricedRecipe, ScenarioReport};

/// Computes expectation reports for refinement recipes.
#[derive(Debug, Clone, Default)]
pub struct RefineEngine {
    config: EngineConfig,
}

impl RefineEngine {
    /// Create an engine, rejecting an out-of-range configuration.
    pub fn new(config: EngineConfig) -> RefineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate every breath strategy, cheapest expected price first.
    ///
    /// Returns `(cardinality + 1)^2` reports. Strategies with equal expected
    /// price keep enumeration order (normal count outer, bonus count inner).
    pub fn report(
        &self,
        recipe: &Recipe,
        prices: &PriceTable,
    ) -> RefineResult<Vec<ScenarioReport>> {
        let priced = PricedRecipe::new(recipe, prices)?;

        let mut reports = priced
            .breath_counts()
            .into_iter()
            .map(|counts| -> RefineResult<ScenarioReport> {
                let report = ScenarioReport::evaluate(&priced, counts, &self.config)?;
                trace!(
                    %counts,
                    expected_try_count = report.expected_try_count,
                    expected_price = report.expected_price,
                    "evaluated scenario"
                );
                Ok(report)
            })
            .collect::<RefineResult<Vec<_>>>()?;
        reports.sort_by(|a, b| {
            a.expected_price
                .partial_cmp(&b.expected_price)
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            tier = %priced.tier(),
            scenarios = reports.len(),
            cheapest = ?reports.first().map(|r| r.expected_price),
            "computed refinement report"
        );
        Ok(reports)
    }

    /// Evaluate a single breath strategy.
    pub fn scenario(
        &self,
        recipe: &Recipe,
        prices: &PriceTable,
        counts: BreathCounts,
    ) -> RefineResult<ScenarioReport> {
        let priced = PricedRecipe::new(recipe, prices)?;
        ScenarioReport::evaluate(&priced, counts, &self.config)
    }

    /// The strategy with the lowest expected price.
    ///
    /// Every tier yields at least four scenarios, so there is always one.
    pub fn cheapest(&self, recipe: &Recipe, prices: &PriceTable) -> RefineResult<ScenarioReport> {
        let mut reports = self.report(recipe, prices)?;
        Ok(reports.swap_remove(0))
    }
}

/// Evaluate every breath strategy with the default configuration.
pub fn compute_report(recipe: &Recipe, prices: &PriceTable) -> RefineResult<Vec<ScenarioReport>> {
    RefineEngine::default().report(recipe, prices)
}
