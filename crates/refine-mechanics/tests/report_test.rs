//! Integration tests for report computation.

use refine_mechanics::config::{BONUS_WEIGHT, FREE_RATE};
use refine_mechanics::{
    BreathCounts, PriceTable, Recipe, RefineEngine, RefineError, ScenarioReport, compute_report,
    sorted_breath_ingredients,
};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

/// Three-slot recipe as an upstream loader would hand it over.
fn forge_recipe() -> Recipe {
    serde_json::from_str(
        r#"{
            "amount": { "ore": 2 },
            "breath": { "flux": 1, "catalyst": 1, "gem": 1 }
        }"#,
    )
    .unwrap()
}

fn forge_prices() -> PriceTable {
    serde_json::from_str(r#"{ "ore": 10, "flux": 5, "catalyst": 50, "gem": 1 }"#).unwrap()
}

fn find(reports: &[ScenarioReport], normal: usize, bonus: usize) -> &ScenarioReport {
    reports
        .iter()
        .find(|r| r.breath == BreathCounts::new(normal, bonus))
        .unwrap()
}

// ---------------------------------------------------------------------------
// worked example
// ---------------------------------------------------------------------------

#[test]
fn breath_sorted_cheapest_first() {
    let sorted = sorted_breath_ingredients(&forge_recipe(), &forge_prices()).unwrap();
    let names: Vec<_> = sorted.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["gem", "flux", "catalyst"]);
}

#[test]
fn three_slot_recipe_yields_sixteen_reports() {
    let reports = compute_report(&forge_recipe(), &forge_prices()).unwrap();
    assert_eq!(reports.len(), 16);
}

#[test]
fn no_breath_scenario() {
    let reports = compute_report(&forge_recipe(), &forge_prices()).unwrap();
    let report = find(&reports, 0, 0);

    assert!(report.normal_breath_names.is_empty());
    assert!(report.bonus_breath_names.is_empty());
    assert_close(
        report.expected_price_per_try,
        20.0 * (1.0 - FREE_RATE) * (1.0 - BONUS_WEIGHT) + 20.0 * BONUS_WEIGHT,
        1e-9,
    );
    assert_close(report.expected_try_count, 58.787_585_99, 1e-6);
    assert_close(report.expected_price, 1118.212_586, 1e-5);
}

#[test]
fn full_normal_breath_selects_every_ingredient() {
    let reports = compute_report(&forge_recipe(), &forge_prices()).unwrap();
    for bonus in 0..=3 {
        let report = find(&reports, 3, bonus);
        assert_eq!(report.normal_breath_names, ["gem", "flux", "catalyst"]);
        assert_eq!(report.bonus_breath_names.len(), bonus);
    }
}

#[test]
fn cheapest_strategy_uses_one_gem_each() {
    let reports = compute_report(&forge_recipe(), &forge_prices()).unwrap();
    let best = &reports[0];
    assert_eq!(best.breath, BreathCounts::new(1, 1));
    assert_eq!(best.normal_breath_names, ["gem"]);
    assert_eq!(best.bonus_breath_names, ["gem"]);
    assert_close(best.expected_price, 1030.474_141_5, 1e-5);

    let runner_up = &reports[1];
    assert_eq!(runner_up.breath, BreathCounts::new(1, 2));

    let worst = reports.last().unwrap();
    assert_eq!(worst.breath, BreathCounts::new(3, 3));
}

#[test]
fn materials_blend_both_strategies() {
    let reports = compute_report(&forge_recipe(), &forge_prices()).unwrap();
    let report = find(&reports, 2, 1);
    let tries = report.expected_try_count;

    let names: Vec<_> = report
        .expected_materials
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, ["ore", "gem", "flux", "catalyst"]);

    let base_rate = (1.0 - BONUS_WEIGHT) * (1.0 - FREE_RATE) + BONUS_WEIGHT;
    assert_close(report.material("ore").unwrap(), 2.0 * tries * base_rate, 1e-9);
    assert_close(report.material("gem").unwrap(), tries, 1e-9);
    assert_close(
        report.material("flux").unwrap(),
        (1.0 - BONUS_WEIGHT) * tries,
        1e-9,
    );
    assert_close(report.material("catalyst").unwrap(), 0.0, 1e-12);
}

#[test]
fn report_serializes_for_presentation() {
    let reports = compute_report(&forge_recipe(), &forge_prices()).unwrap();
    let json = serde_json::to_value(&reports[0]).unwrap();
    assert_eq!(json["breath"]["normal"], 1);
    assert_eq!(json["normal_breath_names"][0], "gem");
    assert!(json["expected_materials"].is_array());

    let back: ScenarioReport = serde_json::from_value(json).unwrap();
    assert_eq!(back.breath, reports[0].breath);
    assert_eq!(back.expected_materials.len(), 4);
}

// ---------------------------------------------------------------------------
// one-slot recipes
// ---------------------------------------------------------------------------

#[test]
fn one_slot_recipe() {
    let recipe = Recipe::new()
        .with_amount("ore", 5)
        .with_amount("shard", 10)
        .with_breath("gem", 1);
    let prices = PriceTable::new()
        .with_price("ore", 8.0)
        .with_price("shard", 0.2)
        .with_price("gem", 30.0);

    let reports = compute_report(&recipe, &prices).unwrap();
    assert_eq!(reports.len(), 4);

    let all_in = find(&reports, 1, 1);
    assert_eq!(all_in.normal_breath_names, ["gem"]);
    let per_try = 19.0 * (1.0 - BONUS_WEIGHT) + 51.7 * BONUS_WEIGHT;
    assert_close(all_in.expected_try_count, 1000.0 / per_try, 1e-9);
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

#[test]
fn two_breath_slots_rejected() {
    let recipe = Recipe::new()
        .with_amount("ore", 1)
        .with_breath("flux", 1)
        .with_breath("gem", 1);
    assert_eq!(
        compute_report(&recipe, &forge_prices()).unwrap_err(),
        RefineError::InvalidRecipe { cardinality: 2 }
    );
}

#[test]
fn missing_breath_price_names_ingredient() {
    let prices = PriceTable::new()
        .with_price("ore", 10.0)
        .with_price("flux", 5.0)
        .with_price("gem", 1.0);
    let err = compute_report(&forge_recipe(), &prices).unwrap_err();
    assert_eq!(err, RefineError::MissingPrice("catalyst".into()));
    assert_eq!(err.to_string(), "no price for ingredient 'catalyst'");
}

#[test]
fn negative_price_rejected() {
    let prices = forge_prices().with_price("flux", -5.0);
    assert!(matches!(
        compute_report(&forge_recipe(), &prices),
        Err(RefineError::InvalidPrice { name, price }) if name == "flux" && price == -5.0
    ));
}

// ---------------------------------------------------------------------------
// determinism
// ---------------------------------------------------------------------------

#[test]
fn equal_prices_keep_enumeration_order() {
    let free: PriceTable = [("ore", 0.0), ("flux", 0.0), ("catalyst", -0.0), ("gem", 0.0)]
        .into_iter()
        .collect();
    let reports = compute_report(&forge_recipe(), &free).unwrap();

    let order: Vec<_> = reports
        .iter()
        .map(|r| (r.breath.normal, r.breath.bonus))
        .collect();
    let enumeration: Vec<_> = (0..=3)
        .flat_map(|normal| (0..=3).map(move |bonus| (normal, bonus)))
        .collect();
    assert_eq!(order, enumeration);
    assert!(reports.iter().all(|r| r.expected_price == 0.0));
}

#[test]
fn breath_only_recipe_keeps_enumeration_order_at_zero_cost() {
    let recipe = Recipe::new().with_breath("gem", 1);
    let free = PriceTable::new().with_price("gem", 0.0);
    let reports = compute_report(&recipe, &free).unwrap();

    let order: Vec<_> = reports.iter().map(|r| r.breath).collect();
    assert_eq!(
        order,
        [
            BreathCounts::new(0, 0),
            BreathCounts::new(0, 1),
            BreathCounts::new(1, 0),
            BreathCounts::new(1, 1),
        ]
    );
}

#[test]
fn repeated_runs_are_identical() {
    let engine = RefineEngine::default();
    let first = engine.report(&forge_recipe(), &forge_prices()).unwrap();
    let second = engine.report(&forge_recipe(), &forge_prices()).unwrap();
    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.expected_price.to_bits(), b.expected_price.to_bits());
    }
}
