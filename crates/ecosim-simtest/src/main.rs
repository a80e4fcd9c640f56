//! EcoSim Headless Validation Harness
//!
//! Re-checks the calculation engine against worked examples and drives a
//! scripted classroom session through the engine.
//! Runs entirely in-process: no storage, no networking, no UI.
//!
//! Usage:
//!   cargo run -p ecosim-simtest
//!   cargo run -p ecosim-simtest -- --verbose
//!
//! Engine logs go to stderr; `RUST_LOG` overrides the default filter.

use std::collections::BTreeMap;

use ecosim_core::prelude::*;
use ecosim_logic::catalog::{seed_products, seed_suppliers, seed_templates};
use ecosim_logic::experience::{level_from_xp, level_threshold, progress_to_next_level, BADGES};
use ecosim_logic::grading::{CalculationInput, CalculationKind, CalculationMode, Submission};
use ecosim_logic::money::format_currency;
use ecosim_logic::pin::is_lobby_pin;
use ecosim_logic::scenarios::{DisturbanceKind, MarketEventKind, OrderSide};
use ecosim_logic::trade_pricing::{
    compute_trade_price_forward, compute_trade_price_reverse, TradePricingForwardInput,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

// ── Worked examples (same fixture the docs quote) ───────────────────────
const WORKED_EXAMPLES_JSON: &str = include_str!("../../../data/worked_examples.json");

/// Fixture values are exact textbook results.
const EXAMPLE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Deserialize)]
struct WorkedExample {
    name: String,
    input: CalculationInput,
    expected: BTreeMap<String, f64>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let default_filter = if verbose { "ecosim_core=debug,warn" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
    println!("=== EcoSim Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Worked examples from JSON
    results.extend(validate_worked_examples(verbose));

    // 2. Forward/reverse trade pricing sweep
    results.extend(validate_trade_round_trip(verbose));

    // 3. XP curve
    results.extend(validate_level_curve(verbose));

    // 4. Seed catalogs
    results.extend(validate_seed_catalogs(verbose));

    // 5. Scripted classroom session
    results.extend(validate_classroom_session(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Worked Examples ──────────────────────────────────────────────────

fn validate_worked_examples(verbose: bool) -> Vec<TestResult> {
    println!("--- Worked Examples ---");
    let mut results = Vec::new();

    let examples: Vec<WorkedExample> = match serde_json::from_str(WORKED_EXAMPLES_JSON) {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "examples_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    // Every scheme must be covered
    let missing: Vec<CalculationKind> = CalculationKind::ALL
        .iter()
        .copied()
        .filter(|k| !examples.iter().any(|e| e.input.kind() == *k))
        .collect();
    results.push(TestResult {
        name: "examples_cover_all_kinds".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            format!("{} examples over {} kinds", examples.len(), CalculationKind::ALL.len())
        } else {
            format!("no example for {:?}", missing)
        },
    });

    for example in &examples {
        let steps = example.input.evaluate();
        let mut mismatches = Vec::new();
        for (step, expected) in &example.expected {
            match steps.iter().find(|(n, _)| *n == step.as_str()) {
                Some((_, actual)) if (actual - expected).abs() < EXAMPLE_TOLERANCE => {}
                Some((_, actual)) => {
                    mismatches.push(format!("{} = {:.6}, expected {:.6}", step, actual, expected))
                }
                None => mismatches.push(format!("{} not produced", step)),
            }
        }
        if verbose {
            let kind = example.input.kind();
            let result = steps
                .iter()
                .find(|(n, _)| *n == kind.result_step())
                .map_or(f64::NAN, |(_, v)| *v);
            println!("  {} → {} = {}", example.name, kind.result_step(), result);
        }
        results.push(TestResult {
            name: format!("example_{}", example.name),
            passed: mismatches.is_empty(),
            detail: if mismatches.is_empty() {
                format!("{} steps match", example.expected.len())
            } else {
                mismatches.join("; ")
            },
        });
    }

    results
}

// ── 2. Trade Pricing Round Trip ─────────────────────────────────────────

fn validate_trade_round_trip(verbose: bool) -> Vec<TestResult> {
    println!("--- Trade Pricing Round Trip ---");
    let mut rng = StdRng::seed_from_u64(0xEC05);
    let mut worst = 0.0f64;
    let mut worst_input = None;

    for _ in 0..10_000 {
        let input = TradePricingForwardInput {
            landed_cost: rng.gen_range(1.0..10_000.0),
            handling_cost_markup_percent: rng.gen_range(0.0..100.0),
            profit_markup_percent: rng.gen_range(0.0..100.0),
            customer_cash_discount_percent: Some(rng.gen_range(0.0..10.0)),
            customer_discount_percent: Some(rng.gen_range(0.0..50.0)),
            agent_commission_percent: if rng.gen_bool(0.5) {
                Some(rng.gen_range(0.0..15.0))
            } else {
                None
            },
            vat_percent: 19.0,
        };
        let gross = compute_trade_price_forward(&input).gross_sales_price;
        let back = compute_trade_price_reverse(&input.reverse_from(gross)).landed_cost;
        let drift = (back - input.landed_cost).abs();
        if drift > worst {
            worst = drift;
            worst_input = Some(input);
        }
    }

    if verbose {
        println!("  worst drift {:.2e}", worst);
    }

    vec![TestResult {
        name: "trade_round_trip".into(),
        passed: worst < 0.01,
        detail: match worst_input {
            Some(input) if worst >= 0.01 => format!("drift {:.4} for {:?}", worst, input),
            _ => format!("10000 samples, worst drift {:.2e}", worst),
        },
    }]
}

// ── 3. Level Curve ──────────────────────────────────────────────────────

fn validate_level_curve(verbose: bool) -> Vec<TestResult> {
    println!("--- Level Curve ---");
    let mut results = Vec::new();

    let increasing = (1..80).all(|n| level_threshold(n + 1) > level_threshold(n));
    results.push(TestResult {
        name: "threshold_increasing".into(),
        passed: increasing,
        detail: format!(
            "levels 1–80, level 10 needs {} XP",
            level_threshold(10)
        ),
    });

    let mut last = 1;
    let mut monotonic = true;
    for xp in (0..2_000_000u64).step_by(37) {
        let level = level_from_xp(xp);
        monotonic &= level >= last;
        last = level;
    }
    results.push(TestResult {
        name: "level_non_decreasing".into(),
        passed: monotonic,
        detail: format!("2M XP reaches level {}", last),
    });

    let examples = [(0, 1), (99, 1), (100, 2), (249, 2), (250, 3)];
    let wrong: Vec<_> = examples
        .iter()
        .filter(|(xp, level)| level_from_xp(*xp) != *level)
        .collect();
    results.push(TestResult {
        name: "level_examples".into(),
        passed: wrong.is_empty(),
        detail: format!("{} of {} match", examples.len() - wrong.len(), examples.len()),
    });

    if verbose {
        for xp in [0u64, 150, 1000, 10_000] {
            let p = progress_to_next_level(xp);
            println!(
                "  {} XP → level {} ({}/{} XP, {}%)",
                xp, p.current_level, p.current_xp, p.required_xp, p.percentage
            );
        }
    }

    results
}

// ── 4. Seed Catalogs ────────────────────────────────────────────────────

fn validate_seed_catalogs(verbose: bool) -> Vec<TestResult> {
    println!("--- Seed Catalogs ---");
    let mut results = Vec::new();

    let templates = seed_templates();
    let products = seed_products();
    let suppliers = seed_suppliers();

    results.push(TestResult {
        name: "catalog_sizes".into(),
        passed: templates.len() == 3 && products.len() == 15 && suppliers.len() == 4,
        detail: format!(
            "{} templates, {} products, {} suppliers",
            templates.len(),
            products.len(),
            suppliers.len()
        ),
    });

    let dangling: Vec<String> = suppliers
        .iter()
        .flat_map(|s| {
            s.product_catalog
                .iter()
                .filter(|id| !products.iter().any(|p| &p.id == *id))
                .map(move |id| format!("{}→{}", s.id, id))
        })
        .collect();
    results.push(TestResult {
        name: "supplier_catalog_links".into(),
        passed: dangling.is_empty(),
        detail: if dangling.is_empty() {
            "all supplier products exist".into()
        } else {
            format!("dangling: {}", dangling.join(", "))
        },
    });

    let unpriced: Vec<_> = products
        .iter()
        .filter(|p| p.base_price <= 0.0 || p.recommended_retail_price <= p.base_price)
        .map(|p| p.id.as_str())
        .collect();
    results.push(TestResult {
        name: "product_prices".into(),
        passed: unpriced.is_empty(),
        detail: if unpriced.is_empty() {
            "retail above wholesale for every product".into()
        } else {
            format!("bad prices: {}", unpriced.join(", "))
        },
    });

    let duplicate_badges = BADGES
        .iter()
        .enumerate()
        .any(|(i, a)| BADGES[i + 1..].iter().any(|b| b.id == a.id));
    results.push(TestResult {
        name: "badge_ids_unique".into(),
        passed: !duplicate_badges,
        detail: format!("{} badges", BADGES.len()),
    });

    if verbose {
        for p in &products {
            println!(
                "  {:<18} {:<28} {:>12} → {:>12}",
                p.id,
                p.name,
                format_currency(p.base_price),
                format_currency(p.recommended_retail_price)
            );
        }
    }

    results
}

// ── 5. Classroom Session ────────────────────────────────────────────────

fn validate_classroom_session(verbose: bool) -> Vec<TestResult> {
    println!("--- Classroom Session ---");
    match run_classroom_session(verbose) {
        Ok(results) => results,
        Err(e) => vec![TestResult {
            name: "classroom_session".into(),
            passed: false,
            detail: format!("engine error: {}", e),
        }],
    }
}

fn run_classroom_session(verbose: bool) -> EngineResult<Vec<TestResult>> {
    let mut results = Vec::new();
    let mut engine = EcoSimEngine::with_seed(11);

    let lobby_id = engine.create_lobby("teacher_demo", "BM 11a", LobbyConfig::default())?;
    let pin = engine.lobby(&lobby_id)?.pin.clone();
    results.push(TestResult {
        name: "lobby_pin_format".into(),
        passed: is_lobby_pin(&pin),
        detail: format!("pin {}", pin),
    });

    let company = engine.create_company(&lobby_id, "Sport Müller", LegalForm::GmbH)?;
    let names = ["Mia", "Ben", "Lea"];
    let mut sessions = Vec::new();
    for name in names {
        let session = engine.join_lobby(&pin, name)?;
        engine.assign_to_company(&lobby_id, &session, &company)?;
        sessions.push(session);
    }

    let examples: Vec<WorkedExample> =
        serde_json::from_str(WORKED_EXAMPLES_JSON).map_err(EngineError::Config)?;
    let mut correct = 0;
    for (i, example) in examples.iter().enumerate() {
        let session = &sessions[i % sessions.len()];
        let kind = example.input.kind();
        let mut answer = Submission::new();
        if let Some((_, value)) = example
            .input
            .evaluate()
            .into_iter()
            .find(|(n, _)| *n == kind.result_step())
        {
            answer.insert(kind.result_step().to_string(), value);
        }
        let outcome = engine.submit_calculation(
            &lobby_id,
            session,
            &example.input,
            &answer,
            CalculationMode::Production,
        )?;
        if outcome.record.is_correct {
            correct += 1;
        }
        if verbose && outcome.progress.leveled_up() {
            println!("  {} reached level {}", session, outcome.progress.level_after);
        }
    }
    results.push(TestResult {
        name: "session_submissions".into(),
        passed: correct == examples.len(),
        detail: format!("{}/{} graded correct", correct, examples.len()),
    });

    let disturbance = engine.trigger_disturbance(
        &lobby_id,
        DisturbanceKind::CustomerPaymentDelay,
        "so_1",
        OrderSide::Sales,
    )?;
    let update = engine.resolve_disturbance(
        &lobby_id,
        &disturbance,
        &sessions[0],
        "Mahnung mit Mahngebühren erstellt",
        true,
    )?;
    results.push(TestResult {
        name: "disturbance_resolved".into(),
        passed: update.xp_awarded > 0,
        detail: format!("{} XP for the dunning letter", update.xp_awarded),
    });

    let event = engine.trigger_market_event(&lobby_id, MarketEventKind::PriceIncrease, None, None)?;
    let raised = engine.price_order(&lobby_id, "supp_001", "prod_ball_001", 10)?;
    engine.end_market_event(&lobby_id, &event)?;
    let normal = engine.price_order(&lobby_id, "supp_001", "prod_ball_001", 10)?;
    results.push(TestResult {
        name: "market_event_price_effect".into(),
        passed: raised.landed_cost > normal.landed_cost,
        detail: format!(
            "{} during event, {} after",
            format_currency(raised.landed_cost),
            format_currency(normal.landed_cost)
        ),
    });

    let dashboard = engine.dashboard(&lobby_id)?;
    let company_xp = dashboard.companies.first().map_or(0, |c| c.experience);
    let session_xp: u64 = dashboard.top_performers.iter().map(|p| p.experience).sum();
    results.push(TestResult {
        name: "dashboard_xp_consistent".into(),
        passed: company_xp == session_xp && company_xp > 0,
        detail: format!("company {} XP, players {} XP", company_xp, session_xp),
    });

    let mut buffer = Vec::new();
    engine.save(&mut buffer)?;
    let mut restored = EcoSimEngine::with_seed(0);
    restored.load(buffer.as_slice())?;
    results.push(TestResult {
        name: "save_load_round_trip".into(),
        passed: restored.lobbies() == engine.lobbies(),
        detail: format!("{} bytes", buffer.len()),
    });

    if verbose {
        for p in &dashboard.top_performers {
            println!("  {:<6} level {} ({} XP)", p.display_name, p.level, p.experience);
        }
    }

    Ok(results)
}
