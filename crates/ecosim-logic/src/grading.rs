//! Grading of student calculations.
//!
//! A student submits named step values for one of the calculation schemes.
//! Each submitted step is compared with the engine's value within a fixed
//! tolerance. The scheme's final step is mandatory, intermediate steps are
//! optional, and unknown step names count as mistakes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::contribution::{
    compute_break_even, compute_contribution_margin, BreakEvenInput, ContributionMarginInput,
};
use crate::difference::{compute_difference, DifferenceInput, MarkupUnknown};
use crate::experience::XpReward;
use crate::money::validate_calculation;
use crate::procurement::{compute_procurement_cost, ProcurementInput};
use crate::trade_pricing::{
    compute_trade_price_forward, compute_trade_price_reverse, TradePricingForwardInput,
    TradePricingReverseInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationKind {
    Procurement,
    TradeForward,
    TradeReverse,
    Difference,
    ContributionMargin,
    BreakEven,
}

impl CalculationKind {
    pub const ALL: [CalculationKind; 6] = [
        CalculationKind::Procurement,
        CalculationKind::TradeForward,
        CalculationKind::TradeReverse,
        CalculationKind::Difference,
        CalculationKind::ContributionMargin,
        CalculationKind::BreakEven,
    ];

    /// XP reward for a correct solution.
    pub fn reward(self) -> XpReward {
        match self {
            CalculationKind::Procurement => XpReward::ProcurementCalculationCorrect,
            CalculationKind::TradeForward
            | CalculationKind::TradeReverse
            | CalculationKind::Difference => XpReward::TradeCalculationCorrect,
            CalculationKind::ContributionMargin => XpReward::ContributionMarginCalculated,
            CalculationKind::BreakEven => XpReward::BreakEvenDetermined,
        }
    }

    /// Name of the step that holds the scheme's answer.
    pub fn result_step(self) -> &'static str {
        match self {
            CalculationKind::Procurement => "landed_cost",
            CalculationKind::TradeForward => "gross_sales_price",
            CalculationKind::TradeReverse => "landed_cost",
            CalculationKind::Difference => "markup_percent",
            CalculationKind::ContributionMargin => "operating_result",
            CalculationKind::BreakEven => "break_even_units",
        }
    }
}

/// Input of any calculation scheme.
///
/// Externally tagged, e.g. `{"break_even": {...}}`, so the same value
/// round-trips through both JSON and bincode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationInput {
    Procurement(ProcurementInput),
    TradeForward(TradePricingForwardInput),
    TradeReverse(TradePricingReverseInput),
    Difference {
        input: DifferenceInput,
        unknown: MarkupUnknown,
    },
    ContributionMargin(ContributionMarginInput),
    BreakEven(BreakEvenInput),
}

impl CalculationInput {
    pub fn kind(&self) -> CalculationKind {
        match self {
            CalculationInput::Procurement(_) => CalculationKind::Procurement,
            CalculationInput::TradeForward(_) => CalculationKind::TradeForward,
            CalculationInput::TradeReverse(_) => CalculationKind::TradeReverse,
            CalculationInput::Difference { .. } => CalculationKind::Difference,
            CalculationInput::ContributionMargin(_) => CalculationKind::ContributionMargin,
            CalculationInput::BreakEven(_) => CalculationKind::BreakEven,
        }
    }

    /// Run the scheme and return its named steps.
    pub fn evaluate(&self) -> Vec<(&'static str, f64)> {
        match self {
            CalculationInput::Procurement(i) => compute_procurement_cost(i).named_steps(),
            CalculationInput::TradeForward(i) => compute_trade_price_forward(i).named_steps(),
            CalculationInput::TradeReverse(i) => compute_trade_price_reverse(i).named_steps(),
            CalculationInput::Difference { input, unknown } => {
                compute_difference(input, *unknown).named_steps()
            }
            CalculationInput::ContributionMargin(i) => {
                compute_contribution_margin(i).named_steps()
            }
            CalculationInput::BreakEven(i) => compute_break_even(i).named_steps(),
        }
    }
}

/// Practice runs earn half the XP of graded ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    Training,
    Production,
}

/// Named step values entered by a student.
pub type Submission = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCheck {
    pub step: String,
    pub expected: f64,
    pub submitted: Option<f64>,
    /// `None` when the student left the step blank.
    pub is_correct: Option<bool>,
}

/// A graded calculation, ready to be stored alongside the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub kind: CalculationKind,
    pub mode: CalculationMode,
    pub input: CalculationInput,
    pub steps: Vec<StepCheck>,
    pub result: f64,
    pub is_correct: bool,
    pub errors: Vec<String>,
    pub xp_awarded: u64,
}

pub fn grade_calculation(
    input: &CalculationInput,
    submission: &Submission,
    mode: CalculationMode,
    tolerance: f64,
) -> CalculationRecord {
    let kind = input.kind();
    let result_step = kind.result_step();
    let expected_steps = input.evaluate();

    let mut errors = Vec::new();
    let mut steps = Vec::with_capacity(expected_steps.len());
    let mut result = f64::NAN;

    for (name, expected) in &expected_steps {
        let submitted = submission.get(*name).copied();
        let is_correct = submitted.map(|v| validate_calculation(*expected, v, tolerance));
        match (submitted, is_correct) {
            (Some(v), Some(false)) => {
                errors.push(format!("{}: expected {:.2}, got {:.2}", name, expected, v))
            }
            (None, _) if *name == result_step => errors.push(format!("{}: missing", name)),
            _ => {}
        }
        if *name == result_step {
            result = *expected;
        }
        steps.push(StepCheck {
            step: name.to_string(),
            expected: *expected,
            submitted,
            is_correct,
        });
    }

    for name in submission.keys() {
        if !expected_steps.iter().any(|(n, _)| *n == name.as_str()) {
            errors.push(format!("{}: unknown step", name));
        }
    }

    let is_correct = errors.is_empty();
    let xp_awarded = match (is_correct, mode) {
        (false, _) => 0,
        (true, CalculationMode::Production) => kind.reward().xp(),
        (true, CalculationMode::Training) => kind.reward().xp() / 2,
    };

    CalculationRecord {
        kind,
        mode,
        input: input.clone(),
        steps,
        result,
        is_correct,
        errors,
        xp_awarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::GRADING_TOLERANCE;

    fn procurement() -> CalculationInput {
        CalculationInput::Procurement(ProcurementInput {
            list_price: 100.0,
            discount_percent: Some(10.0),
            supplier_cash_discount_percent: Some(2.0),
            procurement_costs: Some(5.0),
        })
    }

    fn submission(pairs: &[(&str, f64)]) -> Submission {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_correct_final_answer_only() {
        let record = grade_calculation(
            &procurement(),
            &submission(&[("landed_cost", 93.2)]),
            CalculationMode::Production,
            GRADING_TOLERANCE,
        );
        assert!(record.is_correct);
        assert!(record.errors.is_empty());
        assert_eq!(record.xp_awarded, 25);
        assert!((record.result - 93.2).abs() < 1e-9);
        assert_eq!(record.kind, CalculationKind::Procurement);
    }

    #[test]
    fn test_wrong_intermediate_step() {
        let record = grade_calculation(
            &procurement(),
            &submission(&[("after_trade_discount", 91.0), ("landed_cost", 93.2)]),
            CalculationMode::Production,
            GRADING_TOLERANCE,
        );
        assert!(!record.is_correct);
        assert_eq!(record.errors.len(), 1);
        assert!(record.errors[0].starts_with("after_trade_discount"));
        assert_eq!(record.xp_awarded, 0);
        let step = record
            .steps
            .iter()
            .find(|s| s.step == "after_trade_discount")
            .unwrap();
        assert_eq!(step.is_correct, Some(false));
    }

    #[test]
    fn test_missing_final_answer() {
        let record = grade_calculation(
            &procurement(),
            &submission(&[("after_trade_discount", 90.0)]),
            CalculationMode::Production,
            GRADING_TOLERANCE,
        );
        assert!(!record.is_correct);
        assert_eq!(record.errors, vec!["landed_cost: missing".to_string()]);
    }

    #[test]
    fn test_unknown_step_is_an_error() {
        let record = grade_calculation(
            &procurement(),
            &submission(&[("landed_cost", 93.2), ("bonus", 1.0)]),
            CalculationMode::Production,
            GRADING_TOLERANCE,
        );
        assert!(!record.is_correct);
        assert_eq!(record.errors, vec!["bonus: unknown step".to_string()]);
    }

    #[test]
    fn test_training_mode_halves_xp() {
        let input = CalculationInput::BreakEven(BreakEvenInput {
            sales_price: 50.0,
            variable_cost_per_unit: 30.0,
            fixed_costs: 15000.0,
        });
        let record = grade_calculation(
            &input,
            &submission(&[("break_even_units", 750.0)]),
            CalculationMode::Training,
            GRADING_TOLERANCE,
        );
        assert!(record.is_correct);
        assert_eq!(record.xp_awarded, 17);
    }

    #[test]
    fn test_tolerance_applies() {
        let record = grade_calculation(
            &procurement(),
            &submission(&[("landed_cost", 93.205)]),
            CalculationMode::Production,
            GRADING_TOLERANCE,
        );
        assert!(record.is_correct);
    }

    #[test]
    fn test_every_kind_has_result_step() {
        let inputs = [
            procurement(),
            CalculationInput::TradeForward(TradePricingForwardInput::default()),
            CalculationInput::TradeReverse(TradePricingReverseInput::default()),
            CalculationInput::Difference {
                input: DifferenceInput::default(),
                unknown: MarkupUnknown::ProfitMarkup,
            },
            CalculationInput::ContributionMargin(ContributionMarginInput::default()),
            CalculationInput::BreakEven(BreakEvenInput::default()),
        ];
        for input in &inputs {
            let kind = input.kind();
            assert!(
                input.evaluate().iter().any(|(n, _)| *n == kind.result_step()),
                "{:?} lacks its result step",
                kind
            );
        }
        assert_eq!(inputs.len(), CalculationKind::ALL.len());
    }
}
