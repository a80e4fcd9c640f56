//! Contribution margin (Deckungsbeitrag) and break-even point
//! (Gewinnschwelle).
//!
//! Degenerate inputs are not rejected: a zero volume makes the long-run
//! floor price non-finite, and a non-positive unit margin makes the
//! break-even point infinite or negative. Callers validate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionMarginInput {
    pub sales_price: f64,
    pub variable_cost_per_unit: f64,
    /// Units sold in the period.
    pub volume: f64,
    pub fixed_costs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionMarginResult {
    pub margin_per_unit: f64,
    pub total_margin: f64,
    pub fixed_costs: f64,
    pub operating_result: f64,
    /// Lowest price covering variable costs only.
    pub short_run_floor_price: f64,
    /// Lowest price covering variable and fixed costs at this volume.
    pub long_run_floor_price: f64,
}

impl ContributionMarginResult {
    pub fn named_steps(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("margin_per_unit", self.margin_per_unit),
            ("total_margin", self.total_margin),
            ("fixed_costs", self.fixed_costs),
            ("operating_result", self.operating_result),
            ("short_run_floor_price", self.short_run_floor_price),
            ("long_run_floor_price", self.long_run_floor_price),
        ]
    }
}

pub fn compute_contribution_margin(input: &ContributionMarginInput) -> ContributionMarginResult {
    let margin_per_unit = input.sales_price - input.variable_cost_per_unit;
    let total_margin = margin_per_unit * input.volume;
    let operating_result = total_margin - input.fixed_costs;

    ContributionMarginResult {
        margin_per_unit,
        total_margin,
        fixed_costs: input.fixed_costs,
        operating_result,
        short_run_floor_price: input.variable_cost_per_unit,
        long_run_floor_price: (input.variable_cost_per_unit * input.volume + input.fixed_costs)
            / input.volume,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub sales_price: f64,
    pub variable_cost_per_unit: f64,
    pub fixed_costs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// Whole units needed to cover fixed costs, rounded up.
    pub break_even_units: f64,
    /// Revenue at `break_even_units`, i.e. the rounded-up quantity times the
    /// price. Unrounded `fixed_costs / margin_per_unit * price` would be
    /// the exact break-even point and is slightly lower.
    pub break_even_revenue: f64,
    pub margin_per_unit: f64,
}

impl BreakEvenResult {
    pub fn named_steps(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("margin_per_unit", self.margin_per_unit),
            ("break_even_units", self.break_even_units),
            ("break_even_revenue", self.break_even_revenue),
        ]
    }
}

pub fn compute_break_even(input: &BreakEvenInput) -> BreakEvenResult {
    let margin_per_unit = input.sales_price - input.variable_cost_per_unit;
    // Partial units cannot be sold
    let break_even_units = (input.fixed_costs / margin_per_unit).ceil();

    BreakEvenResult {
        break_even_units,
        break_even_revenue: break_even_units * input.sales_price,
        margin_per_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contribution_margin_example() {
        let result = compute_contribution_margin(&ContributionMarginInput {
            sales_price: 50.0,
            variable_cost_per_unit: 30.0,
            volume: 1000.0,
            fixed_costs: 15000.0,
        });
        assert_eq!(result.margin_per_unit, 20.0);
        assert_eq!(result.total_margin, 20000.0);
        assert_eq!(result.fixed_costs, 15000.0);
        assert_eq!(result.operating_result, 5000.0);
        assert_eq!(result.short_run_floor_price, 30.0);
        assert_eq!(result.long_run_floor_price, 45.0);
    }

    #[test]
    fn test_contribution_margin_loss() {
        let result = compute_contribution_margin(&ContributionMarginInput {
            sales_price: 40.0,
            variable_cost_per_unit: 30.0,
            volume: 500.0,
            fixed_costs: 15000.0,
        });
        assert_eq!(result.operating_result, -10000.0);
        // (30 × 500 + 15000) / 500
        assert_eq!(result.long_run_floor_price, 60.0);
    }

    #[test]
    fn test_zero_volume_floor_price_is_infinite() {
        let result = compute_contribution_margin(&ContributionMarginInput {
            sales_price: 50.0,
            variable_cost_per_unit: 30.0,
            volume: 0.0,
            fixed_costs: 15000.0,
        });
        assert!(result.long_run_floor_price.is_infinite());
        assert_eq!(result.total_margin, 0.0);
    }

    #[test]
    fn test_break_even_example() {
        let result = compute_break_even(&BreakEvenInput {
            sales_price: 50.0,
            variable_cost_per_unit: 30.0,
            fixed_costs: 15000.0,
        });
        assert_eq!(result.break_even_units, 750.0);
        assert_eq!(result.break_even_revenue, 37500.0);
        assert_eq!(result.margin_per_unit, 20.0);
    }

    #[test]
    fn test_break_even_rounds_up() {
        let result = compute_break_even(&BreakEvenInput {
            sales_price: 10.0,
            variable_cost_per_unit: 7.0,
            fixed_costs: 1000.0,
        });
        // 333.33 units → 334
        assert_eq!(result.break_even_units, 334.0);
        assert_eq!(result.break_even_revenue, 3340.0);
        // Above the exact point of 3 333,33 €
        assert!(result.break_even_revenue > 1000.0 / 3.0 * 10.0);
    }

    #[test]
    fn test_break_even_zero_margin_is_infinite() {
        let result = compute_break_even(&BreakEvenInput {
            sales_price: 30.0,
            variable_cost_per_unit: 30.0,
            fixed_costs: 15000.0,
        });
        assert!(result.break_even_units.is_infinite());
    }

    #[test]
    fn test_break_even_negative_margin_is_negative() {
        let result = compute_break_even(&BreakEvenInput {
            sales_price: 20.0,
            variable_cost_per_unit: 30.0,
            fixed_costs: 15000.0,
        });
        assert!(result.break_even_units < 0.0);
    }
}
