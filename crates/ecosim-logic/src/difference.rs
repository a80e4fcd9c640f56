//! Difference calculation (Differenzkalkulation).
//!
//! When both the purchase side (landed cost) and the market side (gross
//! sales price) are fixed, one markup is left over. The calculation runs
//! forward from the landed cost and backward from the gross price until
//! the two meet, then reads off the unknown markup.

use serde::{Deserialize, Serialize};

use crate::money::percent_of;
use crate::trade_pricing::reverse_to_cash_price;

/// Which markup the difference calculation solves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupUnknown {
    /// Handling markup known, profit markup solved.
    ProfitMarkup,
    /// Profit markup known, handling markup solved.
    HandlingCostMarkup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifferenceInput {
    pub landed_cost: f64,
    pub gross_sales_price: f64,
    pub vat_percent: f64,
    pub handling_cost_markup_percent: Option<f64>,
    pub profit_markup_percent: Option<f64>,
    pub customer_cash_discount_percent: Option<f64>,
    pub customer_discount_percent: Option<f64>,
    pub agent_commission_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceResult {
    pub unknown: MarkupUnknown,
    pub landed_cost: f64,
    pub cost_base: f64,
    pub cash_price: f64,
    /// Profit or handling cost in currency; negative means a loss.
    pub amount: f64,
    pub markup_percent: f64,
}

impl DifferenceResult {
    pub fn named_steps(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("landed_cost", self.landed_cost),
            ("cost_base", self.cost_base),
            ("cash_price", self.cash_price),
            ("amount", self.amount),
            ("markup_percent", self.markup_percent),
        ]
    }

    /// Whether the given sales price still covers all costs.
    pub fn is_profitable(&self) -> bool {
        match self.unknown {
            MarkupUnknown::ProfitMarkup => self.amount > 0.0,
            MarkupUnknown::HandlingCostMarkup => self.amount >= 0.0,
        }
    }
}

/// Solve for the missing markup. The markup that is not being solved for
/// defaults to zero when absent.
pub fn compute_difference(input: &DifferenceInput, unknown: MarkupUnknown) -> DifferenceResult {
    let cash_price = reverse_to_cash_price(
        input.gross_sales_price,
        input.vat_percent,
        input.agent_commission_percent,
        input.customer_discount_percent,
        input.customer_cash_discount_percent,
    )
    .cash_price;

    let landed_cost = input.landed_cost;
    let (cost_base, amount, markup_percent) = match unknown {
        MarkupUnknown::ProfitMarkup => {
            let handling = percent_of(landed_cost, input.handling_cost_markup_percent.unwrap_or(0.0));
            let cost_base = landed_cost + handling;
            let profit = cash_price - cost_base;
            (cost_base, profit, profit / cost_base * 100.0)
        }
        MarkupUnknown::HandlingCostMarkup => {
            let profit_markup = input.profit_markup_percent.unwrap_or(0.0);
            let cost_base = cash_price * 100.0 / (100.0 + profit_markup);
            let handling = cost_base - landed_cost;
            (cost_base, handling, handling / landed_cost * 100.0)
        }
    };

    DifferenceResult {
        unknown,
        landed_cost,
        cost_base,
        cash_price,
        amount,
        markup_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade_pricing::{compute_trade_price_forward, TradePricingForwardInput};

    fn forward_input() -> TradePricingForwardInput {
        TradePricingForwardInput {
            landed_cost: 80.0,
            handling_cost_markup_percent: 30.0,
            profit_markup_percent: 12.5,
            customer_cash_discount_percent: Some(3.0),
            customer_discount_percent: Some(15.0),
            agent_commission_percent: Some(5.0),
            vat_percent: 19.0,
        }
    }

    fn difference_input(gross: f64) -> DifferenceInput {
        let f = forward_input();
        DifferenceInput {
            landed_cost: f.landed_cost,
            gross_sales_price: gross,
            vat_percent: f.vat_percent,
            handling_cost_markup_percent: Some(f.handling_cost_markup_percent),
            profit_markup_percent: Some(f.profit_markup_percent),
            customer_cash_discount_percent: f.customer_cash_discount_percent,
            customer_discount_percent: f.customer_discount_percent,
            agent_commission_percent: f.agent_commission_percent,
        }
    }

    #[test]
    fn test_recovers_profit_markup() {
        let gross = compute_trade_price_forward(&forward_input()).gross_sales_price;
        let result = compute_difference(&difference_input(gross), MarkupUnknown::ProfitMarkup);
        assert!((result.markup_percent - 12.5).abs() < 1e-6);
        assert!((result.cost_base - 104.0).abs() < 1e-9);
        assert!((result.amount - 13.0).abs() < 1e-6);
        assert!(result.is_profitable());
    }

    #[test]
    fn test_recovers_handling_markup() {
        let gross = compute_trade_price_forward(&forward_input()).gross_sales_price;
        let result = compute_difference(&difference_input(gross), MarkupUnknown::HandlingCostMarkup);
        assert!((result.markup_percent - 30.0).abs() < 1e-6);
        assert!((result.amount - 24.0).abs() < 1e-6);
    }

    #[test]
    fn test_price_below_cost_is_a_loss() {
        let result = compute_difference(
            &DifferenceInput {
                landed_cost: 100.0,
                gross_sales_price: 119.0,
                vat_percent: 19.0,
                handling_cost_markup_percent: Some(20.0),
                ..Default::default()
            },
            MarkupUnknown::ProfitMarkup,
        );
        assert!((result.cash_price - 100.0).abs() < 1e-9);
        assert!((result.amount + 20.0).abs() < 1e-9);
        assert!(result.markup_percent < 0.0);
        assert!(!result.is_profitable());
    }

    #[test]
    fn test_zero_landed_cost_propagates_non_finite() {
        let result = compute_difference(
            &DifferenceInput {
                landed_cost: 0.0,
                gross_sales_price: 0.0,
                vat_percent: 19.0,
                ..Default::default()
            },
            MarkupUnknown::HandlingCostMarkup,
        );
        assert!(result.markup_percent.is_nan());
    }
}
