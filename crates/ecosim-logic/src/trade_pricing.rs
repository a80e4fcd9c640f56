//! Trade pricing (Handelskalkulation), forward and reverse.
//!
//! Forward pricing starts at the landed cost and builds up to the gross
//! list price a customer sees:
//!
//! ```text
//! landed cost
//!   + handling cost      (markup on landed cost)
//!   = cost base
//!   + profit             (markup on cost base)
//!   = cash price
//!   + cash discount      (grossed up, p / (100 - p))
//!   = target price
//!   + customer discount  (grossed up)
//!   = net list price
//!   + agent commission   (grossed up)
//!   = list price incl. commission
//!   + VAT
//!   = gross sales price
//! ```
//!
//! Reverse pricing walks the same ladder downwards. Customer deductions are
//! taken off as plain percentages of the higher price (`p / 100`), while
//! VAT, profit and handling are removed with `p / (100 + p)`. That
//! asymmetry is what makes the two directions exact inverses of each other,
//! and it is the convention taught in German retail accounting.

use serde::{Deserialize, Serialize};

use crate::money::{gross_up, net_down, percent_of};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradePricingForwardInput {
    pub landed_cost: f64,
    pub handling_cost_markup_percent: f64,
    pub profit_markup_percent: f64,
    pub customer_cash_discount_percent: Option<f64>,
    pub customer_discount_percent: Option<f64>,
    pub agent_commission_percent: Option<f64>,
    pub vat_percent: f64,
}

impl TradePricingForwardInput {
    /// The reverse-direction input that undoes this calculation starting
    /// from `gross_sales_price`.
    pub fn reverse_from(&self, gross_sales_price: f64) -> TradePricingReverseInput {
        TradePricingReverseInput {
            gross_sales_price,
            vat_percent: self.vat_percent,
            agent_commission_percent: self.agent_commission_percent,
            customer_discount_percent: self.customer_discount_percent,
            customer_cash_discount_percent: self.customer_cash_discount_percent,
            profit_markup_percent: self.profit_markup_percent,
            handling_cost_markup_percent: self.handling_cost_markup_percent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradePricingReverseInput {
    pub gross_sales_price: f64,
    pub vat_percent: f64,
    pub agent_commission_percent: Option<f64>,
    pub customer_discount_percent: Option<f64>,
    pub customer_cash_discount_percent: Option<f64>,
    pub profit_markup_percent: f64,
    pub handling_cost_markup_percent: f64,
}

/// The full pricing ladder. Shared by both directions; only the order in
/// which the values are derived differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePricingSteps {
    pub landed_cost: f64,
    pub handling_cost: f64,
    pub cost_base: f64,
    pub profit: f64,
    pub cash_price: f64,
    pub cash_discount: f64,
    pub target_price: f64,
    pub discount: f64,
    pub net_list_price: f64,
    pub commission: f64,
    pub list_price_with_commission: f64,
    pub vat: f64,
    pub gross_sales_price: f64,
}

impl TradePricingSteps {
    /// Steps bottom-up, from landed cost to gross sales price.
    pub fn ascending(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("landed_cost", self.landed_cost),
            ("handling_cost", self.handling_cost),
            ("cost_base", self.cost_base),
            ("profit", self.profit),
            ("cash_price", self.cash_price),
            ("cash_discount", self.cash_discount),
            ("target_price", self.target_price),
            ("discount", self.discount),
            ("net_list_price", self.net_list_price),
            ("commission", self.commission),
            ("list_price_with_commission", self.list_price_with_commission),
            ("vat", self.vat),
            ("gross_sales_price", self.gross_sales_price),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePricingForwardResult {
    pub steps: TradePricingSteps,
    pub gross_sales_price: f64,
}

impl TradePricingForwardResult {
    pub fn named_steps(&self) -> Vec<(&'static str, f64)> {
        self.steps.ascending()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePricingReverseResult {
    pub steps: TradePricingSteps,
    pub landed_cost: f64,
}

impl TradePricingReverseResult {
    /// Steps in the order they are derived, gross price first.
    pub fn named_steps(&self) -> Vec<(&'static str, f64)> {
        let mut steps = self.steps.ascending();
        steps.reverse();
        steps
    }
}

fn optional_gross_up(base: f64, percent: Option<f64>) -> f64 {
    percent.map_or(0.0, |p| gross_up(base, p))
}

fn optional_percent_of(base: f64, percent: Option<f64>) -> f64 {
    percent.map_or(0.0, |p| percent_of(base, p))
}

/// Forward calculation: landed cost to gross sales price.
pub fn compute_trade_price_forward(input: &TradePricingForwardInput) -> TradePricingForwardResult {
    let landed_cost = input.landed_cost;

    let handling_cost = percent_of(landed_cost, input.handling_cost_markup_percent);
    let cost_base = landed_cost + handling_cost;

    let profit = percent_of(cost_base, input.profit_markup_percent);
    let cash_price = cost_base + profit;

    let cash_discount = optional_gross_up(cash_price, input.customer_cash_discount_percent);
    let target_price = cash_price + cash_discount;

    let discount = optional_gross_up(target_price, input.customer_discount_percent);
    let net_list_price = target_price + discount;

    let commission = optional_gross_up(net_list_price, input.agent_commission_percent);
    let list_price_with_commission = net_list_price + commission;

    let vat = percent_of(list_price_with_commission, input.vat_percent);
    let gross_sales_price = list_price_with_commission + vat;

    TradePricingForwardResult {
        steps: TradePricingSteps {
            landed_cost,
            handling_cost,
            cost_base,
            profit,
            cash_price,
            cash_discount,
            target_price,
            discount,
            net_list_price,
            commission,
            list_price_with_commission,
            vat,
            gross_sales_price,
        },
        gross_sales_price,
    }
}

/// Reverse calculation: gross sales price down to the landed cost the
/// business can afford.
pub fn compute_trade_price_reverse(input: &TradePricingReverseInput) -> TradePricingReverseResult {
    let steps = reverse_steps(input);
    let landed_cost = steps.landed_cost;
    TradePricingReverseResult { steps, landed_cost }
}

/// Peel VAT and customer deductions off a gross price, yielding the cash
/// price. Shared with the difference calculation.
pub(crate) struct ReverseToCashPrice {
    pub gross_sales_price: f64,
    pub vat: f64,
    pub list_price_with_commission: f64,
    pub commission: f64,
    pub net_list_price: f64,
    pub discount: f64,
    pub target_price: f64,
    pub cash_discount: f64,
    pub cash_price: f64,
}

pub(crate) fn reverse_to_cash_price(
    gross_sales_price: f64,
    vat_percent: f64,
    agent_commission_percent: Option<f64>,
    customer_discount_percent: Option<f64>,
    customer_cash_discount_percent: Option<f64>,
) -> ReverseToCashPrice {
    let vat = net_down(gross_sales_price, vat_percent);
    let list_price_with_commission = gross_sales_price - vat;

    let commission = optional_percent_of(list_price_with_commission, agent_commission_percent);
    let net_list_price = list_price_with_commission - commission;

    let discount = optional_percent_of(net_list_price, customer_discount_percent);
    let target_price = net_list_price - discount;

    let cash_discount = optional_percent_of(target_price, customer_cash_discount_percent);
    let cash_price = target_price - cash_discount;

    ReverseToCashPrice {
        gross_sales_price,
        vat,
        list_price_with_commission,
        commission,
        net_list_price,
        discount,
        target_price,
        cash_discount,
        cash_price,
    }
}

fn reverse_steps(input: &TradePricingReverseInput) -> TradePricingSteps {
    let upper = reverse_to_cash_price(
        input.gross_sales_price,
        input.vat_percent,
        input.agent_commission_percent,
        input.customer_discount_percent,
        input.customer_cash_discount_percent,
    );

    let profit = net_down(upper.cash_price, input.profit_markup_percent);
    let cost_base = upper.cash_price - profit;

    let handling_cost = net_down(cost_base, input.handling_cost_markup_percent);
    let landed_cost = cost_base - handling_cost;

    TradePricingSteps {
        landed_cost,
        handling_cost,
        cost_base,
        profit,
        cash_price: upper.cash_price,
        cash_discount: upper.cash_discount,
        target_price: upper.target_price,
        discount: upper.discount,
        net_list_price: upper.net_list_price,
        commission: upper.commission,
        list_price_with_commission: upper.list_price_with_commission,
        vat: upper.vat,
        gross_sales_price: upper.gross_sales_price,
    }
}
