//! Procurement pricing (Bezugskalkulation).
//!
//! Converts a supplier's list price into the landed cost in the fixed
//! commercial order: trade discount, then supplier cash discount, then
//! freight-in and other procurement costs.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, Supplier};
use crate::money::percent_of;

/// Parameters of a procurement calculation. Absent percentages and costs
/// count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcurementInput {
    pub list_price: f64,
    pub discount_percent: Option<f64>,
    pub supplier_cash_discount_percent: Option<f64>,
    pub procurement_costs: Option<f64>,
}

/// Every intermediate value of the procurement scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementSteps {
    pub list_price: f64,
    pub trade_discount: f64,
    pub after_trade_discount: f64,
    pub cash_discount: f64,
    pub after_cash_discount: f64,
    pub procurement_costs: f64,
    pub landed_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementResult {
    pub steps: ProcurementSteps,
    pub landed_cost: f64,
}

impl ProcurementResult {
    /// Steps as `(name, value)` pairs in calculation order.
    pub fn named_steps(&self) -> Vec<(&'static str, f64)> {
        let s = &self.steps;
        vec![
            ("list_price", s.list_price),
            ("trade_discount", s.trade_discount),
            ("after_trade_discount", s.after_trade_discount),
            ("cash_discount", s.cash_discount),
            ("after_cash_discount", s.after_cash_discount),
            ("procurement_costs", s.procurement_costs),
            ("landed_cost", s.landed_cost),
        ]
    }
}

/// Compute the landed cost from a list price.
pub fn compute_procurement_cost(input: &ProcurementInput) -> ProcurementResult {
    let list_price = input.list_price;

    let trade_discount = percent_of(list_price, input.discount_percent.unwrap_or(0.0));
    let after_trade_discount = list_price - trade_discount;

    let cash_discount = percent_of(
        after_trade_discount,
        input.supplier_cash_discount_percent.unwrap_or(0.0),
    );
    let after_cash_discount = after_trade_discount - cash_discount;

    let procurement_costs = input.procurement_costs.unwrap_or(0.0);
    let landed_cost = after_cash_discount + procurement_costs;

    ProcurementResult {
        steps: ProcurementSteps {
            list_price,
            trade_discount,
            after_trade_discount,
            cash_discount,
            after_cash_discount,
            procurement_costs,
            landed_cost,
        },
        landed_cost,
    }
}

/// Build the procurement input for ordering `quantity` units of `product`
/// from `supplier`, using the supplier's payment and delivery terms.
///
/// Shipping is waived once the order value reaches the supplier's
/// free-shipping threshold.
pub fn procurement_input_for_order(
    supplier: &Supplier,
    product: &Product,
    quantity: u32,
) -> ProcurementInput {
    let list_price = product.base_price * quantity as f64;
    let shipping = if list_price >= supplier.delivery_terms.free_shipping_from {
        0.0
    } else {
        supplier.delivery_terms.shipping_cost
    };
    ProcurementInput {
        list_price,
        discount_percent: None,
        supplier_cash_discount_percent: Some(supplier.payment_terms.discount_percent),
        procurement_costs: Some(shipping),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed_products, seed_suppliers};

    #[test]
    fn test_worked_example() {
        let result = compute_procurement_cost(&ProcurementInput {
            list_price: 100.0,
            discount_percent: Some(10.0),
            supplier_cash_discount_percent: Some(2.0),
            procurement_costs: Some(5.0),
        });
        assert!((result.steps.trade_discount - 10.0).abs() < 1e-9);
        assert!((result.steps.after_trade_discount - 90.0).abs() < 1e-9);
        assert!((result.steps.cash_discount - 1.8).abs() < 1e-9);
        assert!((result.steps.after_cash_discount - 88.2).abs() < 1e-9);
        assert!((result.landed_cost - 93.2).abs() < 1e-9);
        assert_eq!(result.landed_cost, result.steps.landed_cost);
    }

    #[test]
    fn test_absent_optionals_are_zero() {
        let result = compute_procurement_cost(&ProcurementInput {
            list_price: 250.0,
            ..Default::default()
        });
        assert_eq!(result.steps.trade_discount, 0.0);
        assert_eq!(result.steps.cash_discount, 0.0);
        assert_eq!(result.steps.procurement_costs, 0.0);
        assert_eq!(result.landed_cost, 250.0);
    }

    #[test]
    fn test_explicit_zero_equals_absent() {
        let absent = compute_procurement_cost(&ProcurementInput {
            list_price: 80.0,
            ..Default::default()
        });
        let zero = compute_procurement_cost(&ProcurementInput {
            list_price: 80.0,
            discount_percent: Some(0.0),
            supplier_cash_discount_percent: Some(0.0),
            procurement_costs: Some(0.0),
        });
        assert_eq!(absent, zero);
    }

    #[test]
    fn test_cash_discount_applies_after_trade_discount() {
        // 2 % of 50 (not of 100)
        let result = compute_procurement_cost(&ProcurementInput {
            list_price: 100.0,
            discount_percent: Some(50.0),
            supplier_cash_discount_percent: Some(2.0),
            procurement_costs: None,
        });
        assert!((result.steps.cash_discount - 1.0).abs() < 1e-9);
        assert!((result.landed_cost - 49.0).abs() < 1e-9);
    }

    #[test]
    fn test_named_steps_order() {
        let result = compute_procurement_cost(&ProcurementInput {
            list_price: 10.0,
            ..Default::default()
        });
        let names: Vec<_> = result.named_steps().iter().map(|(n, _)| *n).collect();
        assert_eq!(names.first(), Some(&"list_price"));
        assert_eq!(names.last(), Some(&"landed_cost"));
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_order_input_uses_supplier_terms() {
        let suppliers = seed_suppliers();
        let products = seed_products();
        let mueller = suppliers.iter().find(|s| s.id == "supp_001").unwrap();
        let shoe = products.iter().find(|p| p.id == "prod_shoe_001").unwrap();

        // 2 × 45 € is below the 500 € free-shipping threshold
        let small = procurement_input_for_order(mueller, shoe, 2);
        assert!((small.list_price - 90.0).abs() < 1e-9);
        assert_eq!(small.supplier_cash_discount_percent, Some(2.0));
        assert_eq!(small.procurement_costs, Some(7.90));

        let large = procurement_input_for_order(mueller, shoe, 20);
        assert_eq!(large.procurement_costs, Some(0.0));
    }
}
