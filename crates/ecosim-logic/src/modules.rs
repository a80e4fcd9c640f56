//! Learning areas a teacher can switch on and off per lobby.
//!
//! Each area has a master switch and sub-module switches. A sub-module is
//! only usable when both its own switch and the area switch are on.

use serde::{Deserialize, Serialize};

use crate::grading::CalculationKind;
use crate::scenarios::DisturbanceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningArea {
    Purchasing,
    Sales,
    Marketing,
    Controlling,
    Finance,
    ContractDisruptions,
}

impl LearningArea {
    pub const ALL: [LearningArea; 6] = [
        LearningArea::Purchasing,
        LearningArea::Sales,
        LearningArea::Marketing,
        LearningArea::Controlling,
        LearningArea::Finance,
        LearningArea::ContractDisruptions,
    ];

    /// German display label.
    pub fn label(self) -> &'static str {
        match self {
            LearningArea::Purchasing => "Einkauf",
            LearningArea::Sales => "Verkauf",
            LearningArea::Marketing => "Marketing",
            LearningArea::Controlling => "Controlling",
            LearningArea::Finance => "Finanzen",
            LearningArea::ContractDisruptions => "Kaufvertragsstörungen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasingModules {
    pub enabled: bool,
    pub supplier_search: bool,
    pub offer_comparison: bool,
    pub ordering: bool,
    pub goods_receipt: bool,
    pub invoice_check: bool,
    pub procurement_calculation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesModules {
    pub enabled: bool,
    pub inquiries: bool,
    pub quotes: bool,
    pub order_confirmation: bool,
    pub delivery_note: bool,
    pub invoicing: bool,
    pub payment_monitoring: bool,
    pub trade_calculation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingModules {
    pub enabled: bool,
    pub pricing_policy: bool,
    pub advertising: bool,
    pub social_media: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllingModules {
    pub enabled: bool,
    pub costing: bool,
    pub contribution_margin: bool,
    pub break_even: bool,
    pub key_figures: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceModules {
    pub enabled: bool,
    pub booking_entries: bool,
    pub voucher_check: bool,
    pub balance_sheet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisruptionModules {
    pub enabled: bool,
    pub delivery_delay: bool,
    pub poor_performance: bool,
    pub payment_delay: bool,
    pub dunning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningModuleConfig {
    pub purchasing: PurchasingModules,
    pub sales: SalesModules,
    pub marketing: MarketingModules,
    pub controlling: ControllingModules,
    pub finance: FinanceModules,
    pub contract_disruptions: DisruptionModules,
}

impl Default for LearningModuleConfig {
    /// Everything on except marketing and balance sheets.
    fn default() -> Self {
        Self {
            purchasing: PurchasingModules {
                enabled: true,
                supplier_search: true,
                offer_comparison: true,
                ordering: true,
                goods_receipt: true,
                invoice_check: true,
                procurement_calculation: true,
            },
            sales: SalesModules {
                enabled: true,
                inquiries: true,
                quotes: true,
                order_confirmation: true,
                delivery_note: true,
                invoicing: true,
                payment_monitoring: true,
                trade_calculation: true,
            },
            marketing: MarketingModules {
                enabled: false,
                pricing_policy: false,
                advertising: false,
                social_media: false,
            },
            controlling: ControllingModules {
                enabled: true,
                costing: true,
                contribution_margin: true,
                break_even: true,
                key_figures: true,
            },
            finance: FinanceModules {
                enabled: true,
                booking_entries: true,
                voucher_check: true,
                balance_sheet: false,
            },
            contract_disruptions: DisruptionModules {
                enabled: true,
                delivery_delay: true,
                poor_performance: true,
                payment_delay: true,
                dunning: true,
            },
        }
    }
}

impl LearningModuleConfig {
    pub fn area_enabled(&self, area: LearningArea) -> bool {
        match area {
            LearningArea::Purchasing => self.purchasing.enabled,
            LearningArea::Sales => self.sales.enabled,
            LearningArea::Marketing => self.marketing.enabled,
            LearningArea::Controlling => self.controlling.enabled,
            LearningArea::Finance => self.finance.enabled,
            LearningArea::ContractDisruptions => self.contract_disruptions.enabled,
        }
    }

    pub fn set_area(&mut self, area: LearningArea, enabled: bool) {
        match area {
            LearningArea::Purchasing => self.purchasing.enabled = enabled,
            LearningArea::Sales => self.sales.enabled = enabled,
            LearningArea::Marketing => self.marketing.enabled = enabled,
            LearningArea::Controlling => self.controlling.enabled = enabled,
            LearningArea::Finance => self.finance.enabled = enabled,
            LearningArea::ContractDisruptions => self.contract_disruptions.enabled = enabled,
        }
    }

    /// Learning area a calculation scheme belongs to.
    pub fn area_of(kind: CalculationKind) -> LearningArea {
        match kind {
            CalculationKind::Procurement => LearningArea::Purchasing,
            CalculationKind::TradeForward
            | CalculationKind::TradeReverse
            | CalculationKind::Difference => LearningArea::Sales,
            CalculationKind::ContributionMargin | CalculationKind::BreakEven => {
                LearningArea::Controlling
            }
        }
    }

    /// Whether students may submit calculations of this kind.
    pub fn allows(&self, kind: CalculationKind) -> bool {
        let submodule = match kind {
            CalculationKind::Procurement => self.purchasing.procurement_calculation,
            CalculationKind::TradeForward
            | CalculationKind::TradeReverse
            | CalculationKind::Difference => self.sales.trade_calculation,
            CalculationKind::ContributionMargin => self.controlling.contribution_margin,
            CalculationKind::BreakEven => self.controlling.break_even,
        };
        submodule && self.area_enabled(Self::area_of(kind))
    }

    /// Whether teachers may raise disturbances in this lobby.
    pub fn disturbances_enabled(&self) -> bool {
        self.contract_disruptions.enabled
    }

    pub fn allows_disturbance(&self, kind: DisturbanceType) -> bool {
        let d = &self.contract_disruptions;
        let submodule = match kind {
            DisturbanceType::DeliveryDelay => d.delivery_delay,
            DisturbanceType::PoorPerformance => d.poor_performance,
            DisturbanceType::PaymentDelay => d.payment_delay,
        };
        submodule && d.enabled
    }

    pub fn enabled_areas(&self) -> Vec<LearningArea> {
        LearningArea::ALL
            .iter()
            .copied()
            .filter(|a| self.area_enabled(*a))
            .collect()
    }
}
