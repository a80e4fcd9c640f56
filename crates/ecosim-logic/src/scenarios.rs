//! Contract disturbances and market events a teacher can inject into a
//! lobby.
//!
//! Templates are static data. Picking a concrete description and stamping
//! ids happens in the engine, which owns the randomness.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONTRACT DISTURBANCES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Legal category of a disturbance (Lieferverzug, Schlechtleistung, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisturbanceType {
    DeliveryDelay,
    PoorPerformance,
    PaymentDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisturbanceStatus {
    Active,
    Resolved,
    Escalated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Purchase,
    Sales,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggeredBy {
    System,
    Teacher,
}

/// Which template a disturbance is raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisturbanceKind {
    DeliveryDelay,
    WrongQuantity,
    PoorQuality,
    WrongGoods,
    CustomerPaymentDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisturbanceTemplate {
    pub title: &'static str,
    pub descriptions: &'static [&'static str],
    pub severity: Severity,
    pub required_actions: &'static [&'static str],
}

impl DisturbanceKind {
    pub const ALL: [DisturbanceKind; 5] = [
        DisturbanceKind::DeliveryDelay,
        DisturbanceKind::WrongQuantity,
        DisturbanceKind::PoorQuality,
        DisturbanceKind::WrongGoods,
        DisturbanceKind::CustomerPaymentDelay,
    ];

    pub fn disturbance_type(self) -> DisturbanceType {
        match self {
            DisturbanceKind::DeliveryDelay => DisturbanceType::DeliveryDelay,
            DisturbanceKind::CustomerPaymentDelay => DisturbanceType::PaymentDelay,
            DisturbanceKind::WrongQuantity
            | DisturbanceKind::PoorQuality
            | DisturbanceKind::WrongGoods => DisturbanceType::PoorPerformance,
        }
    }

    pub fn template(self) -> &'static DisturbanceTemplate {
        match self {
            DisturbanceKind::DeliveryDelay => &DELIVERY_DELAY,
            DisturbanceKind::WrongQuantity => &WRONG_QUANTITY,
            DisturbanceKind::PoorQuality => &POOR_QUALITY,
            DisturbanceKind::WrongGoods => &WRONG_GOODS,
            DisturbanceKind::CustomerPaymentDelay => &CUSTOMER_PAYMENT_DELAY,
        }
    }
}

static DELIVERY_DELAY: DisturbanceTemplate = DisturbanceTemplate {
    title: "Lieferverzug",
    descriptions: &[
        "Lieferant kann den vereinbarten Liefertermin nicht einhalten. Neue Lieferung in 7 Tagen.",
        "Ware ist auf Transport verloren gegangen. Ersatzlieferung erfolgt in 5 Tagen.",
        "Lieferant hat Produktionsengpass. Lieferung verzögert sich um 10 Tage.",
    ],
    severity: Severity::Medium,
    required_actions: &[
        "Lieferanten kontaktieren",
        "Nachliefertermin festlegen",
        "Ggf. Kunden informieren",
    ],
};

static WRONG_QUANTITY: DisturbanceTemplate = DisturbanceTemplate {
    title: "Falsche Liefermenge",
    descriptions: &[
        "Gelieferte Menge weicht von bestellter Menge ab (zu wenig geliefert).",
        "Teillieferung ohne vorherige Absprache erfolgt.",
        "Überlieferung: Es wurde mehr geliefert als bestellt.",
    ],
    severity: Severity::Medium,
    required_actions: &[
        "Lieferschein prüfen",
        "Mängelrüge schreiben",
        "Nachlieferung oder Gutschrift fordern",
    ],
};

static POOR_QUALITY: DisturbanceTemplate = DisturbanceTemplate {
    title: "Mangelhafte Qualität",
    descriptions: &[
        "Ware ist beschädigt angekommen (Transportschaden).",
        "Produkt entspricht nicht der vereinbarten Qualität.",
        "Ware ist mit Mängeln behaftet und nicht verkaufsfähig.",
    ],
    severity: Severity::High,
    required_actions: &[
        "Wareneingangsprüfung dokumentieren",
        "Mängelrüge unverzüglich erstellen",
        "Rücksendung oder Ersatzlieferung vereinbaren",
    ],
};

static WRONG_GOODS: DisturbanceTemplate = DisturbanceTemplate {
    title: "Falsche Ware geliefert",
    descriptions: &[
        "Lieferant hat ein falsches Produkt geliefert.",
        "Falsche Farbe/Größe geliefert.",
        "Artikel mit falscher Artikelnummer im Paket.",
    ],
    severity: Severity::High,
    required_actions: &[
        "Falschlieferung dokumentieren",
        "Mängelrüge schreiben",
        "Korrekte Ware nachfordern",
    ],
};

static CUSTOMER_PAYMENT_DELAY: DisturbanceTemplate = DisturbanceTemplate {
    title: "Zahlungsverzug des Kunden",
    descriptions: &[
        "Kunde hat Rechnung trotz Fälligkeit nicht bezahlt.",
        "Kunde beansprucht Skonto nach Ablauf der Frist.",
        "Teilzahlung erfolgt ohne Absprache.",
    ],
    severity: Severity::Medium,
    required_actions: &[
        "Zahlungserinnerung senden",
        "Mahnung mit Mahngebühren erstellen",
        "Zahlungsziel setzen",
    ],
};

// ============================================================================
// MARKET EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketEventKind {
    PriceIncrease,
    DemandSpike,
    SeasonalSale,
    SupplierStrike,
    CompetitorEntry,
    TrendSneaker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketEventType {
    PriceChange,
    DemandSpike,
    NewCompetitor,
    SupplierIssue,
    Trend,
}

/// Effect of a market event. Changes are percentages, delays are days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketImpact {
    pub price_change: Option<f64>,
    pub demand_change: Option<f64>,
    pub delivery_delays: Option<u32>,
}

impl MarketImpact {
    /// Multiplier to apply to a price while the event is active.
    pub fn price_factor(&self) -> f64 {
        1.0 + self.price_change.unwrap_or(0.0) / 100.0
    }

    pub fn demand_factor(&self) -> f64 {
        1.0 + self.demand_change.unwrap_or(0.0) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketEventTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub impact: MarketImpact,
}

impl MarketEventKind {
    pub const ALL: [MarketEventKind; 6] = [
        MarketEventKind::PriceIncrease,
        MarketEventKind::DemandSpike,
        MarketEventKind::SeasonalSale,
        MarketEventKind::SupplierStrike,
        MarketEventKind::CompetitorEntry,
        MarketEventKind::TrendSneaker,
    ];

    pub fn template(self) -> MarketEventTemplate {
        let (title, description, impact) = match self {
            MarketEventKind::PriceIncrease => (
                "Preissteigerung bei Rohstoffen",
                "Aufgrund gestiegener Rohstoffpreise erhöhen Lieferanten ihre Preise um 5-15%.",
                MarketImpact {
                    price_change: Some(10.0),
                    ..MarketImpact::default()
                },
            ),
            MarketEventKind::DemandSpike => (
                "Erhöhte Nachfrage",
                "Durch Trend in sozialen Medien steigt die Nachfrage nach bestimmten Produkten stark an.",
                MarketImpact {
                    demand_change: Some(50.0),
                    ..MarketImpact::default()
                },
            ),
            MarketEventKind::SeasonalSale => (
                "Saisonschlussverkauf",
                "Ende der Saison: Viele Kunden erwarten Rabatte auf Sportartikel.",
                MarketImpact {
                    price_change: Some(-15.0),
                    demand_change: Some(30.0),
                    delivery_delays: None,
                },
            ),
            MarketEventKind::SupplierStrike => (
                "Streik beim Lieferanten",
                "Streik bei einem großen Lieferanten führt zu Verzögerungen.",
                MarketImpact {
                    delivery_delays: Some(7),
                    ..MarketImpact::default()
                },
            ),
            MarketEventKind::CompetitorEntry => (
                "Neuer Wettbewerber",
                "Ein neues Unternehmen tritt in den Markt ein und bietet günstige Preise.",
                MarketImpact {
                    price_change: Some(-8.0),
                    demand_change: Some(-20.0),
                    delivery_delays: None,
                },
            ),
            MarketEventKind::TrendSneaker => (
                "Sneaker-Trend",
                "Influencer tragen bestimmte Sneaker-Modelle, Nachfrage explodiert.",
                MarketImpact {
                    demand_change: Some(80.0),
                    ..MarketImpact::default()
                },
            ),
        };
        MarketEventTemplate {
            title,
            description,
            impact,
        }
    }

    /// Classification shown on the dashboard. Seasonal sales and trends
    /// both count as `Trend`.
    pub fn event_type(self) -> MarketEventType {
        match self {
            MarketEventKind::PriceIncrease => MarketEventType::PriceChange,
            MarketEventKind::DemandSpike => MarketEventType::DemandSpike,
            MarketEventKind::SupplierStrike => MarketEventType::SupplierIssue,
            MarketEventKind::CompetitorEntry => MarketEventType::NewCompetitor,
            MarketEventKind::SeasonalSale | MarketEventKind::TrendSneaker => MarketEventType::Trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_disturbance_has_three_descriptions() {
        for kind in DisturbanceKind::ALL {
            let t = kind.template();
            assert_eq!(t.descriptions.len(), 3, "{:?}", kind);
            assert_eq!(t.required_actions.len(), 3, "{:?}", kind);
            assert!(!t.title.is_empty());
        }
    }

    #[test]
    fn test_disturbance_classification() {
        assert_eq!(
            DisturbanceKind::DeliveryDelay.disturbance_type(),
            DisturbanceType::DeliveryDelay
        );
        assert_eq!(
            DisturbanceKind::WrongGoods.disturbance_type(),
            DisturbanceType::PoorPerformance
        );
        assert_eq!(
            DisturbanceKind::CustomerPaymentDelay.disturbance_type(),
            DisturbanceType::PaymentDelay
        );
    }

    #[test]
    fn test_quality_problems_are_severe() {
        assert_eq!(DisturbanceKind::PoorQuality.template().severity, Severity::High);
        assert_eq!(DisturbanceKind::WrongGoods.template().severity, Severity::High);
        assert_eq!(DisturbanceKind::DeliveryDelay.template().severity, Severity::Medium);
    }

    #[test]
    fn test_every_classification_has_a_template() {
        for ty in [
            DisturbanceType::DeliveryDelay,
            DisturbanceType::PoorPerformance,
            DisturbanceType::PaymentDelay,
        ] {
            assert!(DisturbanceKind::ALL.iter().any(|k| k.disturbance_type() == ty), "{:?}", ty);
        }
        for ty in [
            MarketEventType::PriceChange,
            MarketEventType::DemandSpike,
            MarketEventType::NewCompetitor,
            MarketEventType::SupplierIssue,
            MarketEventType::Trend,
        ] {
            assert!(MarketEventKind::ALL.iter().any(|k| k.event_type() == ty), "{:?}", ty);
        }
    }

    #[test]
    fn test_market_event_types() {
        assert_eq!(MarketEventKind::PriceIncrease.event_type(), MarketEventType::PriceChange);
        assert_eq!(MarketEventKind::DemandSpike.event_type(), MarketEventType::DemandSpike);
        assert_eq!(MarketEventKind::SeasonalSale.event_type(), MarketEventType::Trend);
        assert_eq!(MarketEventKind::SupplierStrike.event_type(), MarketEventType::SupplierIssue);
        assert_eq!(MarketEventKind::CompetitorEntry.event_type(), MarketEventType::NewCompetitor);
        assert_eq!(MarketEventKind::TrendSneaker.event_type(), MarketEventType::Trend);
    }

    #[test]
    fn test_market_impact_factors() {
        let sale = MarketEventKind::SeasonalSale.template().impact;
        assert!((sale.price_factor() - 0.85).abs() < 1e-9);
        assert!((sale.demand_factor() - 1.3).abs() < 1e-9);

        let strike = MarketEventKind::SupplierStrike.template().impact;
        assert_eq!(strike.price_factor(), 1.0);
        assert_eq!(strike.delivery_delays, Some(7));
    }
}
