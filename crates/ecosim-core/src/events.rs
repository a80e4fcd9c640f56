//! Disturbance and market event instances raised inside a lobby.

use ecosim_logic::scenarios::{
    DisturbanceKind, DisturbanceStatus, DisturbanceType, MarketEventKind, MarketEventType,
    MarketImpact, OrderSide, Severity, TriggeredBy,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a student reacted to a disturbance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub session_id: String,
    pub action_taken: String,
    pub response_seq: u64,
    pub was_correct: bool,
    pub xp_awarded: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disturbance {
    pub id: String,
    pub lobby_id: String,
    pub kind: DisturbanceKind,
    pub disturbance_type: DisturbanceType,
    pub order_id: String,
    pub order_side: OrderSide,
    pub triggered_by: TriggeredBy,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: DisturbanceStatus,
    pub required_actions: Vec<String>,
    pub player_response: Option<PlayerResponse>,
    pub created_seq: u64,
    pub resolved_seq: Option<u64>,
}

impl Disturbance {
    /// Unresolved, including escalated ones.
    pub fn is_open(&self) -> bool {
        self.status != DisturbanceStatus::Resolved
    }
}

/// Build a disturbance from its template, picking one of the template's
/// descriptions at random.
pub fn create_disturbance(
    rng: &mut impl Rng,
    kind: DisturbanceKind,
    order_id: &str,
    order_side: OrderSide,
    triggered_by: TriggeredBy,
) -> Disturbance {
    let template = kind.template();
    let description = template.descriptions[rng.gen_range(0..template.descriptions.len())];

    Disturbance {
        id: String::new(),
        lobby_id: String::new(),
        kind,
        disturbance_type: kind.disturbance_type(),
        order_id: order_id.to_string(),
        order_side,
        triggered_by,
        title: template.title.to_string(),
        description: description.to_string(),
        severity: template.severity,
        status: DisturbanceStatus::Active,
        required_actions: template
            .required_actions
            .iter()
            .map(|a| a.to_string())
            .collect(),
        player_response: None,
        created_seq: 0,
        resolved_seq: None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub id: String,
    pub lobby_id: String,
    pub kind: MarketEventKind,
    pub event_type: MarketEventType,
    pub title: String,
    pub description: String,
    /// `None` means every product.
    pub affected_products: Option<Vec<String>>,
    /// `None` means every supplier.
    pub affected_suppliers: Option<Vec<String>>,
    pub impact: MarketImpact,
    pub start_seq: u64,
    pub end_seq: Option<u64>,
    pub is_active: bool,
    pub triggered_by: TriggeredBy,
}

impl MarketEvent {
    pub fn affects_product(&self, product_id: &str) -> bool {
        self.affected_products
            .as_ref()
            .map_or(true, |ids| ids.iter().any(|id| id == product_id))
    }

    pub fn affects_supplier(&self, supplier_id: &str) -> bool {
        self.affected_suppliers
            .as_ref()
            .map_or(true, |ids| ids.iter().any(|id| id == supplier_id))
    }
}

pub fn create_market_event(
    kind: MarketEventKind,
    affected_products: Option<Vec<String>>,
    affected_suppliers: Option<Vec<String>>,
    triggered_by: TriggeredBy,
) -> MarketEvent {
    let template = kind.template();
    MarketEvent {
        id: String::new(),
        lobby_id: String::new(),
        kind,
        event_type: kind.event_type(),
        title: template.title.to_string(),
        description: template.description.to_string(),
        affected_products,
        affected_suppliers,
        impact: template.impact,
        start_seq: 0,
        end_seq: None,
        is_active: true,
        triggered_by,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_disturbance_from_template() {
        let mut rng = StdRng::seed_from_u64(5);
        let d = create_disturbance(
            &mut rng,
            DisturbanceKind::PoorQuality,
            "po_17",
            OrderSide::Purchase,
            TriggeredBy::Teacher,
        );
        assert_eq!(d.title, "Mangelhafte Qualität");
        assert_eq!(d.disturbance_type, DisturbanceType::PoorPerformance);
        assert_eq!(d.severity, Severity::High);
        assert_eq!(d.status, DisturbanceStatus::Active);
        assert_eq!(d.required_actions.len(), 3);
        assert!(DisturbanceKind::PoorQuality
            .template()
            .descriptions
            .contains(&d.description.as_str()));
        assert!(d.is_open());
    }

    #[test]
    fn test_disturbance_descriptions_vary() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let d = create_disturbance(
                &mut rng,
                DisturbanceKind::DeliveryDelay,
                "po_1",
                OrderSide::Purchase,
                TriggeredBy::System,
            );
            seen.insert(d.description);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_market_event_scope() {
        let all = create_market_event(MarketEventKind::PriceIncrease, None, None, TriggeredBy::Teacher);
        assert!(all.affects_product("prod_shoe_001"));
        assert!(all.affects_supplier("supp_002"));
        assert_eq!(all.event_type, MarketEventType::PriceChange);

        let sneakers = create_market_event(
            MarketEventKind::TrendSneaker,
            Some(vec!["prod_sneaker_001".to_string()]),
            None,
            TriggeredBy::Teacher,
        );
        assert!(sneakers.affects_product("prod_sneaker_001"));
        assert!(!sneakers.affects_product("prod_ball_001"));
        assert!(sneakers.is_active);
    }
}
