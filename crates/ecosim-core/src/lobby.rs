//! Lobby state: the classroom session and everything inside it.

use ecosim_logic::catalog::{seed_products, seed_suppliers, seed_templates, Product, Supplier, Template};
use ecosim_logic::experience::PlayerStats;
use ecosim_logic::grading::CalculationRecord;
use ecosim_logic::rankings::{CompanyStanding, CompanyStats};
use serde::{Deserialize, Serialize};

use crate::config::LobbyConfig;
use crate::error::{EngineError, EngineResult};
use crate::events::{Disturbance, MarketEvent};

/// Entries kept in a lobby's activity log before the oldest are dropped.
pub const MAX_ACTIVITY_LOG: usize = 200;

/// Starting reputation of a new company, 0–100.
pub const START_REPUTATION: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LobbyStatus {
    Active,
    /// Hidden from students; no joins or submissions.
    Archived,
}

/// Per-lobby copy of the seed catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyCatalog {
    pub templates: Vec<Template>,
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
}

impl LobbyCatalog {
    pub fn seeded(lobby_id: &str) -> Self {
        let mut suppliers = seed_suppliers();
        for supplier in &mut suppliers {
            supplier.lobby_id = lobby_id.to_string();
        }
        Self {
            templates: seed_templates(),
            products: seed_products(),
            suppliers,
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalForm {
    Einzelunternehmen,
    GmbH,
    OHG,
    KG,
    AG,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub lobby_id: String,
    pub name: String,
    pub legal_form: LegalForm,
    pub balance: f64,
    pub experience: u64,
    pub reputation: u8,
    /// Session ids.
    pub employees: Vec<String>,
    pub stats: CompanyStats,
    pub created_seq: u64,
}

impl Company {
    pub fn standing(&self) -> CompanyStanding {
        CompanyStanding {
            company_id: self.id.clone(),
            name: self.name.clone(),
            stats: self.stats.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    /// Auszubildender
    Trainee,
    /// Sachbearbeiter
    Clerk,
    /// Abteilungsleiter
    DepartmentHead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    Onboarding,
    Active,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSession {
    pub id: String,
    pub lobby_id: String,
    pub company_id: Option<String>,
    pub display_name: String,
    pub role: PlayerRole,
    pub experience: u64,
    pub level: u32,
    /// Badge ids in the order they were earned.
    pub badges: Vec<String>,
    pub progress: Progress,
    pub stats: PlayerStats,
    pub calculations: Vec<CalculationRecord>,
    pub created_seq: u64,
    pub last_active_seq: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub seq: u64,
    pub session_id: String,
    pub display_name: String,
    pub action: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lobby {
    pub id: String,
    pub pin: String,
    pub name: String,
    pub teacher_id: String,
    pub config: LobbyConfig,
    pub status: LobbyStatus,
    pub created_seq: u64,
    pub last_activity_seq: u64,
    pub catalog: LobbyCatalog,
    pub companies: Vec<Company>,
    pub sessions: Vec<PlayerSession>,
    pub disturbances: Vec<Disturbance>,
    pub market_events: Vec<MarketEvent>,
    pub activity: Vec<ActivityEntry>,
}

impl Lobby {
    pub fn is_archived(&self) -> bool {
        self.status == LobbyStatus::Archived
    }

    /// Error unless the lobby still accepts student and teacher actions.
    pub fn ensure_active(&self) -> EngineResult<()> {
        if self.is_archived() {
            return Err(EngineError::LobbyArchived(self.id.clone()));
        }
        Ok(())
    }

    pub fn company(&self, id: &str) -> EngineResult<&Company> {
        self.companies
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::CompanyNotFound(id.to_string()))
    }

    pub fn company_mut(&mut self, id: &str) -> EngineResult<&mut Company> {
        self.companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::CompanyNotFound(id.to_string()))
    }

    pub fn session(&self, id: &str) -> EngineResult<&PlayerSession> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))
    }

    pub fn session_mut(&mut self, id: &str) -> EngineResult<&mut PlayerSession> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))
    }

    pub fn active_market_events(&self) -> impl Iterator<Item = &MarketEvent> {
        self.market_events.iter().filter(|e| e.is_active)
    }

    pub fn open_disturbances(&self) -> impl Iterator<Item = &Disturbance> {
        self.disturbances.iter().filter(|d| d.is_open())
    }

    /// Wholesale price of a product with every active market event applied.
    pub fn current_base_price(&self, product_id: &str) -> Option<f64> {
        let product = self.catalog.product(product_id)?;
        let factor: f64 = self
            .active_market_events()
            .filter(|e| e.affects_product(product_id))
            .map(|e| e.impact.price_factor())
            .product();
        Some(product.base_price * factor)
    }

    pub fn record_activity(&mut self, entry: ActivityEntry) {
        self.last_activity_seq = entry.seq;
        self.activity.push(entry);
        if self.activity.len() > MAX_ACTIVITY_LOG {
            let excess = self.activity.len() - MAX_ACTIVITY_LOG;
            self.activity.drain(..excess);
        }
    }
}
