//! Error type shared by every engine operation.

use ecosim_logic::grading::CalculationKind;
use ecosim_logic::scenarios::DisturbanceType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("lobby not found: {0}")]
    LobbyNotFound(String),
    #[error("no lobby with pin {0}")]
    PinNotFound(String),
    #[error("company not found: {0}")]
    CompanyNotFound(String),
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("disturbance not found: {0}")]
    DisturbanceNotFound(String),
    #[error("market event not found: {0}")]
    MarketEventNotFound(String),
    #[error("product not found: {0}")]
    ProductNotFound(String),
    #[error("supplier not found: {0}")]
    SupplierNotFound(String),
    #[error("supplier {supplier_id} does not carry {product_id}")]
    NotInCatalog { supplier_id: String, product_id: String },

    #[error("lobby {0} is archived")]
    LobbyArchived(String),
    #[error("learning module for {0:?} calculations is disabled")]
    ModuleDisabled(CalculationKind),
    #[error("{0:?} disturbances are disabled")]
    DisturbanceDisabled(DisturbanceType),
    #[error("teacher-triggered market events are disabled")]
    MarketEventsDisabled,

    #[error("invalid pin: {0:?}")]
    InvalidPin(String),
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
    #[error("no unused pin found after {attempts} attempts")]
    PinSpaceExhausted { attempts: u32 },

    #[error("session {session_id} already belongs to company {current}")]
    CompanyMismatch { session_id: String, current: String },
    #[error("company {0} already has an employee and teamwork is off")]
    CompanyFull(String),
    #[error("disturbance {0} is already resolved")]
    DisturbanceResolved(String),
    #[error("market event {0} has already ended")]
    MarketEventEnded(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

pub type EngineResult<T> = Result<T, EngineError>;
