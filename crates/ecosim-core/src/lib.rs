//! EcoSim Core - Classroom Engine
//!
//! Stateful side of EcoSim: teacher-managed lobbies where students join by
//! PIN, found companies, submit calculations and react to contract
//! disturbances and market events.
//!
//! # Architecture
//!
//! All business rules live in `ecosim-logic`. This crate owns the state
//! around them:
//! - **Lobbies**: config, per-lobby catalog copy, companies, sessions
//! - **Events**: disturbances and market events, with randomness
//! - **Engine**: the operations, each returning `Result<_, EngineError>`
//! - **Persistence**: bincode snapshots of the whole engine
//!
//! Logging goes through the `log` facade; install a logger in the binary.
//!
//! # Example
//!
//! ```rust
//! use ecosim_core::prelude::*;
//! use ecosim_logic::grading::{CalculationInput, CalculationMode, Submission};
//! use ecosim_logic::procurement::ProcurementInput;
//!
//! let mut engine = EcoSimEngine::with_seed(1);
//! let lobby_id = engine.create_lobby("teacher_1", "BM 11a", LobbyConfig::default())?;
//! let pin = engine.lobby(&lobby_id)?.pin.clone();
//! let session = engine.join_lobby(&pin, "Mia")?;
//!
//! let input = CalculationInput::Procurement(ProcurementInput {
//!     list_price: 100.0,
//!     discount_percent: Some(10.0),
//!     supplier_cash_discount_percent: Some(2.0),
//!     procurement_costs: Some(5.0),
//! });
//! let mut answer = Submission::new();
//! answer.insert("landed_cost".to_string(), 93.2);
//!
//! let outcome = engine.submit_calculation(&lobby_id, &session, &input, &answer, CalculationMode::Production)?;
//! assert!(outcome.record.is_correct);
//! # Ok::<(), EngineError>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod events;
pub mod lobby;
pub mod persistence;
pub mod pin;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::{Difficulty, LobbyConfig};
    pub use crate::dashboard::TeacherDashboard;
    pub use crate::engine::{EcoSimEngine, ProgressUpdate, SubmissionOutcome};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::lobby::{Company, LegalForm, Lobby, LobbyStatus, PlayerSession};
}
