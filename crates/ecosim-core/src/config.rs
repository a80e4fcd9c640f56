//! Per-lobby settings chosen by the teacher.

use ecosim_logic::modules::LearningModuleConfig;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Starting bank balance of every new company, in euros.
pub const DEFAULT_START_BUDGET: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintStrength {
    Light,
    #[default]
    Medium,
    Strong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    pub competition_enabled: bool,
    pub random_events_enabled: bool,
    pub teacher_can_trigger_events: bool,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            competition_enabled: true,
            random_events_enabled: false,
            teacher_can_trigger_events: true,
        }
    }
}

/// Simulated office programs visible to students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramsEnabled {
    pub mail: bool,
    pub word_processor: bool,
    pub warehouse: bool,
    pub product_catalog: bool,
    pub bookkeeping: bool,
    pub banking: bool,
    pub calculator: bool,
    pub customer_management: bool,
    pub supplier_management: bool,
}

impl Default for ProgramsEnabled {
    fn default() -> Self {
        Self {
            mail: true,
            word_processor: true,
            warehouse: true,
            product_catalog: true,
            bookkeeping: true,
            banking: true,
            calculator: true,
            customer_management: true,
            supplier_management: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbyConfig {
    pub learning_modules: LearningModuleConfig,
    pub difficulty: Difficulty,
    pub start_budget: f64,
    pub market: MarketSettings,
    pub programs: ProgramsEnabled,
    pub hints_enabled: bool,
    pub hint_strength: HintStrength,
    /// Graded runs only: training submissions are treated as production.
    pub exam_mode: bool,
    /// Whether several students may share one company.
    pub teamwork: bool,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            learning_modules: LearningModuleConfig::default(),
            difficulty: Difficulty::default(),
            start_budget: DEFAULT_START_BUDGET,
            market: MarketSettings::default(),
            programs: ProgramsEnabled::default(),
            hints_enabled: true,
            hint_strength: HintStrength::default(),
            exam_mode: false,
            teamwork: true,
        }
    }
}

impl LobbyConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_logic::grading::CalculationKind;

    #[test]
    fn test_defaults() {
        let config = LobbyConfig::default();
        assert_eq!(config.start_budget, 10_000.0);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert!(config.hints_enabled);
        assert!(!config.exam_mode);
        assert!(config.market.teacher_can_trigger_events);
    }

    #[test]
    fn test_from_json_partial() {
        let config = LobbyConfig::from_json(
            r#"{
                "difficulty": "hard",
                "start_budget": 5000.0,
                "exam_mode": true,
                "market": { "teacher_can_trigger_events": false }
            }"#,
        )
        .unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.start_budget, 5000.0);
        assert!(config.exam_mode);
        assert!(!config.market.teacher_can_trigger_events);
        assert!(config.market.competition_enabled);
        assert!(config.learning_modules.allows(CalculationKind::BreakEven));
    }

    #[test]
    fn test_from_json_empty_object_is_default() {
        assert_eq!(LobbyConfig::from_json("{}").unwrap(), LobbyConfig::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(LobbyConfig::from_json("{ difficulty: ").is_err());
        assert!(LobbyConfig::from_json(r#"{ "difficulty": "impossible" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = LobbyConfig::default();
        config.teamwork = false;
        config.learning_modules.marketing.enabled = true;
        let json = config.to_json().unwrap();
        assert_eq!(LobbyConfig::from_json(&json).unwrap(), config);
    }
}
