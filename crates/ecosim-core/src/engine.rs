//! Classroom engine - main entry point for running lobbies

use ecosim_logic::experience::{earned_badges, level_from_xp, StatKey, XpReward};
use ecosim_logic::grading::{grade_calculation, CalculationInput, CalculationMode, CalculationRecord, Submission};
use ecosim_logic::money::GRADING_TOLERANCE;
use ecosim_logic::pin::{is_valid_pin, normalize_pin, LOBBY_PIN_SPACE};
use ecosim_logic::procurement::{compute_procurement_cost, procurement_input_for_order, ProcurementResult};
use ecosim_logic::scenarios::{
    DisturbanceKind, DisturbanceStatus, DisturbanceType, MarketEventKind, OrderSide, TriggeredBy,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{Read, Write};

use crate::config::LobbyConfig;
use crate::dashboard::{build_dashboard, TeacherDashboard};
use crate::error::{EngineError, EngineResult};
use crate::events::{create_disturbance, create_market_event, PlayerResponse};
use crate::lobby::{
    ActivityEntry, Company, LegalForm, Lobby, LobbyCatalog, LobbyStatus, PlayerRole,
    PlayerSession, Progress, START_REPUTATION,
};
use crate::persistence::{load_engine, save_engine};
use crate::pin::generate_lobby_pin;

/// Attempts at drawing an unused lobby PIN before giving up
pub const MAX_PIN_ATTEMPTS: u32 = 32;

/// XP, level and badge changes caused by one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub xp_awarded: u64,
    pub level_before: u32,
    pub level_after: u32,
    /// Badge ids earned by this action.
    pub new_badges: Vec<String>,
}

impl ProgressUpdate {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub record: CalculationRecord,
    pub progress: ProgressUpdate,
}

/// Main classroom engine
///
/// Owns every lobby. Mutating operations advance a logical clock that
/// orders lobbies, activities and events.
pub struct EcoSimEngine {
    lobbies: Vec<Lobby>,
    clock: u64,
    next_id: u64,
    rng: StdRng,
}

impl Default for EcoSimEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EcoSimEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic engine for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            lobbies: Vec::new(),
            clock: 0,
            next_id: 0,
            rng,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}_{}", prefix, self.next_id)
    }

    pub fn lobbies(&self) -> &[Lobby] {
        &self.lobbies
    }

    // ========================================================================
    // LOBBIES
    // ========================================================================

    pub fn create_lobby(
        &mut self,
        teacher_id: &str,
        name: &str,
        config: LobbyConfig,
    ) -> EngineResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::EmptyName("lobby name"));
        }
        let pin = self.unused_pin()?;
        let id = self.new_id("lobby");
        let seq = self.tick();

        log::info!("Lobby {} '{}' created by {} with pin {}", id, name, teacher_id, pin);
        self.lobbies.push(Lobby {
            catalog: LobbyCatalog::seeded(&id),
            id: id.clone(),
            pin,
            name: name.to_string(),
            teacher_id: teacher_id.to_string(),
            config,
            status: LobbyStatus::Active,
            created_seq: seq,
            last_activity_seq: seq,
            companies: Vec::new(),
            sessions: Vec::new(),
            disturbances: Vec::new(),
            market_events: Vec::new(),
            activity: Vec::new(),
        });
        Ok(id)
    }

    fn unused_pin(&mut self) -> EngineResult<String> {
        if self.lobbies.len() as u64 >= LOBBY_PIN_SPACE {
            return Err(EngineError::PinSpaceExhausted { attempts: 0 });
        }
        for _ in 0..MAX_PIN_ATTEMPTS {
            let pin = generate_lobby_pin(&mut self.rng);
            if !self.lobbies.iter().any(|l| l.pin == pin) {
                return Ok(pin);
            }
            log::warn!("Pin collision on {}, retrying", pin);
        }
        Err(EngineError::PinSpaceExhausted {
            attempts: MAX_PIN_ATTEMPTS,
        })
    }

    pub fn lobby(&self, lobby_id: &str) -> EngineResult<&Lobby> {
        self.lobbies
            .iter()
            .find(|l| l.id == lobby_id)
            .ok_or_else(|| EngineError::LobbyNotFound(lobby_id.to_string()))
    }

    fn lobby_mut(&mut self, lobby_id: &str) -> EngineResult<&mut Lobby> {
        self.lobbies
            .iter_mut()
            .find(|l| l.id == lobby_id)
            .ok_or_else(|| EngineError::LobbyNotFound(lobby_id.to_string()))
    }

    fn active_lobby_mut(&mut self, lobby_id: &str) -> EngineResult<&mut Lobby> {
        let lobby = self.lobby_mut(lobby_id)?;
        if let Err(e) = lobby.ensure_active() {
            log::warn!("Rejected action on archived lobby {}", lobby_id);
            return Err(e);
        }
        Ok(lobby)
    }

    /// Look a lobby up by a user-typed PIN (dashes, spaces and case ignored).
    pub fn lobby_by_pin(&self, pin: &str) -> EngineResult<&Lobby> {
        let pin = normalize_pin(pin);
        if !is_valid_pin(&pin) {
            return Err(EngineError::InvalidPin(pin));
        }
        self.lobbies
            .iter()
            .find(|l| l.pin == pin)
            .ok_or_else(|| EngineError::PinNotFound(pin.clone()))
    }

    /// A teacher's lobbies, newest first.
    pub fn lobbies_for_teacher(&self, teacher_id: &str) -> Vec<&Lobby> {
        let mut lobbies: Vec<_> = self
            .lobbies
            .iter()
            .filter(|l| l.teacher_id == teacher_id)
            .collect();
        lobbies.sort_by(|a, b| b.created_seq.cmp(&a.created_seq));
        lobbies
    }

    pub fn archive_lobby(&mut self, lobby_id: &str) -> EngineResult<()> {
        let seq = self.tick();
        let lobby = self.lobby_mut(lobby_id)?;
        if !lobby.is_archived() {
            lobby.status = LobbyStatus::Archived;
            lobby.last_activity_seq = seq;
            log::info!("Lobby {} archived", lobby_id);
        }
        Ok(())
    }

    pub fn update_config(&mut self, lobby_id: &str, config: LobbyConfig) -> EngineResult<()> {
        let seq = self.tick();
        let lobby = self.active_lobby_mut(lobby_id)?;
        lobby.config = config;
        lobby.last_activity_seq = seq;
        log::info!("Lobby {} config updated", lobby_id);
        Ok(())
    }

    // ========================================================================
    // PLAYERS AND COMPANIES
    // ========================================================================

    /// Join the lobby behind `pin` as a new player. Returns the session id.
    pub fn join_lobby(&mut self, pin: &str, display_name: &str) -> EngineResult<String> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(EngineError::EmptyName("display name"));
        }
        let lobby_id = self.lobby_by_pin(pin)?.id.clone();
        self.lobby(&lobby_id)?.ensure_active()?;

        let session_id = self.new_id("session");
        let seq = self.tick();
        let lobby = self.lobby_mut(&lobby_id)?;
        lobby.sessions.push(PlayerSession {
            id: session_id.clone(),
            lobby_id: lobby_id.clone(),
            company_id: None,
            display_name: display_name.to_string(),
            role: PlayerRole::Trainee,
            experience: 0,
            level: 1,
            badges: Vec::new(),
            progress: Progress::Onboarding,
            stats: Default::default(),
            calculations: Vec::new(),
            created_seq: seq,
            last_active_seq: seq,
        });
        lobby.record_activity(ActivityEntry {
            seq,
            session_id: session_id.clone(),
            display_name: display_name.to_string(),
            action: "joined lobby".to_string(),
            success: true,
        });
        log::info!("{} joined lobby {} as {}", display_name, lobby_id, session_id);
        Ok(session_id)
    }

    pub fn create_company(
        &mut self,
        lobby_id: &str,
        name: &str,
        legal_form: LegalForm,
    ) -> EngineResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::EmptyName("company name"));
        }
        self.lobby(lobby_id)?.ensure_active()?;

        let company_id = self.new_id("company");
        let seq = self.tick();
        let lobby = self.lobby_mut(lobby_id)?;
        lobby.companies.push(Company {
            id: company_id.clone(),
            lobby_id: lobby_id.to_string(),
            name: name.to_string(),
            legal_form,
            balance: lobby.config.start_budget,
            experience: 0,
            reputation: START_REPUTATION,
            employees: Vec::new(),
            stats: Default::default(),
            created_seq: seq,
        });
        lobby.last_activity_seq = seq;
        log::info!("Company {} '{}' founded in lobby {}", company_id, name, lobby_id);
        Ok(company_id)
    }

    pub fn assign_to_company(
        &mut self,
        lobby_id: &str,
        session_id: &str,
        company_id: &str,
    ) -> EngineResult<()> {
        let seq = self.tick();
        let lobby = self.active_lobby_mut(lobby_id)?;
        let teamwork = lobby.config.teamwork;
        let company = lobby.company(company_id)?;
        let session = lobby.session(session_id)?;

        match session.company_id.as_deref() {
            Some(current) if current == company_id => return Ok(()),
            Some(current) => {
                log::warn!("{} tried to switch from {} to {}", session_id, current, company_id);
                return Err(EngineError::CompanyMismatch {
                    session_id: session_id.to_string(),
                    current: current.to_string(),
                });
            }
            None => {}
        }
        if !teamwork && !company.employees.is_empty() {
            log::warn!("Company {} is full, teamwork is off", company_id);
            return Err(EngineError::CompanyFull(company_id.to_string()));
        }

        lobby.company_mut(company_id)?.employees.push(session_id.to_string());
        let session = lobby.session_mut(session_id)?;
        session.company_id = Some(company_id.to_string());
        session.progress = Progress::Active;
        session.last_active_seq = seq;
        lobby.last_activity_seq = seq;
        Ok(())
    }

    // ========================================================================
    // CALCULATIONS
    // ========================================================================

    pub fn submit_calculation(
        &mut self,
        lobby_id: &str,
        session_id: &str,
        input: &CalculationInput,
        submission: &Submission,
        mode: CalculationMode,
    ) -> EngineResult<SubmissionOutcome> {
        let seq = self.tick();
        let lobby = self.active_lobby_mut(lobby_id)?;
        lobby.session(session_id)?;

        let kind = input.kind();
        if !lobby.config.learning_modules.allows(kind) {
            log::warn!("{} submitted {:?} but the module is disabled", session_id, kind);
            return Err(EngineError::ModuleDisabled(kind));
        }
        let exam_mode = lobby.config.exam_mode;
        let mode = if exam_mode {
            CalculationMode::Production
        } else {
            mode
        };

        let record = grade_calculation(input, submission, mode, GRADING_TOLERANCE);
        log::debug!(
            "{} graded {:?}: correct={} xp={} errors={:?}",
            session_id,
            kind,
            record.is_correct,
            record.xp_awarded,
            record.errors
        );

        let perfect = mode == CalculationMode::Production
            && record.is_correct
            && record.steps.iter().all(|s| s.is_correct == Some(true));
        let mut bumps = Vec::new();
        if perfect {
            bumps.push(StatKey::PerfectCalculations);
            if exam_mode {
                bumps.push(StatKey::PerfectExams);
            }
        }

        let session = lobby.session_mut(session_id)?;
        session.calculations.push(record.clone());
        if mode == CalculationMode::Production {
            if let Some(company_id) = session.company_id.clone() {
                lobby.company_mut(&company_id)?.stats.record_submission(record.is_correct);
            }
        }

        let progress = apply_progress(
            lobby,
            session_id,
            record.xp_awarded,
            &bumps,
            seq,
            format!("{:?} calculation", kind),
            record.is_correct,
        )?;
        Ok(SubmissionOutcome { record, progress })
    }

    /// Price an order from the lobby's catalog, with active market events
    /// applied to the product price.
    pub fn price_order(
        &self,
        lobby_id: &str,
        supplier_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> EngineResult<ProcurementResult> {
        let lobby = self.lobby(lobby_id)?;
        let supplier = lobby
            .catalog
            .supplier(supplier_id)
            .ok_or_else(|| EngineError::SupplierNotFound(supplier_id.to_string()))?;
        if !supplier.supplies(product_id) {
            return Err(EngineError::NotInCatalog {
                supplier_id: supplier_id.to_string(),
                product_id: product_id.to_string(),
            });
        }
        let mut product = lobby
            .catalog
            .product(product_id)
            .cloned()
            .ok_or_else(|| EngineError::ProductNotFound(product_id.to_string()))?;
        if let Some(price) = lobby.current_base_price(product_id) {
            product.base_price = price;
        }
        let input = procurement_input_for_order(supplier, &product, quantity);
        Ok(compute_procurement_cost(&input))
    }

    // ========================================================================
    // TEACHER CONTROLS
    // ========================================================================

    /// Raise a contract disturbance on an order. Returns its id.
    pub fn trigger_disturbance(
        &mut self,
        lobby_id: &str,
        kind: DisturbanceKind,
        order_id: &str,
        order_side: OrderSide,
    ) -> EngineResult<String> {
        let lobby = self.lobby(lobby_id)?;
        lobby.ensure_active()?;
        let disturbance_type = kind.disturbance_type();
        if !lobby
            .config
            .learning_modules
            .allows_disturbance(disturbance_type)
        {
            log::warn!("{:?} disturbances are disabled in lobby {}", disturbance_type, lobby_id);
            return Err(EngineError::DisturbanceDisabled(disturbance_type));
        }

        let id = self.new_id("disturbance");
        let seq = self.tick();
        let mut disturbance =
            create_disturbance(&mut self.rng, kind, order_id, order_side, TriggeredBy::Teacher);
        disturbance.id = id.clone();
        disturbance.lobby_id = lobby_id.to_string();
        disturbance.created_seq = seq;

        log::info!(
            "Disturbance {} ({}) on order {} in lobby {}",
            id,
            disturbance.title,
            order_id,
            lobby_id
        );
        let lobby = self.lobby_mut(lobby_id)?;
        lobby.disturbances.push(disturbance);
        lobby.last_activity_seq = seq;
        Ok(id)
    }

    /// Record a student's reaction to a disturbance. A correct reaction
    /// resolves it and earns XP; a wrong one escalates it.
    pub fn resolve_disturbance(
        &mut self,
        lobby_id: &str,
        disturbance_id: &str,
        session_id: &str,
        action_taken: &str,
        was_correct: bool,
    ) -> EngineResult<ProgressUpdate> {
        let seq = self.tick();
        let lobby = self.active_lobby_mut(lobby_id)?;
        lobby.session(session_id)?;

        let disturbance = lobby
            .disturbances
            .iter_mut()
            .find(|d| d.id == disturbance_id)
            .ok_or_else(|| EngineError::DisturbanceNotFound(disturbance_id.to_string()))?;
        if !disturbance.is_open() {
            return Err(EngineError::DisturbanceResolved(disturbance_id.to_string()));
        }

        let disturbance_type = disturbance.disturbance_type;
        let xp = if was_correct {
            disturbance_reward(disturbance_type).xp()
        } else {
            0
        };
        disturbance.player_response = Some(PlayerResponse {
            session_id: session_id.to_string(),
            action_taken: action_taken.to_string(),
            response_seq: seq,
            was_correct,
            xp_awarded: xp,
        });
        if was_correct {
            disturbance.status = DisturbanceStatus::Resolved;
            disturbance.resolved_seq = Some(seq);
            log::info!("Disturbance {} resolved by {}", disturbance_id, session_id);
        } else {
            disturbance.status = DisturbanceStatus::Escalated;
            log::info!("Disturbance {} escalated after wrong response", disturbance_id);
        }
        let title = disturbance.title.clone();

        let bumps: &[StatKey] = if was_correct && disturbance_type == DisturbanceType::PaymentDelay {
            &[StatKey::DunningCount]
        } else {
            &[]
        };
        apply_progress(lobby, session_id, xp, bumps, seq, title, was_correct)
    }

    pub fn trigger_market_event(
        &mut self,
        lobby_id: &str,
        kind: MarketEventKind,
        affected_products: Option<Vec<String>>,
        affected_suppliers: Option<Vec<String>>,
    ) -> EngineResult<String> {
        let lobby = self.lobby(lobby_id)?;
        lobby.ensure_active()?;
        if !lobby.config.market.teacher_can_trigger_events {
            log::warn!("Market events are disabled in lobby {}", lobby_id);
            return Err(EngineError::MarketEventsDisabled);
        }

        let id = self.new_id("event");
        let seq = self.tick();
        let mut event = create_market_event(
            kind,
            affected_products,
            affected_suppliers,
            TriggeredBy::Teacher,
        );
        event.id = id.clone();
        event.lobby_id = lobby_id.to_string();
        event.start_seq = seq;

        log::info!("Market event {} ({}) started in lobby {}", id, event.title, lobby_id);
        let lobby = self.lobby_mut(lobby_id)?;
        lobby.market_events.push(event);
        lobby.last_activity_seq = seq;
        Ok(id)
    }

    pub fn end_market_event(&mut self, lobby_id: &str, event_id: &str) -> EngineResult<()> {
        let seq = self.tick();
        let lobby = self.lobby_mut(lobby_id)?;
        let event = lobby
            .market_events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| EngineError::MarketEventNotFound(event_id.to_string()))?;
        if !event.is_active {
            return Err(EngineError::MarketEventEnded(event_id.to_string()));
        }
        event.is_active = false;
        event.end_seq = Some(seq);
        lobby.last_activity_seq = seq;
        log::info!("Market event {} ended in lobby {}", event_id, lobby_id);
        Ok(())
    }

    pub fn dashboard(&self, lobby_id: &str) -> EngineResult<TeacherDashboard> {
        Ok(build_dashboard(self.lobby(lobby_id)?))
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    pub fn save<W: Write>(&self, writer: W) -> EngineResult<()> {
        save_engine(writer, self.clock, self.next_id, &self.lobbies)
    }

    /// Replace all state with a saved snapshot. On error the engine is
    /// left unchanged.
    pub fn load<R: Read>(&mut self, reader: R) -> EngineResult<()> {
        let loaded = load_engine(reader)?;
        self.clock = loaded.clock;
        self.next_id = loaded.next_id;
        self.lobbies = loaded.lobbies;
        log::info!("Loaded {} lobbies", self.lobbies.len());
        Ok(())
    }
}

fn disturbance_reward(disturbance_type: DisturbanceType) -> XpReward {
    match disturbance_type {
        DisturbanceType::DeliveryDelay => XpReward::DeliveryDelayHandled,
        DisturbanceType::PoorPerformance => XpReward::ComplaintHandled,
        DisturbanceType::PaymentDelay => XpReward::DunningLetterCorrect,
    }
}

/// Credit XP to a session and its company, bump statistics, recompute the
/// level and hand out newly earned badges.
fn apply_progress(
    lobby: &mut Lobby,
    session_id: &str,
    xp: u64,
    bumps: &[StatKey],
    seq: u64,
    action: String,
    success: bool,
) -> EngineResult<ProgressUpdate> {
    let session = lobby.session_mut(session_id)?;
    let level_before = session.level;

    session.experience = session.experience.saturating_add(xp);
    session.level = level_from_xp(session.experience);
    session.last_active_seq = seq;
    if session.progress == Progress::Onboarding {
        session.progress = Progress::Active;
    }
    for key in bumps {
        *session.stats.entry(*key).or_insert(0) += 1;
    }
    session.stats.insert(StatKey::Level, session.level as u64);

    let mut new_badges = Vec::new();
    for badge in earned_badges(&session.stats) {
        if !session.badges.iter().any(|b| b == badge.id) {
            session.badges.push(badge.id.to_string());
            new_badges.push(badge.id.to_string());
        }
    }

    let level_after = session.level;
    let display_name = session.display_name.clone();
    let company_id = session.company_id.clone();

    if level_after > level_before {
        log::info!("{} reached level {}", display_name, level_after);
    }
    for badge in &new_badges {
        log::info!("{} earned badge {}", display_name, badge);
    }

    if let Some(company_id) = company_id {
        let company = lobby.company_mut(&company_id)?;
        company.experience = company.experience.saturating_add(xp);
    }

    lobby.record_activity(ActivityEntry {
        seq,
        session_id: session_id.to_string(),
        display_name,
        action,
        success,
    });

    Ok(ProgressUpdate {
        xp_awarded: xp,
        level_before,
        level_after,
        new_badges,
    })
}
