//! Teacher dashboard: a read-only snapshot of one lobby.

use ecosim_logic::experience::find_badge;
use ecosim_logic::pin::format_pin;
use ecosim_logic::rankings::{rank_companies, CompanyRankings, CompanyStats};
use serde::{Deserialize, Serialize};

use crate::events::{Disturbance, MarketEvent};
use crate::lobby::{ActivityEntry, Lobby, LobbyStatus};

pub const TOP_PERFORMERS: usize = 10;
pub const RECENT_ACTIVITIES: usize = 20;
const RECENT_ACHIEVEMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub experience: u64,
    pub reputation: u8,
    pub stats: CompanyStats,
    pub employee_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub session_id: String,
    pub display_name: String,
    pub company_name: Option<String>,
    pub experience: u64,
    pub level: u32,
    /// Names of the most recently earned badges, newest first.
    pub recent_achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherDashboard {
    pub lobby_id: String,
    pub lobby_name: String,
    /// Display form, e.g. `AB-23-CD`.
    pub pin: String,
    pub status: LobbyStatus,
    pub player_count: usize,
    pub companies: Vec<CompanySummary>,
    pub rankings: CompanyRankings,
    pub top_performers: Vec<TopPerformer>,
    pub active_disturbances: Vec<Disturbance>,
    pub active_market_events: Vec<MarketEvent>,
    /// Newest first.
    pub recent_activities: Vec<ActivityEntry>,
}

pub fn build_dashboard(lobby: &Lobby) -> TeacherDashboard {
    let companies = lobby
        .companies
        .iter()
        .map(|c| CompanySummary {
            id: c.id.clone(),
            name: c.name.clone(),
            balance: c.balance,
            experience: c.experience,
            reputation: c.reputation,
            stats: c.stats.clone(),
            employee_count: c.employees.len(),
        })
        .collect();

    let standings: Vec<_> = lobby.companies.iter().map(|c| c.standing()).collect();

    let mut ranked: Vec<_> = lobby.sessions.iter().collect();
    // Stable: equal XP keeps join order
    ranked.sort_by(|a, b| b.experience.cmp(&a.experience));
    let top_performers = ranked
        .into_iter()
        .take(TOP_PERFORMERS)
        .map(|s| TopPerformer {
            session_id: s.id.clone(),
            display_name: s.display_name.clone(),
            company_name: s
                .company_id
                .as_deref()
                .and_then(|id| lobby.company(id).ok())
                .map(|c| c.name.clone()),
            experience: s.experience,
            level: s.level,
            recent_achievements: s
                .badges
                .iter()
                .rev()
                .take(RECENT_ACHIEVEMENTS)
                .map(|id| find_badge(id).map_or_else(|| id.clone(), |b| b.name.to_string()))
                .collect(),
        })
        .collect();

    TeacherDashboard {
        lobby_id: lobby.id.clone(),
        lobby_name: lobby.name.clone(),
        pin: format_pin(&lobby.pin),
        status: lobby.status,
        player_count: lobby.sessions.len(),
        companies,
        rankings: rank_companies(&standings),
        top_performers,
        active_disturbances: lobby.open_disturbances().cloned().collect(),
        active_market_events: lobby.active_market_events().cloned().collect(),
        recent_activities: lobby
            .activity
            .iter()
            .rev()
            .take(RECENT_ACTIVITIES)
            .cloned()
            .collect(),
    }
}
