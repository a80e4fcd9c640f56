//! Experience points, levels, and badges.
//!
//! # Level Curve
//!
//! Level `n` needs `floor(100 × 1.5^(n-1))` XP to complete: 100, 150, 225,
//! 337, ... XP is cumulative, so a player with 250 XP has finished level 1
//! (100) and level 2 (150) and sits at the start of level 3.
//!
//! ```
//! use ecosim_logic::experience::{level_from_xp, level_threshold};
//!
//! assert_eq!(level_threshold(1), 100);
//! assert_eq!(level_from_xp(99), 1);
//! assert_eq!(level_from_xp(100), 2);
//! assert_eq!(level_from_xp(250), 3);
//! ```
//!
//! # Badges
//!
//! Badges compare one already-tallied statistic against a threshold. The
//! engine never counts anything itself; callers pass the statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// XP needed to complete `level`. Levels start at 1; 0 is treated as 1.
pub fn level_threshold(level: u32) -> u64 {
    // `as` saturates, so very high levels cap at u64::MAX
    (100.0 * 1.5f64.powf(f64::from(level.max(1)) - 1.0)).floor() as u64
}

/// Level reached with `xp` cumulative experience points.
pub fn level_from_xp(xp: u64) -> u32 {
    let mut level = 1;
    let mut completed = 0u64;
    loop {
        let next = completed.saturating_add(level_threshold(level));
        if xp < next || next == u64::MAX {
            return level;
        }
        completed = next;
        level += 1;
    }
}

/// Total XP needed to reach `level` from zero.
pub fn cumulative_xp_for_level(level: u32) -> u64 {
    (1..level).fold(0u64, |acc, l| acc.saturating_add(level_threshold(l)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub current_level: u32,
    pub next_level: u32,
    /// XP earned inside the current level.
    pub current_xp: u64,
    /// XP the current level takes to complete.
    pub required_xp: u64,
    /// Completion of the current level, rounded to whole percent.
    pub percentage: u32,
}

pub fn progress_to_next_level(xp: u64) -> LevelProgress {
    let current_level = level_from_xp(xp);
    let required_xp = level_threshold(current_level);
    let current_xp = xp.saturating_sub(cumulative_xp_for_level(current_level));
    let percentage = (current_xp as f64 / required_xp as f64 * 100.0).round() as u32;

    LevelProgress {
        current_level,
        next_level: current_level + 1,
        current_xp,
        required_xp,
        percentage,
    }
}

// ============================================================================
// XP REWARDS
// ============================================================================

/// Actions that earn experience points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpReward {
    // Purchasing
    InquiryCreated,
    OffersCompared,
    PurchaseOrderCorrect,
    GoodsReceiptChecked,
    InvoiceCheckedCorrectly,
    ProcurementCalculationCorrect,
    // Sales
    CustomerInquiryHandled,
    QuoteCreated,
    OrderConfirmationCorrect,
    DeliveryNoteCreated,
    InvoiceCreated,
    TradeCalculationCorrect,
    // Bookkeeping
    BookingEntryCorrect,
    VoucherAssignedCorrectly,
    InvoiceErrorFound,
    // Contract disruptions
    DunningLetterCorrect,
    ComplaintHandled,
    DeliveryDelayHandled,
    // Controlling
    ContributionMarginCalculated,
    BreakEvenDetermined,
    KeyFiguresAnalyzed,
    // Exams
    ExamPassed,
    PerfectExam,
}

impl XpReward {
    pub const ALL: [XpReward; 23] = [
        XpReward::InquiryCreated,
        XpReward::OffersCompared,
        XpReward::PurchaseOrderCorrect,
        XpReward::GoodsReceiptChecked,
        XpReward::InvoiceCheckedCorrectly,
        XpReward::ProcurementCalculationCorrect,
        XpReward::CustomerInquiryHandled,
        XpReward::QuoteCreated,
        XpReward::OrderConfirmationCorrect,
        XpReward::DeliveryNoteCreated,
        XpReward::InvoiceCreated,
        XpReward::TradeCalculationCorrect,
        XpReward::BookingEntryCorrect,
        XpReward::VoucherAssignedCorrectly,
        XpReward::InvoiceErrorFound,
        XpReward::DunningLetterCorrect,
        XpReward::ComplaintHandled,
        XpReward::DeliveryDelayHandled,
        XpReward::ContributionMarginCalculated,
        XpReward::BreakEvenDetermined,
        XpReward::KeyFiguresAnalyzed,
        XpReward::ExamPassed,
        XpReward::PerfectExam,
    ];

    pub fn xp(self) -> u64 {
        match self {
            XpReward::InquiryCreated => 5,
            XpReward::OffersCompared => 10,
            XpReward::PurchaseOrderCorrect => 15,
            XpReward::GoodsReceiptChecked => 10,
            XpReward::InvoiceCheckedCorrectly => 20,
            XpReward::ProcurementCalculationCorrect => 25,
            XpReward::CustomerInquiryHandled => 5,
            XpReward::QuoteCreated => 10,
            XpReward::OrderConfirmationCorrect => 15,
            XpReward::DeliveryNoteCreated => 10,
            XpReward::InvoiceCreated => 15,
            XpReward::TradeCalculationCorrect => 25,
            XpReward::BookingEntryCorrect => 15,
            XpReward::VoucherAssignedCorrectly => 20,
            XpReward::InvoiceErrorFound => 25,
            XpReward::DunningLetterCorrect => 30,
            XpReward::ComplaintHandled => 25,
            XpReward::DeliveryDelayHandled => 20,
            XpReward::ContributionMarginCalculated => 30,
            XpReward::BreakEvenDetermined => 35,
            XpReward::KeyFiguresAnalyzed => 20,
            XpReward::ExamPassed => 50,
            XpReward::PerfectExam => 100,
        }
    }
}

// ============================================================================
// BADGES
// ============================================================================

/// Tallied per-player statistics a badge can be tied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    PurchaseCount,
    SalesCount,
    BookingCount,
    PerfectCalculations,
    ErrorsFound,
    DunningCount,
    Level,
    PerfectExams,
}

/// Player statistics by key. Missing keys count as zero.
pub type PlayerStats = BTreeMap<StatKey, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeRequirement {
    pub stat: StatKey,
    pub threshold: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: BadgeRequirement,
}

const fn badge(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    stat: StatKey,
    threshold: u64,
) -> Badge {
    Badge {
        id,
        name,
        description,
        requirement: BadgeRequirement { stat, threshold },
    }
}

/// Every badge a player can earn.
pub const BADGES: [Badge; 11] = [
    badge("einkauf_rookie", "Einkauf Rookie", "10 erfolgreiche Bestellungen", StatKey::PurchaseCount, 10),
    badge("einkauf_pro", "Einkauf Profi", "50 erfolgreiche Bestellungen", StatKey::PurchaseCount, 50),
    badge("verkauf_rookie", "Verkauf Rookie", "10 erfolgreiche Verkäufe", StatKey::SalesCount, 10),
    badge("verkauf_pro", "Verkauf Profi", "50 erfolgreiche Verkäufe", StatKey::SalesCount, 50),
    badge("buchungsmeister", "Buchungsmeister", "100 korrekte Buchungssätze", StatKey::BookingCount, 100),
    badge("kalkulations_genie", "Kalkulationsgenie", "25 perfekte Kalkulationen", StatKey::PerfectCalculations, 25),
    badge("fehlerdetektiv", "Fehler-Detektiv", "20 Fehler in Rechnungen gefunden", StatKey::ErrorsFound, 20),
    badge("mahnungsprofi", "Mahnungsprofi", "15 korrekte Mahnungen geschrieben", StatKey::DunningCount, 15),
    badge("level_10", "Level 10 erreicht", "Erreiche Level 10", StatKey::Level, 10),
    badge("level_25", "Level 25 erreicht", "Erreiche Level 25", StatKey::Level, 25),
    badge("perfektionist", "Perfektionist", "Prüfung mit 100% bestanden", StatKey::PerfectExams, 1),
];

pub fn find_badge(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

pub fn is_badge_earned(badge: &Badge, stats: &PlayerStats) -> bool {
    let value = stats.get(&badge.requirement.stat).copied().unwrap_or(0);
    value >= badge.requirement.threshold
}

/// All badges the statistics qualify for, in catalog order.
pub fn earned_badges(stats: &PlayerStats) -> Vec<&'static Badge> {
    BADGES.iter().filter(|b| is_badge_earned(b, stats)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(level_threshold(1), 100);
        assert_eq!(level_threshold(2), 150);
        assert_eq!(level_threshold(3), 225);
        assert_eq!(level_threshold(4), 337);
        assert_eq!(level_threshold(5), 506);
    }

    #[test]
    fn test_threshold_monotonic() {
        for level in 1..60 {
            assert!(
                level_threshold(level + 1) > level_threshold(level),
                "threshold must grow at level {}",
                level
            );
        }
    }

    #[test]
    fn test_threshold_extreme_levels() {
        assert_eq!(level_threshold(0), level_threshold(1));
        assert_eq!(level_threshold(1 << 31), u64::MAX);
        assert_eq!(level_threshold(4_000_000_000), u64::MAX);
        assert_eq!(level_threshold(u32::MAX), u64::MAX);
        // Growth holds until the curve saturates, then it stays flat
        for level in [100, 1000, 1 << 31, u32::MAX - 1] {
            assert!(level_threshold(level + 1) >= level_threshold(level));
        }
    }

    #[test]
    fn test_level_from_xp_boundaries() {
        assert_eq!(level_from_xp(0), 1);
        assert_eq!(level_from_xp(99), 1);
        assert_eq!(level_from_xp(100), 2);
        assert_eq!(level_from_xp(249), 2);
        assert_eq!(level_from_xp(250), 3);
        assert_eq!(level_from_xp(474), 3);
        assert_eq!(level_from_xp(475), 4);
    }

    #[test]
    fn test_level_from_xp_terminates_at_extremes() {
        let level = level_from_xp(u64::MAX);
        assert!(level > 90);
    }

    #[test]
    fn test_cumulative_xp() {
        assert_eq!(cumulative_xp_for_level(1), 0);
        assert_eq!(cumulative_xp_for_level(2), 100);
        assert_eq!(cumulative_xp_for_level(3), 250);
        for level in 1..30 {
            assert_eq!(level_from_xp(cumulative_xp_for_level(level)), level);
        }
    }

    #[test]
    fn test_progress_at_start() {
        let p = progress_to_next_level(0);
        assert_eq!(p.current_level, 1);
        assert_eq!(p.next_level, 2);
        assert_eq!(p.current_xp, 0);
        assert_eq!(p.required_xp, 100);
        assert_eq!(p.percentage, 0);
    }

    #[test]
    fn test_progress_mid_level() {
        // 100 XP into level 2 (needs 150)
        let p = progress_to_next_level(200);
        assert_eq!(p.current_level, 2);
        assert_eq!(p.current_xp, 100);
        assert_eq!(p.required_xp, 150);
        assert_eq!(p.percentage, 67);
    }

    #[test]
    fn test_reward_values() {
        assert_eq!(XpReward::ProcurementCalculationCorrect.xp(), 25);
        assert_eq!(XpReward::BreakEvenDetermined.xp(), 35);
        assert_eq!(XpReward::PerfectExam.xp(), 100);
        assert!(XpReward::ALL.iter().all(|r| r.xp() >= 5));
    }

    #[test]
    fn test_badge_missing_stat_counts_as_zero() {
        let stats = PlayerStats::new();
        let rookie = find_badge("einkauf_rookie").unwrap();
        assert!(!is_badge_earned(rookie, &stats));
        assert!(earned_badges(&stats).is_empty());
    }

    #[test]
    fn test_badge_threshold_inclusive() {
        let mut stats = PlayerStats::new();
        stats.insert(StatKey::PurchaseCount, 10);
        let rookie = find_badge("einkauf_rookie").unwrap();
        let pro = find_badge("einkauf_pro").unwrap();
        assert!(is_badge_earned(rookie, &stats));
        assert!(!is_badge_earned(pro, &stats));
    }

    #[test]
    fn test_earned_badges_across_stats() {
        let mut stats = PlayerStats::new();
        stats.insert(StatKey::Level, 12);
        stats.insert(StatKey::PerfectExams, 1);
        let ids: Vec<_> = earned_badges(&stats).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["level_10", "perfektionist"]);
    }

    #[test]
    fn test_badge_ids_unique() {
        for (i, a) in BADGES.iter().enumerate() {
            for b in &BADGES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
