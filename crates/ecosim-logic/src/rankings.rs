//! Company leaderboards for the teacher dashboard.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyStats {
    pub total_orders: u32,
    pub completed_orders: u32,
    pub failed_orders: u32,
    /// Share of wrong submissions, in percent.
    pub error_rate: f64,
    /// 0–100.
    pub customer_satisfaction: f64,
    pub revenue: f64,
    pub profit: f64,
}

impl CompanyStats {
    /// Fold one graded submission into the counters and error rate.
    pub fn record_submission(&mut self, correct: bool) {
        self.total_orders += 1;
        if correct {
            self.completed_orders += 1;
        } else {
            self.failed_orders += 1;
        }
        self.error_rate = f64::from(self.failed_orders) / f64::from(self.total_orders) * 100.0;
    }
}

/// The slice of a company that rankings look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyStanding {
    pub company_id: String,
    pub name: String,
    pub stats: CompanyStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRankings {
    pub by_profit: Vec<CompanyStanding>,
    /// Lowest error rate first.
    pub by_quality: Vec<CompanyStanding>,
    pub by_customer_satisfaction: Vec<CompanyStanding>,
    pub by_revenue: Vec<CompanyStanding>,
}

fn sorted_by(
    companies: &[CompanyStanding],
    cmp: impl Fn(&CompanyStanding, &CompanyStanding) -> Ordering,
) -> Vec<CompanyStanding> {
    let mut out = companies.to_vec();
    // Stable, so ties keep input order
    out.sort_by(cmp);
    out
}

pub fn rank_companies(companies: &[CompanyStanding]) -> CompanyRankings {
    CompanyRankings {
        by_profit: sorted_by(companies, |a, b| b.stats.profit.total_cmp(&a.stats.profit)),
        by_quality: sorted_by(companies, |a, b| {
            a.stats.error_rate.total_cmp(&b.stats.error_rate)
        }),
        by_customer_satisfaction: sorted_by(companies, |a, b| {
            b.stats
                .customer_satisfaction
                .total_cmp(&a.stats.customer_satisfaction)
        }),
        by_revenue: sorted_by(companies, |a, b| b.stats.revenue.total_cmp(&a.stats.revenue)),
    }
}
