use crate::models::analytics::{AllocationSlice, PortfolioSummary};
use crate::models::net_worth::{
    Goal, GoalProgress, GoalsOverview, NetWorthBreakdown, NetWorthBucket, SavingsBox,
};
use crate::services::ratios::{capped_percent, percent_of};

/// Combines portfolio totals with the non-market buckets
/// (savings boxes, goals) into total patrimony.
pub struct NetWorthService;

impl NetWorthService {
    pub fn new() -> Self {
        Self
    }

    pub fn compose_net_worth(
        &self,
        portfolio: &PortfolioSummary,
        savings_total: f64,
        goals_total: f64,
    ) -> NetWorthBreakdown {
        let mut breakdown = NetWorthBreakdown {
            total: portfolio.total_current + savings_total + goals_total,
            variable_income: portfolio.variable_income.total_current,
            fixed_income: portfolio.fixed_income.total_current,
            savings_boxes: savings_total,
            goals: goals_total,
            allocation: Vec::new(),
        };

        breakdown.allocation = NetWorthBucket::ALL
            .iter()
            .map(|bucket| (bucket, breakdown.value_of(*bucket)))
            .filter(|(_, value)| *value > 0.0)
            .map(|(bucket, value)| AllocationSlice {
                key: bucket.key().to_string(),
                label: bucket.label().to_string(),
                color: bucket.color().to_string(),
                value,
                percent: percent_of(value, breakdown.total),
            })
            .collect();

        breakdown
    }

    /// Share of total patrimony held in `bucket` (0 when the total is 0).
    pub fn bucket_share(&self, breakdown: &NetWorthBreakdown, bucket: NetWorthBucket) -> f64 {
        percent_of(breakdown.value_of(bucket), breakdown.total)
    }

    pub fn goals_overview(&self, goals: &[Goal]) -> GoalsOverview {
        let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
        let total_saved = goals_total(goals);

        GoalsOverview {
            total_target,
            total_saved,
            progress_percent: percent_of(total_saved, total_target),
            completed_count: goals.iter().filter(|g| g.is_completed()).count(),
            goals: goals
                .iter()
                .map(|g| GoalProgress {
                    goal_id: g.id,
                    name: g.name.clone(),
                    progress_percent: capped_percent(g.current_amount, g.target_amount),
                    completed: g.is_completed(),
                })
                .collect(),
        }
    }
}

impl Default for NetWorthService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn savings_total(boxes: &[SavingsBox]) -> f64 {
    boxes.iter().map(|b| b.balance).sum()
}

pub fn goals_total(goals: &[Goal]) -> f64 {
    goals.iter().map(|g| g.current_amount).sum()
}
