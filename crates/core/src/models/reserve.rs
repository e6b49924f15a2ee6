use serde::{Deserialize, Serialize};

use super::net_worth::{Goal, GoalKind};

/// Coverage milestones, in months of expenses.
pub const MILESTONE_MONTHS: [u32; 3] = [3, 6, 12];

/// The user's emergency-fund record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmergencyReserve {
    pub current_amount: f64,
    pub target_amount: f64,
}

impl EmergencyReserve {
    pub fn new(current_amount: f64, target_amount: f64) -> Self {
        Self {
            current_amount,
            target_amount,
        }
    }

    /// The first emergency-kind goal in `goals`, if any.
    pub fn from_goals(goals: &[Goal]) -> Option<Self> {
        goals
            .iter()
            .find(|g| g.kind == GoalKind::Emergency)
            .map(|g| Self::new(g.current_amount, g.target_amount))
    }
}

/// How many months of expenses the reserve covers, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReserveTier {
    /// Less than 3 months
    Critical,
    /// 3 months up to (not including) 6
    Warning,
    /// 6 months or more
    Safe,
}

impl std::fmt::Display for ReserveTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReserveTier::Critical => write!(f, "Critical"),
            ReserveTier::Warning => write!(f, "Warning"),
            ReserveTier::Safe => write!(f, "Safe"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub months: u32,

    /// monthly_expenses × months
    pub target: f64,

    /// Reserve balance against this milestone, capped at 100
    /// (always 0 when no reserve is configured)
    pub progress_percent: f64,
}

/// Outcome of evaluating the emergency fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReserveStatus {
    /// No reserve record yet; milestones are suggestions for setting one up.
    NotConfigured {
        monthly_expenses: f64,
        milestones: Vec<Milestone>,
    },
    Configured {
        monthly_expenses: f64,
        months_covered: f64,
        tier: ReserveTier,

        /// current / target × 100, capped at 100
        progress_percent: f64,
        milestones: Vec<Milestone>,
    },
}

impl ReserveStatus {
    pub fn tier(&self) -> Option<ReserveTier> {
        match self {
            ReserveStatus::NotConfigured { .. } => None,
            ReserveStatus::Configured { tier, .. } => Some(*tier),
        }
    }

    pub fn milestones(&self) -> &[Milestone] {
        match self {
            ReserveStatus::NotConfigured { milestones, .. }
            | ReserveStatus::Configured { milestones, .. } => milestones,
        }
    }

    pub fn monthly_expenses(&self) -> f64 {
        match self {
            ReserveStatus::NotConfigured { monthly_expenses, .. }
            | ReserveStatus::Configured { monthly_expenses, .. } => *monthly_expenses,
        }
    }
}

/// Monthly burn rate used by the evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BurnRate {
    /// Every expense in the month
    pub total: f64,

    /// Recurring expenses only
    pub recurring: f64,
}
