use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analytics::AllocationSlice;

/// A savings "box": a named balance set aside outside the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsBox {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,

    /// Goal this box is earmarked for, if any
    pub goal_id: Option<Uuid>,
}

impl SavingsBox {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance,
            goal_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalKind {
    #[serde(rename = "sonho")]
    Dream,
    #[serde(rename = "reserva")]
    Reserve,
    #[serde(rename = "projeto")]
    Project,
    /// The emergency fund is stored as a goal of this kind.
    #[serde(rename = "emergencia")]
    Emergency,
}

/// A savings goal with a target and the amount accumulated so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub kind: GoalKind,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<NaiveDate>,
}

impl Goal {
    pub fn new(name: impl Into<String>, kind: GoalKind, target_amount: f64, current_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            target_amount,
            current_amount,
            deadline: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// The four buckets that make up total patrimony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetWorthBucket {
    VariableIncome,
    FixedIncome,
    SavingsBoxes,
    Goals,
}

impl NetWorthBucket {
    pub const ALL: [NetWorthBucket; 4] = [
        Self::VariableIncome,
        Self::FixedIncome,
        Self::SavingsBoxes,
        Self::Goals,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::VariableIncome => "variable_income",
            Self::FixedIncome => "fixed_income",
            Self::SavingsBoxes => "savings_boxes",
            Self::Goals => "goals",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VariableIncome => "Renda Variável",
            Self::FixedIncome => "Renda Fixa",
            Self::SavingsBoxes => "Caixinhas",
            Self::Goals => "Objetivos",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::VariableIncome => "#3b82f6",
            Self::FixedIncome => "#10b981",
            Self::SavingsBoxes => "#f59e0b",
            Self::Goals => "#8b5cf6",
        }
    }
}

/// Total patrimony and its split across buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetWorthBreakdown {
    pub total: f64,
    pub variable_income: f64,
    pub fixed_income: f64,
    pub savings_boxes: f64,
    pub goals: f64,

    /// Non-zero buckets only, in bucket order
    pub allocation: Vec<AllocationSlice>,
}

impl NetWorthBreakdown {
    pub fn value_of(&self, bucket: NetWorthBucket) -> f64 {
        match bucket {
            NetWorthBucket::VariableIncome => self.variable_income,
            NetWorthBucket::FixedIncome => self.fixed_income,
            NetWorthBucket::SavingsBoxes => self.savings_boxes,
            NetWorthBucket::Goals => self.goals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: Uuid,
    pub name: String,

    /// current / target × 100, capped at 100
    pub progress_percent: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalsOverview {
    pub total_target: f64,
    pub total_saved: f64,
    pub progress_percent: f64,
    pub completed_count: usize,
    pub goals: Vec<GoalProgress>,
}
