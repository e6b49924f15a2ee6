use serde::{Deserialize, Serialize};

use super::analytics::PortfolioSummary;
use super::cash_flow::BudgetOverview;
use super::net_worth::{GoalsOverview, NetWorthBreakdown};
use super::reserve::{BurnRate, ReserveStatus};
use super::valuation::{ValuedFixedHolding, ValuedVariableHolding};

/// Everything the wallet/investment pages render after one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOverview {
    pub variable_holdings: Vec<ValuedVariableHolding>,
    pub fixed_holdings: Vec<ValuedFixedHolding>,
    pub summary: PortfolioSummary,
    pub net_worth: NetWorthBreakdown,
    pub goals: GoalsOverview,

    /// Nearest future maturities, soonest first
    pub upcoming_maturities: Vec<ValuedFixedHolding>,

    /// True when the quote service could not be reached and some prices
    /// are last-known or average-cost fallbacks
    pub quotes_degraded: bool,
}

/// Emergency-fund page data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveReport {
    pub burn_rate: BurnRate,
    pub status: ReserveStatus,
}

/// Budget page data for one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub budgets: BudgetOverview,

    /// Credit-card spend against the combined card limit
    pub card_limit_usage: f64,
}
