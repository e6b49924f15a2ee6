use serde::{Deserialize, Serialize};

/// One slice of an allocation chart (instrument class or net-worth bucket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Raw grouping key (e.g., "acao", "cdb", "savings_boxes")
    pub key: String,

    pub label: String,
    pub color: String,

    /// Summed current value of the slice
    pub value: f64,

    /// Share of the slice in its chart (0 when the chart total is 0)
    pub percent: f64,
}

/// A holding's position in a "top N" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHolding {
    /// 1-based rank
    pub rank: usize,

    /// Ticker for variable income, name for fixed income
    pub name: String,

    pub class_key: String,
    pub current_value: f64,

    /// current_value / reference total × 100
    pub portfolio_percent: f64,
}

/// Totals for one instrument family (variable or fixed income).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilySummary {
    pub holding_count: usize,
    pub total_invested: f64,
    pub total_current: f64,

    /// total_current − total_invested
    pub total_gain: f64,

    /// (total_gain / total_invested) × 100, 0 when nothing is invested
    pub total_gain_percent: f64,

    /// Current value by instrument class, zero-value classes omitted,
    /// in order of first appearance
    pub allocation: Vec<AllocationSlice>,

    /// Highest current values first, ties in input order
    pub top_holdings: Vec<RankedHolding>,
}

/// Portfolio-level view across both families.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub variable_income: FamilySummary,
    pub fixed_income: FamilySummary,

    pub total_invested: f64,
    pub total_current: f64,
    pub total_gain: f64,
    pub total_gain_percent: f64,
}

impl PortfolioSummary {
    /// Number of holdings across both families.
    pub fn holding_count(&self) -> usize {
        self.variable_income.holding_count + self.fixed_income.holding_count
    }
}
