use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Portfolio market value at the close of one day, with the external flows
/// booked that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    pub date: NaiveDate,
    pub market_value: f64,

    #[serde(default)]
    pub contributions: f64,

    #[serde(default)]
    pub withdrawals: f64,

    #[serde(default)]
    pub dividends: f64,
}

impl ValuationPoint {
    pub fn new(date: NaiveDate, market_value: f64) -> Self {
        Self {
            date,
            market_value,
            contributions: 0.0,
            withdrawals: 0.0,
            dividends: 0.0,
        }
    }

    pub fn with_contribution(mut self, amount: f64) -> Self {
        self.contributions = amount;
        self
    }

    pub fn with_withdrawal(mut self, amount: f64) -> Self {
        self.withdrawals = amount;
        self
    }

    pub fn with_dividends(mut self, amount: f64) -> Self {
        self.dividends = amount;
        self
    }

    /// Flow removed from the day's change before computing a return:
    /// contributions minus withdrawals plus dividends.
    pub fn net_flow(&self) -> f64 {
        self.contributions - self.withdrawals + self.dividends
    }

    /// The same flow seen from the investor's pocket, for IRR:
    /// money put in is negative, money taken out positive.
    pub fn investor_flow(&self) -> f64 {
        -self.contributions + self.withdrawals + self.dividends
    }
}

/// A dated cash flow. Negative = money invested, positive = money received.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedCashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl DatedCashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Outcome of the IRR solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrResult {
    /// Annualized rate (0.12 = 12% a year)
    pub rate: f64,
    pub converged: bool,
    pub iterations: u32,
}

/// Return and risk figures for a valuation series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Time-weighted return over the whole series
    pub twr: f64,

    /// Money-weighted annual return
    pub irr: f64,
    pub irr_converged: bool,

    /// Annualized standard deviation of daily returns
    pub volatility: f64,

    /// Deepest peak-to-trough fall, as a non-positive fraction
    pub max_drawdown: f64,

    pub sharpe: f64,
}
