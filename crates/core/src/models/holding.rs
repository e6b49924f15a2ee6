use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::instrument::{FixedIncomeClass, Liquidity, RateIndex, VariableIncomeClass};
use crate::errors::CoreError;

/// A market-quoted position (stock, real-estate fund, ETF, BDR).
///
/// Only quantity and average cost are stored; price-derived figures live on
/// [`ValuedVariableHolding`](super::valuation::ValuedVariableHolding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableIncomeHolding {
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "PETR4", "HGLG11")
    pub ticker: String,

    pub class: VariableIncomeClass,

    /// Units held (>= 0)
    pub quantity: f64,

    /// Average acquisition cost per unit (>= 0)
    pub average_cost: f64,

    pub purchase_date: Option<NaiveDate>,
    pub broker: Option<String>,
    pub sector: Option<String>,
}

impl VariableIncomeHolding {
    pub fn new(
        ticker: impl Into<String>,
        class: VariableIncomeClass,
        quantity: f64,
        average_cost: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticker: ticker.into().trim().to_uppercase(),
            class,
            quantity,
            average_cost,
            purchase_date: None,
            broker: None,
            sector: None,
        }
    }

    /// Amount paid for the position: `quantity × average_cost`.
    pub fn invested_value(&self) -> f64 {
        self.quantity * self.average_cost
    }

    /// Reject records that would poison the aggregates
    /// (empty ticker, negative or non-finite quantity/cost).
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.ticker.trim().is_empty() {
            return Err(CoreError::ValidationError(format!(
                "Holding {} has an empty ticker",
                self.id
            )));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Holding {} has invalid quantity {}",
                self.ticker, self.quantity
            )));
        }
        if !self.average_cost.is_finite() || self.average_cost < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Holding {} has invalid average cost {}",
                self.ticker, self.average_cost
            )));
        }
        Ok(())
    }
}

/// A fixed-income position (CDB, treasury bond, debenture, ...).
///
/// `current_amount` is maintained by the user; there is no live quote for
/// these instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIncomeHolding {
    pub id: Uuid,
    pub name: String,
    pub class: FixedIncomeClass,
    pub institution: Option<String>,
    pub invested_amount: f64,
    pub current_amount: f64,

    /// Contracted rate, interpreted against `rate_index`
    pub rate: f64,
    pub rate_index: Option<RateIndex>,

    pub application_date: Option<NaiveDate>,
    pub maturity_date: Option<NaiveDate>,
    pub liquidity: Option<Liquidity>,
    pub grace_days: Option<u32>,
}

impl FixedIncomeHolding {
    pub fn new(
        name: impl Into<String>,
        class: FixedIncomeClass,
        invested_amount: f64,
        current_amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            class,
            institution: None,
            invested_amount,
            current_amount,
            rate: 0.0,
            rate_index: None,
            application_date: None,
            maturity_date: None,
            liquidity: None,
            grace_days: None,
        }
    }

    pub fn with_maturity(mut self, maturity: NaiveDate) -> Self {
        self.maturity_date = Some(maturity);
        self
    }

    pub fn with_rate(mut self, rate: f64, index: RateIndex) -> Self {
        self.rate = rate;
        self.rate_index = Some(index);
        self
    }

    /// Human-readable rate, e.g. "110% CDI" or "6.2% a.a. IPCA+".
    pub fn rate_display(&self) -> String {
        match self.rate_index {
            Some(RateIndex::Cdi) => format!("{}% CDI", self.rate),
            Some(RateIndex::Selic) => format!("{}% Selic", self.rate),
            Some(RateIndex::Savings) => RateIndex::Savings.label().to_string(),
            Some(index) => format!("{}{} {}", self.rate, index.rate_suffix(), index.label()),
            None => format!("{}%", self.rate),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.invested_amount.is_finite() || self.invested_amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Investment '{}' has invalid invested amount {}",
                self.name, self.invested_amount
            )));
        }
        if !self.current_amount.is_finite() || self.current_amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Investment '{}' has invalid current amount {}",
                self.name, self.current_amount
            )));
        }
        Ok(())
    }
}
