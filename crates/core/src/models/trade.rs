use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::instrument::VariableIncomeClass;
use crate::errors::CoreError;

/// Direction of a brokerage trade. Serialized as the broker-note letters
/// "C" (compra) and "V" (venda).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    #[serde(rename = "C")]
    Buy,
    #[serde(rename = "V")]
    Sell,
}

/// One executed buy or sell of a variable-income ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,

    /// Ticker symbol, uppercased
    pub ticker: String,

    pub side: TradeSide,

    /// Units traded (> 0)
    pub quantity: f64,

    /// Unit price (>= 0)
    pub price: f64,

    /// Brokerage fees and exchange charges for the whole trade (>= 0)
    #[serde(default)]
    pub fees: f64,
}

impl Trade {
    pub fn new(
        date: NaiveDate,
        ticker: impl Into<String>,
        side: TradeSide,
        quantity: f64,
        price: f64,
    ) -> Self {
        Self {
            date,
            ticker: ticker.into().trim().to_uppercase(),
            side,
            quantity,
            price,
            fees: 0.0,
        }
    }

    pub fn with_fees(mut self, fees: f64) -> Self {
        self.fees = fees;
        self
    }

    /// `quantity × price`, before fees.
    pub fn gross_value(&self) -> f64 {
        self.quantity * self.price
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.ticker.trim().is_empty() {
            return Err(CoreError::ValidationError(format!(
                "Trade on {} has an empty ticker",
                self.date
            )));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Trade {} on {} has invalid quantity {}",
                self.ticker, self.date, self.quantity
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Trade {} on {} has invalid price {}",
                self.ticker, self.date, self.price
            )));
        }
        if !self.fees.is_finite() || self.fees < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Trade {} on {} has invalid fees {}",
                self.ticker, self.date, self.fees
            )));
        }
        Ok(())
    }
}

/// Gain or loss realized by one sell, matched FIFO against earlier buys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizedGain {
    /// "YYYY-MM" of the sell
    pub month: String,
    pub date: NaiveDate,
    pub ticker: String,
    pub class: VariableIncomeClass,

    /// Sale value net of fees
    pub proceeds: f64,

    /// Acquisition cost of the units sold, buy fees included
    pub cost: f64,

    /// `proceeds - cost`
    pub realized: f64,
}

/// Monthly capital-gains figures for one asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalSummary {
    /// "YYYY-MM"
    pub month: String,
    pub class: VariableIncomeClass,

    /// Total sale value in the month
    pub proceeds: f64,

    /// Net realized result (losses offset gains within the month)
    pub profit: f64,

    /// Tax due on a positive profit
    pub tax: f64,

    /// True when the month's stock sales fall under the exemption limit
    pub exempt: bool,
}
