use serde::{Deserialize, Serialize};

use super::holding::{FixedIncomeHolding, VariableIncomeHolding};
use super::instrument::{FixedIncomeClass, InstrumentClass, VariableIncomeClass};

/// Why a variable-income holding was priced at its average cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// The quote service answered but had nothing for this ticker.
    NoMarketData,
    /// The quote service could not be reached.
    QuoteUnavailable,
}

/// Where the unit price behind a valuation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// Market quote.
    Live,
    /// Average acquisition cost substituted for a missing quote.
    Fallback(FallbackReason),
}

/// A variable-income holding with its price-derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedVariableHolding {
    pub holding: VariableIncomeHolding,

    /// Quote price, or the average cost when no quote was available
    pub current_price: f64,

    /// Percent change since previous close (0 without a quote)
    pub day_change_percent: f64,

    pub invested_value: f64,
    pub current_value: f64,
    pub gain: f64,
    pub gain_percent: f64,
    pub price_source: PriceSource,
}

/// A fixed-income holding with its derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedFixedHolding {
    pub holding: FixedIncomeHolding,
    pub invested_value: f64,
    pub current_value: f64,
    pub gain: f64,
    pub gain_percent: f64,

    /// Days until maturity (ceiling); `None` without a maturity date
    pub days_to_maturity: Option<i64>,
}

/// Shared read access used by the aggregator to treat both families alike.
pub trait ValuedPosition {
    type Class: InstrumentClass;

    fn class(&self) -> &Self::Class;
    fn display_name(&self) -> &str;
    fn invested_value(&self) -> f64;
    fn current_value(&self) -> f64;
}

impl ValuedPosition for ValuedVariableHolding {
    type Class = VariableIncomeClass;

    fn class(&self) -> &VariableIncomeClass {
        &self.holding.class
    }

    fn display_name(&self) -> &str {
        &self.holding.ticker
    }

    fn invested_value(&self) -> f64 {
        self.invested_value
    }

    fn current_value(&self) -> f64 {
        self.current_value
    }
}

impl ValuedPosition for ValuedFixedHolding {
    type Class = FixedIncomeClass;

    fn class(&self) -> &FixedIncomeClass {
        &self.holding.class
    }

    fn display_name(&self) -> &str {
        &self.holding.name
    }

    fn invested_value(&self) -> f64 {
        self.invested_value
    }

    fn current_value(&self) -> f64 {
        self.current_value
    }
}
