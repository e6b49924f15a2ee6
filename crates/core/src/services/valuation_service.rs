use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::warn;

use crate::models::holding::{FixedIncomeHolding, VariableIncomeHolding};
use crate::models::quote::{Quote, QuoteSet};
use crate::models::valuation::{
    FallbackReason, PriceSource, ValuedFixedHolding, ValuedVariableHolding,
};
use crate::services::ratios::percent_of;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Turns stored holdings into valued holdings. Pure; no I/O.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value a variable-income holding against an optional quote.
    ///
    /// A missing quote, or one priced at zero, substitutes the average cost,
    /// so current value equals invested value and the gain is 0.
    pub fn value_variable(
        &self,
        holding: &VariableIncomeHolding,
        quote: Option<&Quote>,
    ) -> ValuedVariableHolding {
        let live = quote.filter(|q| q.price > 0.0 && q.price.is_finite());
        let source = if live.is_some() {
            PriceSource::Live
        } else {
            PriceSource::Fallback(FallbackReason::NoMarketData)
        };
        self.value_variable_with_source(holding, live, source)
    }

    /// Value a holding against a gateway result, distinguishing "no data
    /// for this ticker" from "quote service unreachable".
    pub fn value_variable_from_set(
        &self,
        holding: &VariableIncomeHolding,
        quotes: &QuoteSet,
    ) -> ValuedVariableHolding {
        let quote = quotes.get(&holding.ticker);
        let mut valued = self.value_variable(holding, quote);
        if quote.is_none() && quotes.upstream_failed() {
            valued.price_source = PriceSource::Fallback(FallbackReason::QuoteUnavailable);
        }
        valued
    }

    pub fn value_variable_all(
        &self,
        holdings: &[VariableIncomeHolding],
        quotes: &QuoteSet,
    ) -> Vec<ValuedVariableHolding> {
        holdings
            .iter()
            .map(|h| self.value_variable_from_set(h, quotes))
            .collect()
    }

    /// Value a fixed-income holding. The stored current amount is the
    /// current value; `now` only feeds days-to-maturity.
    pub fn value_fixed(&self, holding: &FixedIncomeHolding, now: DateTime<Utc>) -> ValuedFixedHolding {
        let invested_value = holding.invested_amount;
        let current_value = holding.current_amount;
        let gain = current_value - invested_value;

        ValuedFixedHolding {
            holding: holding.clone(),
            invested_value,
            current_value,
            gain,
            gain_percent: percent_of(gain, invested_value),
            days_to_maturity: holding.maturity_date.map(|m| days_to_maturity(m, now)),
        }
    }

    pub fn value_fixed_all(
        &self,
        holdings: &[FixedIncomeHolding],
        now: DateTime<Utc>,
    ) -> Vec<ValuedFixedHolding> {
        holdings.iter().map(|h| self.value_fixed(h, now)).collect()
    }

    fn value_variable_with_source(
        &self,
        holding: &VariableIncomeHolding,
        quote: Option<&Quote>,
        price_source: PriceSource,
    ) -> ValuedVariableHolding {
        if holding.quantity < 0.0 || holding.average_cost < 0.0 {
            warn!("Valuing holding {} with negative quantity or cost", holding.ticker);
        }

        let current_price = quote.map_or(holding.average_cost, |q| q.price);
        let invested_value = holding.invested_value();
        let current_value = holding.quantity * current_price;
        let gain = current_value - invested_value;

        ValuedVariableHolding {
            holding: holding.clone(),
            current_price,
            day_change_percent: quote
                .map(|q| q.change_percent)
                .filter(|c| c.is_finite())
                .unwrap_or(0.0),
            invested_value,
            current_value,
            gain,
            gain_percent: percent_of(gain, invested_value),
            price_source,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole days from `now` until midnight UTC of `maturity`, rounded up.
/// Negative once the maturity date has passed.
pub fn days_to_maturity(maturity: NaiveDate, now: DateTime<Utc>) -> i64 {
    let maturity_start = maturity.and_time(NaiveTime::MIN).and_utc();
    let millis = (maturity_start - now).num_milliseconds() as f64;
    let days = (millis / MILLIS_PER_DAY).ceil();
    // ceil() of a small negative fraction is -0.0
    if days == 0.0 {
        0
    } else {
        days as i64
    }
}
