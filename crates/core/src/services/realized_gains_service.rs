use log::warn;
use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::models::holding::VariableIncomeHolding;
use crate::models::instrument::{InstrumentClass, VariableIncomeClass};
use crate::models::trade::{FiscalSummary, RealizedGain, Trade, TradeSide};

/// Monthly stock sales up to this amount are exempt from capital-gains tax.
pub const STOCK_EXEMPTION_LIMIT: f64 = 20_000.0;

/// Rate on stock (and other non-fund) gains once the exemption is exceeded.
pub const STOCK_TAX_RATE: f64 = 0.15;

/// Rate on real-estate fund gains. No exemption applies.
pub const REAL_ESTATE_FUND_TAX_RATE: f64 = 0.20;

/// Remainders below this are treated as zero units.
const QUANTITY_EPSILON: f64 = 1e-12;

struct Lot {
    quantity: f64,
    unit_cost: f64,
}

/// Realized gains from a trade history, matched first-in first-out,
/// and their monthly tax summary.
pub struct RealizedGainsService;

impl RealizedGainsService {
    pub fn new() -> Self {
        Self
    }

    /// One [`RealizedGain`] per sell, grouped by ticker (alphabetical) and
    /// in date order within a ticker. Trades on the same day keep their
    /// input order. Invalid trades are skipped with a warning.
    ///
    /// `classes` maps uppercase tickers to their class; unknown tickers
    /// count as stocks.
    pub fn realized_gains(
        &self,
        trades: &[Trade],
        classes: &HashMap<String, VariableIncomeClass>,
    ) -> Vec<RealizedGain> {
        let mut by_ticker: BTreeMap<String, Vec<&Trade>> = BTreeMap::new();
        for trade in trades {
            if let Err(e) = trade.validate() {
                warn!("Skipping trade: {e}");
                continue;
            }
            by_ticker
                .entry(trade.ticker.trim().to_uppercase())
                .or_default()
                .push(trade);
        }

        let mut gains = Vec::new();
        for (ticker, mut history) in by_ticker {
            history.sort_by_key(|t| t.date);
            let class = classes
                .get(&ticker)
                .cloned()
                .unwrap_or(VariableIncomeClass::Stock);

            let mut lots: VecDeque<Lot> = VecDeque::new();
            for trade in history {
                match trade.side {
                    TradeSide::Buy => lots.push_back(Lot {
                        quantity: trade.quantity,
                        unit_cost: (trade.gross_value() + trade.fees) / trade.quantity,
                    }),
                    TradeSide::Sell => {
                        let cost = consume_fifo(&mut lots, trade.quantity, &ticker);
                        let proceeds = trade.gross_value() - trade.fees;
                        gains.push(RealizedGain {
                            month: trade.date.format("%Y-%m").to_string(),
                            date: trade.date,
                            ticker: ticker.clone(),
                            class: class.clone(),
                            proceeds,
                            cost,
                            realized: proceeds - cost,
                        });
                    }
                }
            }
        }
        gains
    }

    /// Realized gains summed per (month, class), sorted by month then class
    /// key, with the tax due on each.
    pub fn fiscal_summary(&self, gains: &[RealizedGain]) -> Vec<FiscalSummary> {
        let mut groups: BTreeMap<(String, String), FiscalSummary> = BTreeMap::new();
        for gain in gains {
            let entry = groups
                .entry((gain.month.clone(), gain.class.key().to_string()))
                .or_insert_with(|| FiscalSummary {
                    month: gain.month.clone(),
                    class: gain.class.clone(),
                    proceeds: 0.0,
                    profit: 0.0,
                    tax: 0.0,
                    exempt: false,
                });
            entry.proceeds += gain.proceeds;
            entry.profit += gain.realized;
        }

        groups
            .into_values()
            .map(|mut summary| {
                let (tax, exempt) = tax_due(&summary.class, summary.proceeds, summary.profit);
                summary.tax = tax;
                summary.exempt = exempt;
                summary
            })
            .collect()
    }
}

impl Default for RealizedGainsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Ticker → class lookup built from the stored holdings.
pub fn class_map(holdings: &[VariableIncomeHolding]) -> HashMap<String, VariableIncomeClass> {
    holdings
        .iter()
        .map(|h| (h.ticker.trim().to_uppercase(), h.class.clone()))
        .collect()
}

/// `(tax, exempt)` for one month of one class. Losses are never taxed.
pub fn tax_due(class: &VariableIncomeClass, proceeds: f64, profit: f64) -> (f64, bool) {
    let taxable = profit.max(0.0);
    match class {
        VariableIncomeClass::RealEstateFund => (taxable * REAL_ESTATE_FUND_TAX_RATE, false),
        _ if proceeds <= STOCK_EXEMPTION_LIMIT => (0.0, true),
        _ => (taxable * STOCK_TAX_RATE, false),
    }
}

/// Take `quantity` units from the oldest lots and return their cost.
/// Units sold beyond what the lots hold carry no cost.
fn consume_fifo(lots: &mut VecDeque<Lot>, quantity: f64, ticker: &str) -> f64 {
    let mut remaining = quantity;
    let mut cost = 0.0;
    while remaining > QUANTITY_EPSILON {
        let Some(lot) = lots.front_mut() else {
            warn!(
                "Sell of {quantity} {ticker} exceeds the units held by {remaining}; \
                 the excess is booked at zero cost"
            );
            break;
        };
        let take = lot.quantity.min(remaining);
        cost += take * lot.unit_cost;
        lot.quantity -= take;
        remaining -= take;
        if lot.quantity <= QUANTITY_EPSILON {
            lots.pop_front();
        }
    }
    cost
}
