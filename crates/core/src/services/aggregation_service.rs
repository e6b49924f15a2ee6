use crate::models::analytics::{AllocationSlice, FamilySummary, PortfolioSummary, RankedHolding};
use crate::models::instrument::InstrumentClass;
use crate::models::valuation::{ValuedFixedHolding, ValuedPosition};
use crate::services::ratios::percent_of;

/// Rolls valued holdings up into family and portfolio totals,
/// allocation-by-class slices and "top N" rankings.
pub struct AggregationService {
    top_n: usize,
}

impl AggregationService {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Portfolio summary across both families.
    ///
    /// Top-holding percentages are taken against the combined current
    /// value of both families; allocation slice percentages against the
    /// slice's own family.
    pub fn aggregate<V, F>(&self, variable: &[V], fixed: &[F]) -> PortfolioSummary
    where
        V: ValuedPosition,
        F: ValuedPosition,
    {
        let portfolio_current = total_current(variable) + total_current(fixed);

        let variable_income = self.summarize(variable, portfolio_current);
        let fixed_income = self.summarize(fixed, portfolio_current);

        let total_invested = variable_income.total_invested + fixed_income.total_invested;
        let total_current = variable_income.total_current + fixed_income.total_current;
        let total_gain = total_current - total_invested;

        PortfolioSummary {
            variable_income,
            fixed_income,
            total_invested,
            total_current,
            total_gain,
            total_gain_percent: percent_of(total_gain, total_invested),
        }
    }

    /// Summary of a single family, with top-holding percentages relative
    /// to that family alone.
    pub fn summarize_family<T: ValuedPosition>(&self, holdings: &[T]) -> FamilySummary {
        self.summarize(holdings, total_current(holdings))
    }

    fn summarize<T: ValuedPosition>(&self, holdings: &[T], reference_total: f64) -> FamilySummary {
        let total_invested: f64 = holdings.iter().map(|h| h.invested_value()).sum();
        let total_current = total_current(holdings);
        let total_gain = total_current - total_invested;

        let top_holdings = rank_by_current_value(holdings)
            .into_iter()
            .take(self.top_n)
            .enumerate()
            .map(|(idx, h)| RankedHolding {
                rank: idx + 1,
                name: h.display_name().to_string(),
                class_key: h.class().key().to_string(),
                current_value: h.current_value(),
                portfolio_percent: percent_of(h.current_value(), reference_total),
            })
            .collect();

        FamilySummary {
            holding_count: holdings.len(),
            total_invested,
            total_current,
            total_gain,
            total_gain_percent: percent_of(total_gain, total_invested),
            allocation: allocation_by_class(holdings),
            top_holdings,
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new(5)
    }
}

fn total_current<T: ValuedPosition>(holdings: &[T]) -> f64 {
    holdings.iter().map(|h| h.current_value()).sum()
}

/// Current value summed per instrument class, in order of first
/// appearance. Classes summing to zero are left out; unknown class keys
/// keep their raw key as label.
pub fn allocation_by_class<T: ValuedPosition>(holdings: &[T]) -> Vec<AllocationSlice> {
    let mut slices: Vec<AllocationSlice> = Vec::new();

    for holding in holdings {
        let class = holding.class();
        match slices.iter_mut().find(|s| s.key == class.key()) {
            Some(slice) => slice.value += holding.current_value(),
            None => slices.push(AllocationSlice {
                key: class.key().to_string(),
                label: class.label().to_string(),
                color: class.color().to_string(),
                value: holding.current_value(),
                percent: 0.0,
            }),
        }
    }

    slices.retain(|s| s.value > 0.0);
    let total: f64 = slices.iter().map(|s| s.value).sum();
    for slice in &mut slices {
        slice.percent = percent_of(slice.value, total);
    }
    slices
}

/// Holdings by descending current value. The sort is stable: equal values
/// keep their input order. Uses IEEE total order, so a NaN value cannot
/// scramble the ranking.
pub fn rank_by_current_value<T: ValuedPosition>(holdings: &[T]) -> Vec<&T> {
    let mut ranked: Vec<&T> = holdings.iter().collect();
    ranked.sort_by(|a, b| b.current_value().total_cmp(&a.current_value()));
    ranked
}

/// The `n` nearest future maturities (days remaining > 0), soonest first.
pub fn upcoming_maturities(holdings: &[ValuedFixedHolding], n: usize) -> Vec<&ValuedFixedHolding> {
    let mut upcoming: Vec<&ValuedFixedHolding> = holdings
        .iter()
        .filter(|h| h.days_to_maturity.is_some_and(|d| d > 0))
        .collect();
    upcoming.sort_by_key(|h| h.days_to_maturity);
    upcoming.truncate(n);
    upcoming
}
