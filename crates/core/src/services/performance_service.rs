//! Return and risk metrics over a daily valuation series.
//!
//! Two return measures are offered:
//!
//! - **TWR** chains flow-adjusted daily returns, so the timing and size of
//!   contributions does not affect it. Suited to comparing strategies.
//! - **IRR** solves for the annual rate that brings the investor's dated
//!   cash flows (plus the final market value) to a net present value of
//!   zero. It reflects what the investor actually earned.

use crate::models::performance::{DatedCashFlow, IrrResult, PerformanceMetrics, ValuationPoint};

/// Periods per year used to annualize daily figures.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

const DAYS_PER_YEAR: f64 = 365.0;
const IRR_INITIAL_GUESS: f64 = 0.1;
const IRR_MAX_ITERATIONS: u32 = 100;
const IRR_TOLERANCE: f64 = 1e-8;
const IRR_MIN_RATE: f64 = -0.99;
const FLOW_EPSILON: f64 = 1e-12;

/// Computes [`PerformanceMetrics`] for a valuation series.
pub struct PerformanceService;

impl PerformanceService {
    pub fn new() -> Self {
        Self
    }

    /// All metrics for `points` (any order). `risk_free_per_period` is the
    /// daily risk-free rate used by the Sharpe ratio.
    pub fn metrics(&self, points: &[ValuationPoint], risk_free_per_period: f64) -> PerformanceMetrics {
        let ordered = in_date_order(points);
        let returns = returns_of(&ordered);
        let values: Vec<f64> = ordered.iter().map(|p| p.market_value).collect();
        let irr = xirr(&investor_cash_flows(&ordered));

        PerformanceMetrics {
            twr: chain_returns(&returns),
            irr: irr.rate,
            irr_converged: irr.converged,
            volatility: volatility_annual(&returns, TRADING_DAYS_PER_YEAR),
            max_drawdown: max_drawdown(&values),
            sharpe: sharpe_ratio(&returns, risk_free_per_period, TRADING_DAYS_PER_YEAR),
        }
    }
}

impl Default for PerformanceService {
    fn default() -> Self {
        Self::new()
    }
}

/// Flow-adjusted return of each day against the previous one:
/// `(value - previous - net_flow) / previous`, or 0 when the previous
/// value is not positive.
pub fn period_returns(points: &[ValuationPoint]) -> Vec<f64> {
    returns_of(&in_date_order(points))
}

/// Time-weighted return of the whole series. Fewer than two points → 0.
pub fn twr(points: &[ValuationPoint]) -> f64 {
    chain_returns(&period_returns(points))
}

/// `Π(1 + r) - 1`.
pub fn chain_returns(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Annualized IRR of dated cash flows (XIRR), Newton-Raphson from a 10%
/// guess with years counted as days / 365 from the earliest flow.
///
/// Needs at least one negative and one positive flow; otherwise the rate
/// is 0 and `converged` is false. A run that stops without converging
/// reports the last estimate.
pub fn xirr(flows: &[DatedCashFlow]) -> IrrResult {
    let not_solved = IrrResult {
        rate: 0.0,
        converged: false,
        iterations: 0,
    };
    let has_outflow = flows.iter().any(|f| f.amount < 0.0);
    let has_inflow = flows.iter().any(|f| f.amount > 0.0);
    let Some(start) = flows.iter().map(|f| f.date).min() else {
        return not_solved;
    };
    if !has_outflow || !has_inflow {
        return not_solved;
    }

    let timed: Vec<(f64, f64)> = flows
        .iter()
        .map(|f| ((f.date - start).num_days() as f64 / DAYS_PER_YEAR, f.amount))
        .collect();

    let mut rate = IRR_INITIAL_GUESS;
    for iteration in 1..=IRR_MAX_ITERATIONS {
        let (npv, dnpv) = timed.iter().fold((0.0, 0.0), |(npv, dnpv), &(years, amount)| {
            let discount = (1.0 + rate).powf(years);
            (
                npv + amount / discount,
                dnpv - years * amount / (discount * (1.0 + rate)),
            )
        });

        if dnpv.abs() < FLOW_EPSILON {
            return IrrResult {
                rate,
                converged: false,
                iterations: iteration,
            };
        }

        let next = (rate - npv / dnpv).max(IRR_MIN_RATE);
        if !next.is_finite() {
            return IrrResult {
                rate,
                converged: false,
                iterations: iteration,
            };
        }
        if (next - rate).abs() < IRR_TOLERANCE {
            return IrrResult {
                rate: next,
                converged: true,
                iterations: iteration,
            };
        }
        rate = next;
    }

    IrrResult {
        rate,
        converged: false,
        iterations: IRR_MAX_ITERATIONS,
    }
}

/// Sample standard deviation of `returns` scaled by `√periods_per_year`.
/// Fewer than two returns → 0.
pub fn volatility_annual(returns: &[f64], periods_per_year: f64) -> f64 {
    sample_std(returns) * periods_per_year.sqrt()
}

/// Deepest fall from a running peak, as a non-positive fraction
/// (-0.25 = 25% below the peak). Empty input or no fall → 0.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &value in values {
        peak = peak.max(value);
        if peak > 0.0 {
            worst = worst.min((value - peak) / peak);
        }
    }
    worst
}

/// Annualized Sharpe ratio of per-period returns over a per-period
/// risk-free rate. Zero when there is no dispersion to divide by.
pub fn sharpe_ratio(returns: &[f64], risk_free_per_period: f64, periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let excess: Vec<f64> = returns.iter().map(|r| r - risk_free_per_period).collect();
    let std = sample_std(&excess);
    if std == 0.0 || !std.is_finite() {
        return 0.0;
    }
    mean(&excess) * periods_per_year / (std * periods_per_year.sqrt())
}

// ── Internal ────────────────────────────────────────────────────────

fn in_date_order(points: &[ValuationPoint]) -> Vec<&ValuationPoint> {
    let mut ordered: Vec<&ValuationPoint> = points.iter().collect();
    ordered.sort_by_key(|p| p.date);
    ordered
}

fn returns_of(ordered: &[&ValuationPoint]) -> Vec<f64> {
    ordered
        .windows(2)
        .map(|pair| {
            let (previous, current) = (pair[0], pair[1]);
            if previous.market_value <= 0.0 {
                0.0
            } else {
                (current.market_value - previous.market_value - current.net_flow())
                    / previous.market_value
            }
        })
        .collect()
}

/// Daily investor flows (non-zero only) plus the final market value as a
/// closing inflow on the last date.
fn investor_cash_flows(ordered: &[&ValuationPoint]) -> Vec<DatedCashFlow> {
    let mut flows: Vec<DatedCashFlow> = ordered
        .iter()
        .map(|p| DatedCashFlow::new(p.date, p.investor_flow()))
        .filter(|f| f.amount.abs() > FLOW_EPSILON)
        .collect();
    if let Some(last) = ordered.last() {
        flows.push(DatedCashFlow::new(last.date, last.market_value));
    }
    flows
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mu = mean(values);
    let variance =
        values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
