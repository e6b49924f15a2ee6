use chrono::NaiveDate;

use crate::models::cash_flow::Expense;
use crate::models::reserve::{
    BurnRate, EmergencyReserve, Milestone, ReserveStatus, ReserveTier, MILESTONE_MONTHS,
};
use crate::services::ratios::capped_percent;

/// Months of coverage below which the reserve is critical.
pub const WARNING_THRESHOLD_MONTHS: f64 = 3.0;

/// Months of coverage from which the reserve is safe.
pub const SAFE_THRESHOLD_MONTHS: f64 = 6.0;

/// Emergency-fund evaluation: burn rate, coverage months, tier, milestones.
pub struct ReserveService;

impl ReserveService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of expenses dated within `[from, to]`, with the recurring
    /// subtotal alongside.
    pub fn monthly_burn_rate(&self, expenses: &[Expense], from: NaiveDate, to: NaiveDate) -> BurnRate {
        expenses
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .fold(BurnRate::default(), |mut acc, e| {
                acc.total += e.amount;
                if e.recurring {
                    acc.recurring += e.amount;
                }
                acc
            })
    }

    pub fn evaluate(&self, monthly_expenses: f64, reserve: Option<&EmergencyReserve>) -> ReserveStatus {
        let Some(reserve) = reserve else {
            return ReserveStatus::NotConfigured {
                monthly_expenses,
                milestones: milestones(monthly_expenses, None),
            };
        };

        let months_covered = if monthly_expenses > 0.0 {
            reserve.current_amount / monthly_expenses
        } else {
            0.0
        };
        let months_covered = if months_covered.is_finite() { months_covered } else { 0.0 };

        ReserveStatus::Configured {
            monthly_expenses,
            months_covered,
            tier: tier_for(months_covered),
            progress_percent: capped_percent(reserve.current_amount, reserve.target_amount),
            milestones: milestones(monthly_expenses, Some(reserve.current_amount)),
        }
    }
}

impl Default for ReserveService {
    fn default() -> Self {
        Self::new()
    }
}

/// First match wins: `< 3` critical, `< 6` warning, otherwise safe.
pub fn tier_for(months_covered: f64) -> ReserveTier {
    if months_covered < WARNING_THRESHOLD_MONTHS {
        ReserveTier::Critical
    } else if months_covered < SAFE_THRESHOLD_MONTHS {
        ReserveTier::Warning
    } else {
        ReserveTier::Safe
    }
}

fn milestones(monthly_expenses: f64, current: Option<f64>) -> Vec<Milestone> {
    MILESTONE_MONTHS
        .iter()
        .map(|&months| {
            let target = monthly_expenses * f64::from(months);
            Milestone {
                months,
                target,
                progress_percent: current.map_or(0.0, |c| capped_percent(c, target)),
            }
        })
        .collect()
}
