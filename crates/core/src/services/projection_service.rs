use crate::errors::CoreError;
use crate::models::projection::{ProjectionParams, ProjectionPoint};

/// Share of the portfolio that can be withdrawn each year without
/// depleting it (the "4% rule").
pub const DEFAULT_SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Below this a monthly rate is treated as zero.
const RATE_EPSILON: f64 = 1e-9;

/// Month-by-month savings projections and the inverse "how much per
/// month to reach a target" question.
pub struct ProjectionService;

impl ProjectionService {
    pub fn new() -> Self {
        Self
    }

    /// Compound growth: each month the balance earns the monthly rate, then
    /// the contribution is added. `real` deflates by compounded inflation.
    pub fn compound(&self, params: &ProjectionParams) -> Result<Vec<ProjectionPoint>, CoreError> {
        params.validate()?;
        let rate = monthly_rate(params.annual_rate);
        Ok(project(params, |balance| {
            balance * (1.0 + rate) + params.monthly_contribution
        }))
    }

    /// The same deposits kept without any return, for comparison with
    /// [`compound`](Self::compound).
    pub fn savings_only(&self, params: &ProjectionParams) -> Result<Vec<ProjectionPoint>, CoreError> {
        params.validate()?;
        Ok(project(params, |balance| balance + params.monthly_contribution))
    }

    /// Monthly deposit needed to reach `target` in `years`, given what is
    /// already saved. Zero when the initial amount already gets there or
    /// the horizon is empty.
    pub fn required_monthly_contribution(
        &self,
        target: f64,
        years: u32,
        annual_rate: f64,
        initial: f64,
    ) -> f64 {
        let months = f64::from(years) * 12.0;
        if months <= 0.0 {
            return 0.0;
        }
        let rate = monthly_rate(annual_rate);
        let growth = (1.0 + rate).powf(months);
        let gap = target - initial * growth;
        if gap <= 0.0 || !gap.is_finite() {
            return 0.0;
        }
        if rate.abs() < RATE_EPSILON {
            gap / months
        } else {
            gap * rate / (growth - 1.0)
        }
    }

    /// Monthly income a portfolio of `patrimony` sustains at
    /// `withdrawal_rate` a year.
    pub fn safe_withdrawal_income(&self, patrimony: f64, withdrawal_rate: f64) -> f64 {
        patrimony * withdrawal_rate / 12.0
    }
}

impl Default for ProjectionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Equivalent monthly rate of an annual rate: `(1 + a)^(1/12) - 1`.
pub fn monthly_rate(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

fn project(params: &ProjectionParams, step: impl Fn(f64) -> f64) -> Vec<ProjectionPoint> {
    let inflation = monthly_rate(params.annual_inflation);
    let mut balance = params.initial;
    let mut deflator = 1.0;
    (1..=params.months())
        .map(|month| {
            balance = step(balance);
            deflator *= 1.0 + inflation;
            ProjectionPoint {
                month,
                nominal: balance,
                real: balance / deflator,
            }
        })
        .collect()
}
