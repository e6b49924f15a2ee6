use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Longest horizon a projection may cover.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Inputs of a monthly savings projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Amount already saved
    pub initial: f64,

    /// Deposit added at the end of every month
    pub monthly_contribution: f64,

    /// Expected nominal return per year (0.10 = 10%)
    pub annual_rate: f64,

    /// Expected inflation per year, used to deflate the series
    #[serde(default)]
    pub annual_inflation: f64,

    pub years: u32,
}

impl ProjectionParams {
    pub fn months(&self) -> u32 {
        self.years * 12
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.initial.is_finite() || !self.monthly_contribution.is_finite() {
            return Err(CoreError::ValidationError(
                "Projection amounts must be finite".into(),
            ));
        }
        for (name, rate) in [("return", self.annual_rate), ("inflation", self.annual_inflation)] {
            if !rate.is_finite() || rate <= -1.0 {
                return Err(CoreError::ValidationError(format!(
                    "Annual {name} rate {rate} must be finite and above -100%"
                )));
            }
        }
        if self.years > MAX_PROJECTION_YEARS {
            return Err(CoreError::ValidationError(format!(
                "Projection of {} years exceeds the {MAX_PROJECTION_YEARS}-year limit",
                self.years
            )));
        }
        Ok(())
    }
}

/// Balance at the end of a projected month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based month index
    pub month: u32,
    pub nominal: f64,

    /// Nominal balance in today's money
    pub real: f64,
}
