use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::cash_flow::{Budget, CreditCard, Expense, Income};
use crate::models::holding::{FixedIncomeHolding, VariableIncomeHolding};
use crate::models::net_worth::{Goal, SavingsBox};
use crate::models::reserve::EmergencyReserve;

/// Read-only access to the user's stored records, one read per entity.
///
/// The backing store (relational backend, file, memory) lives outside this
/// crate; the facade only issues these reads and treats the results as
/// immutable for the rest of the computation.
#[async_trait]
pub trait FinanceDataSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    async fn variable_holdings(&self) -> Result<Vec<VariableIncomeHolding>, CoreError>;

    async fn fixed_holdings(&self) -> Result<Vec<FixedIncomeHolding>, CoreError>;

    async fn savings_boxes(&self) -> Result<Vec<SavingsBox>, CoreError>;

    async fn goals(&self) -> Result<Vec<Goal>, CoreError>;

    /// Tickers to quote. Defaults to those of the stored variable-income
    /// holdings; override when the store can answer more cheaply.
    async fn tracked_tickers(&self) -> Result<Vec<String>, CoreError> {
        Ok(self
            .variable_holdings()
            .await?
            .into_iter()
            .map(|h| h.ticker)
            .collect())
    }

    /// Expenses dated within `[from, to]`.
    async fn expenses(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>, CoreError>;

    /// Incomes dated within `[from, to]`.
    async fn incomes(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Income>, CoreError>;

    /// The emergency-fund record, if the user has set one up.
    async fn emergency_reserve(&self) -> Result<Option<EmergencyReserve>, CoreError> {
        Ok(EmergencyReserve::from_goals(&self.goals().await?))
    }

    async fn budgets(&self, year: i32, month: u32) -> Result<Vec<Budget>, CoreError>;

    async fn credit_cards(&self) -> Result<Vec<CreditCard>, CoreError>;
}
