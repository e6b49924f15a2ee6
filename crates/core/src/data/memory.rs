use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::cash_flow::{Budget, CreditCard, Expense, Income};
use crate::models::holding::{FixedIncomeHolding, VariableIncomeHolding};
use crate::models::net_worth::{Goal, SavingsBox};
use super::source::FinanceDataSource;

/// A [`FinanceDataSource`] over plain vectors. Useful for embedding the
/// core in a process that already has the records loaded, and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    pub variable_holdings: Vec<VariableIncomeHolding>,
    pub fixed_holdings: Vec<FixedIncomeHolding>,
    pub savings_boxes: Vec<SavingsBox>,
    pub goals: Vec<Goal>,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub budgets: Vec<Budget>,
    pub credit_cards: Vec<CreditCard>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FinanceDataSource for InMemoryDataSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn variable_holdings(&self) -> Result<Vec<VariableIncomeHolding>, CoreError> {
        Ok(self.variable_holdings.clone())
    }

    async fn fixed_holdings(&self) -> Result<Vec<FixedIncomeHolding>, CoreError> {
        Ok(self.fixed_holdings.clone())
    }

    async fn savings_boxes(&self) -> Result<Vec<SavingsBox>, CoreError> {
        Ok(self.savings_boxes.clone())
    }

    async fn goals(&self) -> Result<Vec<Goal>, CoreError> {
        Ok(self.goals.clone())
    }

    async fn expenses(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>, CoreError> {
        Ok(self
            .expenses
            .iter()
            .filter(|e| e.date >= from && e.date <= to)
            .cloned()
            .collect())
    }

    async fn incomes(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Income>, CoreError> {
        Ok(self
            .incomes
            .iter()
            .filter(|i| i.date >= from && i.date <= to)
            .cloned()
            .collect())
    }

    async fn budgets(&self, year: i32, month: u32) -> Result<Vec<Budget>, CoreError> {
        Ok(self
            .budgets
            .iter()
            .filter(|b| b.year == year && b.month == month)
            .cloned()
            .collect())
    }

    async fn credit_cards(&self) -> Result<Vec<CreditCard>, CoreError> {
        Ok(self.credit_cards.clone())
    }
}
