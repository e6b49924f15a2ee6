use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::cash_flow::{
    Budget, BudgetOverview, BudgetUsage, CashFlowReport, CreditCard, Expense, FinancialHealth,
    Income, MonthlyBucket, PaymentMethod,
};
use crate::models::net_worth::NetWorthBreakdown;
use crate::services::ratios::percent_of;

/// Longest history a monthly report may span.
pub const MAX_REPORT_MONTHS: u32 = 120;

/// A chart span must cover 1 to [`MAX_REPORT_MONTHS`] months.
pub fn check_span(months: u32) -> Result<(), CoreError> {
    if months == 0 || months > MAX_REPORT_MONTHS {
        return Err(CoreError::ValidationError(format!(
            "Report span of {months} months must be between 1 and {MAX_REPORT_MONTHS}"
        )));
    }
    Ok(())
}

/// Cash-flow reporting: monthly buckets, savings rate, budgets, card usage.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Expense and income totals for the `months` calendar months ending
    /// with `(year, month)`, oldest first. Month boundaries are inclusive.
    pub fn monthly_buckets(
        &self,
        expenses: &[Expense],
        incomes: &[Income],
        year: i32,
        month: u32,
        months: u32,
    ) -> Result<Vec<MonthlyBucket>, CoreError> {
        check_span(months)?;
        month_bounds(year, month)?;

        let mut buckets = Vec::with_capacity(months as usize);
        for back in (0..months).rev() {
            let (y, m) = months_back(year, month, back);
            let (start, end) = month_bounds(y, m)?;

            let expense_total = expenses
                .iter()
                .filter(|e| e.date >= start && e.date <= end)
                .map(|e| e.amount)
                .sum();
            let income_total = incomes
                .iter()
                .filter(|i| i.date >= start && i.date <= end)
                .map(|i| i.amount)
                .sum();

            buckets.push(MonthlyBucket {
                label: format!("{y:04}-{m:02}"),
                year: y,
                month: m,
                expenses: expense_total,
                income: income_total,
            });
        }
        Ok(buckets)
    }

    pub fn budget_overview(&self, budgets: &[Budget], expenses: &[Expense]) -> BudgetOverview {
        let mut spent_by_category: HashMap<Uuid, f64> = HashMap::new();
        for expense in expenses {
            if let Some(category) = expense.category_id {
                *spent_by_category.entry(category).or_insert(0.0) += expense.amount;
            }
        }

        let categories: Vec<BudgetUsage> = budgets
            .iter()
            .map(|b| {
                let spent = spent_by_category.get(&b.category_id).copied().unwrap_or(0.0);
                BudgetUsage {
                    category_id: b.category_id,
                    limit: b.limit,
                    spent,
                    percent: percent_of(spent, b.limit),
                }
            })
            .collect();

        let total_limit: f64 = budgets.iter().map(|b| b.limit).sum();
        let total_spent: f64 = expenses.iter().map(|e| e.amount).sum();

        BudgetOverview {
            total_limit,
            total_spent,
            percent: percent_of(total_spent, total_limit),
            categories,
        }
    }

    /// Credit-card spending as a share of the combined card limit.
    pub fn card_limit_usage(&self, cards: &[CreditCard], expenses: &[Expense]) -> f64 {
        let total_limit: f64 = cards.iter().map(|c| c.limit).sum();
        let charged: f64 = expenses
            .iter()
            .filter(|e| e.card_id.is_some() || e.payment_method == Some(PaymentMethod::CreditCard))
            .map(|e| e.amount)
            .sum();
        percent_of(charged, total_limit)
    }

    pub fn financial_health(
        &self,
        expenses: &[Expense],
        incomes: &[Income],
        net_worth: &NetWorthBreakdown,
    ) -> FinancialHealth {
        let total_income: f64 = incomes.iter().map(|i| i.amount).sum();
        let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
        let (fixed_expenses, variable_expenses) = expense_split(expenses);

        FinancialHealth {
            savings_rate: savings_rate(total_income, total_expenses),
            fixed_expenses,
            variable_expenses,
            investments: net_worth.variable_income + net_worth.fixed_income,
            reserve: net_worth.savings_boxes + net_worth.goals,
        }
    }

    /// Full report: period totals from `expenses`/`incomes`, the monthly
    /// chart from the longer `history_*` slices.
    #[allow(clippy::too_many_arguments)]
    pub fn cash_flow_report(
        &self,
        expenses: &[Expense],
        incomes: &[Income],
        history_expenses: &[Expense],
        history_incomes: &[Income],
        year: i32,
        month: u32,
        months: u32,
        net_worth: &NetWorthBreakdown,
    ) -> Result<CashFlowReport, CoreError> {
        let monthly = self.monthly_buckets(history_expenses, history_incomes, year, month, months)?;
        let total_income: f64 = incomes.iter().map(|i| i.amount).sum();
        let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();

        Ok(CashFlowReport {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            monthly,
            health: self.financial_health(expenses, incomes, net_worth),
        })
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

/// `(income − expenses) / income × 100`, 0 without income.
pub fn savings_rate(income: f64, expenses: f64) -> f64 {
    percent_of(income - expenses, income)
}

/// `(recurring, non-recurring)` expense totals.
pub fn expense_split(expenses: &[Expense]) -> (f64, f64) {
    expenses.iter().fold((0.0, 0.0), |(fixed, variable), e| {
        if e.recurring {
            (fixed + e.amount, variable)
        } else {
            (fixed, variable + e.amount)
        }
    })
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), CoreError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CoreError::ValidationError(format!("Invalid month {year}-{month:02}"))
    })?;
    let (next_y, next_m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let end = NaiveDate::from_ymd_opt(next_y, next_m, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| CoreError::ValidationError(format!("Invalid month {year}-{month:02}")))?;
    Ok((start, end))
}

/// Bounds of the month containing `date`.
pub fn month_of(date: NaiveDate) -> Result<(NaiveDate, NaiveDate), CoreError> {
    month_bounds(date.year(), date.month())
}

/// The calendar month `back` months before `(year, month)`.
pub fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
