use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cartao")]
    CreditCard,
    #[serde(rename = "debito")]
    Debit,
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "dinheiro")]
    Cash,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub payment_method: Option<PaymentMethod>,

    /// Card the expense was charged to, when paid by credit card
    pub card_id: Option<Uuid>,
    pub recurring: bool,
}

impl Expense {
    pub fn new(amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            category_id: None,
            description: None,
            payment_method: None,
            card_id: None,
            recurring: false,
        }
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub source: String,
    pub recurring: bool,
}

impl Income {
    pub fn new(amount: f64, date: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            source: source.into(),
            recurring: false,
        }
    }
}

/// Monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category_id: Uuid,
    pub limit: f64,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: Uuid,
    pub name: String,
    pub limit: f64,
}

/// Expense and income totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// "YYYY-MM"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub expenses: f64,
    pub income: f64,
}

impl MonthlyBucket {
    pub fn balance(&self) -> f64 {
        self.income - self.expenses
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUsage {
    pub category_id: Uuid,
    pub limit: f64,
    pub spent: f64,

    /// spent / limit × 100 (not capped; 0 when the limit is 0)
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub total_limit: f64,
    pub total_spent: f64,
    pub percent: f64,
    pub categories: Vec<BudgetUsage>,
}

/// Snapshot of the household's financial health for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealth {
    /// (income − expenses) / income × 100
    pub savings_rate: f64,
    pub fixed_expenses: f64,
    pub variable_expenses: f64,

    /// Variable plus fixed income at current value
    pub investments: f64,

    /// Savings boxes plus goal balances
    pub reserve: f64,
}

/// Everything the reports page shows for a period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowReport {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub monthly: Vec<MonthlyBucket>,
    pub health: FinancialHealth,
}
