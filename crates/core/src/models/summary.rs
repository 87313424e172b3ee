use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filter::YearMonth;

/// Overall trend of a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Insight {
    /// Income exceeds expenses
    NetSaver,
    /// Expenses match or exceed income
    NetSpender,
}

impl Insight {
    pub fn from_totals(income: f64, expense: f64) -> Self {
        if income > expense {
            Insight::NetSaver
        } else {
            Insight::NetSpender
        }
    }

    /// One-line message for display.
    pub fn message(&self) -> &'static str {
        match self {
            Insight::NetSaver => "You are a net saver: income exceeds expenses.",
            Insight::NetSpender => "You are a net spender: expenses match or exceed income.",
        }
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insight::NetSaver => write!(f, "net saver"),
            Insight::NetSpender => write!(f, "net spender"),
        }
    }
}

/// Totals over a set of transactions at a reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Reference "today" used for the projection
    pub as_of_date: NaiveDate,

    /// Number of transactions aggregated
    pub transaction_count: usize,

    /// Sum of income amounts
    pub income: f64,

    /// Sum of expense amounts
    pub expense: f64,

    /// income - expense
    pub balance: f64,

    /// Balance restricted to transactions dated on or before the projection horizon
    pub projected_balance: f64,

    pub insight: Insight,
}

/// Unsigned total of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Income and expense totals of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Cumulative signed balance right after a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningBalancePoint {
    pub date: NaiveDate,
    pub transaction_id: Uuid,
    pub balance: f64,
}
