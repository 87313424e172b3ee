use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

use crate::models::filter::YearMonth;
use crate::models::summary::{
    BalanceSummary, CategoryTotal, Insight, MonthlyTotals, RunningBalancePoint,
};
use crate::models::transaction::{Transaction, TransactionKind};

/// Computes balances and breakdowns from a set of transactions.
///
/// Every function is pure: the input is usually a filtered view of the
/// ledger, and nothing computed here is ever persisted.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of income amounts and sum of expense amounts.
    pub fn totals(&self, transactions: &[&Transaction]) -> (f64, f64) {
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), t| match t.kind {
                TransactionKind::Income => (income + t.amount, expense),
                TransactionKind::Expense => (income, expense + t.amount),
            })
    }

    /// Income minus expense.
    pub fn balance(&self, transactions: &[&Transaction]) -> f64 {
        let (income, expense) = self.totals(transactions);
        income - expense
    }

    /// Balance of the transactions dated on or before `today + horizon_days`.
    pub fn projected_balance(
        &self,
        transactions: &[&Transaction],
        today: NaiveDate,
        horizon_days: u32,
    ) -> f64 {
        let horizon = today
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        transactions
            .iter()
            .filter(|t| t.date <= horizon)
            .map(|t| t.signed_amount())
            .sum()
    }

    pub fn insight(&self, transactions: &[&Transaction]) -> Insight {
        let (income, expense) = self.totals(transactions);
        Insight::from_totals(income, expense)
    }

    /// All headline figures in one pass over the totals.
    pub fn summary(
        &self,
        transactions: &[&Transaction],
        today: NaiveDate,
        horizon_days: u32,
    ) -> BalanceSummary {
        let (income, expense) = self.totals(transactions);
        BalanceSummary {
            as_of_date: today,
            transaction_count: transactions.len(),
            income,
            expense,
            balance: income - expense,
            projected_balance: self.projected_balance(transactions, today, horizon_days),
            insight: Insight::from_totals(income, expense),
        }
    }

    /// Unsigned total per category label, sorted by category name.
    pub fn category_totals(&self, transactions: &[&Transaction]) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for t in transactions {
            *totals.entry(t.category_label()).or_insert(0.0) += t.amount;
        }
        totals
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category.to_string(),
                total,
            })
            .collect()
    }

    /// Distinct category labels, sorted.
    pub fn categories(&self, transactions: &[&Transaction]) -> Vec<String> {
        self.category_totals(transactions)
            .into_iter()
            .map(|c| c.category)
            .collect()
    }

    /// Income and expense per month, oldest month first.
    /// Months without transactions are omitted.
    pub fn monthly_series(&self, transactions: &[&Transaction]) -> Vec<MonthlyTotals> {
        let mut months: BTreeMap<YearMonth, (f64, f64)> = BTreeMap::new();
        for t in transactions {
            let entry = months.entry(YearMonth::of(t.date)).or_insert((0.0, 0.0));
            match t.kind {
                TransactionKind::Income => entry.0 += t.amount,
                TransactionKind::Expense => entry.1 += t.amount,
            }
        }
        months
            .into_iter()
            .map(|(month, (income, expense))| MonthlyTotals {
                month,
                income,
                expense,
            })
            .collect()
    }

    /// Cumulative signed balance after each transaction, in date order.
    /// Transactions sharing a date keep their ledger order.
    pub fn running_balance(&self, transactions: &[&Transaction]) -> Vec<RunningBalancePoint> {
        let mut sorted: Vec<&Transaction> = transactions.to_vec();
        sorted.sort_by_key(|t| t.date);

        let mut balance = 0.0;
        sorted
            .into_iter()
            .map(|t| {
                balance += t.signed_amount();
                RunningBalancePoint {
                    date: t.date,
                    transaction_id: t.id,
                    balance,
                }
            })
            .collect()
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
