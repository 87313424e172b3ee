use crate::models::chart::{ChartDataset, ChartPoint};
use crate::models::transaction::Transaction;
use crate::services::aggregation_service::AggregationService;

/// Generates chart-ready data sets from transactions.
///
/// The core computes all the numbers; the frontend only renders.
/// Chart data includes:
/// - Per-category breakdown (pie)
/// - Monthly income and expense (bar or line)
/// - Balance over time (line)
pub struct ChartService {
    aggregation_service: AggregationService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
        }
    }

    /// One slice per category, valued at the unsigned total.
    pub fn category_breakdown(&self, transactions: &[&Transaction]) -> ChartDataset {
        let points = self
            .aggregation_service
            .category_totals(transactions)
            .into_iter()
            .map(|c| ChartPoint::new(c.category, c.total))
            .collect();
        ChartDataset {
            label: "By category".to_string(),
            points,
        }
    }

    /// Two datasets, "Income" then "Expense", sharing the same month labels.
    pub fn monthly_trend(&self, transactions: &[&Transaction]) -> Vec<ChartDataset> {
        let series = self.aggregation_service.monthly_series(transactions);
        let income = series
            .iter()
            .map(|m| ChartPoint::new(m.month.label(), m.income))
            .collect();
        let expense = series
            .iter()
            .map(|m| ChartPoint::new(m.month.label(), m.expense))
            .collect();
        vec![
            ChartDataset {
                label: "Income".to_string(),
                points: income,
            },
            ChartDataset {
                label: "Expense".to_string(),
                points: expense,
            },
        ]
    }

    /// Running balance labelled by transaction date.
    pub fn balance_over_time(&self, transactions: &[&Transaction]) -> ChartDataset {
        let points = self
            .aggregation_service
            .running_balance(transactions)
            .into_iter()
            .map(|p| ChartPoint::new(p.date.format("%Y-%m-%d").to_string(), p.balance))
            .collect();
        ChartDataset {
            label: "Balance".to_string(),
            points,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
