use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chart::{ChartDataset, ChartStyle};
use super::summary::Insight;
use super::transaction::{Recurrence, TransactionKind};

/// Action a row offers to the user. Bound to the row's id, so the view
/// never has to look transactions up itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowAction {
    Delete,
    StopRecurrence,
}

/// One line of the transaction list, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    pub recurrence: Recurrence,

    /// Signed, formatted amount, e.g. "+$1,000.00" or "-$42.50"
    pub amount: String,

    /// True for rows produced by the recurrence generator
    pub generated: bool,

    pub actions: Vec<RowAction>,
}

impl TransactionRow {
    pub fn offers(&self, action: RowAction) -> bool {
        self.actions.contains(&action)
    }
}

/// Everything the presentation layer needs for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub rows: Vec<TransactionRow>,

    /// Formatted totals
    pub balance: String,
    pub projected_balance: String,
    pub income: String,
    pub expense: String,

    /// Options for the category control (all known categories)
    pub categories: Vec<String>,

    /// Per-category breakdown (pie chart)
    pub category_chart: ChartDataset,

    /// Monthly income and expense series (bar/line chart)
    pub monthly_chart: Vec<ChartDataset>,

    /// Balance over time
    pub balance_chart: ChartDataset,

    pub insight: Insight,
    pub insight_message: String,

    pub dark_mode: bool,
    pub chart_style: ChartStyle,
}
