use uuid::Uuid;

use super::chart::ChartStyle;
use super::transaction::TransactionDraft;
use super::view::RowAction;

/// A user action, dispatched through `BudgetTracker::dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(TransactionDraft),
    Delete(Uuid),
    StopRecurrence(Uuid),
    GenerateRecurring,
    ToggleTheme,
    ToggleChartStyle,
}

impl Command {
    /// The command a row action stands for.
    pub fn for_row(id: Uuid, action: RowAction) -> Self {
        match action {
            RowAction::Delete => Command::Delete(id),
            RowAction::StopRecurrence => Command::StopRecurrence(id),
        }
    }
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Added(Uuid),
    Deleted(bool),
    Stopped(bool),
    Generated(usize),
    Theme { dark_mode: bool },
    ChartStyle(ChartStyle),
}

/// Notification sent to subscribers after an effective mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    Added(Uuid),
    Deleted(Uuid),
    RecurrenceStopped(Uuid),
    Generated(Vec<Uuid>),
    ThemeChanged(bool),
    ChartStyleChanged(ChartStyle),
}
