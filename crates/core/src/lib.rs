pub mod errors;
pub mod fmt;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use log::{info, warn};
use models::{
    chart::ChartStyle,
    command::{ChangeEvent, Command, CommandOutcome},
    filter::TransactionFilter,
    ledger::Ledger,
    settings::Settings,
    summary::{BalanceSummary, CategoryTotal, Insight, MonthlyTotals, RunningBalancePoint},
    transaction::{Transaction, TransactionDraft},
    view::{Dashboard, RowAction, TransactionRow},
};
use services::{
    aggregation_service::AggregationService,
    chart_service::ChartService,
    export_service::{ExportDocument, ExportService},
    ledger_service::LedgerService,
    recurrence_service::RecurrenceService,
};
use storage::{blob::BlobStore, manager::StorageManager};
use uuid::Uuid;

use errors::CoreError;

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// Main entry point for the Budget Tracker core library.
///
/// Owns the transaction ledger and the blob store it is persisted to.
/// The ledger is loaded once in [`BudgetTracker::open`]; every mutation
/// rewrites the whole blob before returning.
#[must_use]
pub struct BudgetTracker<S: BlobStore> {
    ledger: Ledger,
    store: S,
    settings: Settings,
    dark_mode: bool,
    chart_style: ChartStyle,
    ledger_service: LedgerService,
    recurrence_service: RecurrenceService,
    aggregation_service: AggregationService,
    chart_service: ChartService,
    export_service: ExportService,
    listeners: Vec<Listener>,
}

impl<S: BlobStore> std::fmt::Debug for BudgetTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetTracker")
            .field("transactions", &self.ledger.len())
            .field("settings", &self.settings)
            .field("dark_mode", &self.dark_mode)
            .field("chart_style", &self.chart_style)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: BlobStore> BudgetTracker<S> {
    /// Load the ledger and display preferences from `store`.
    /// A store with nothing saved yet opens as an empty ledger.
    pub fn open(store: S, settings: Settings) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_ledger(&store, &settings)?;
        let dark_mode = StorageManager::load_dark_mode(&store, &settings)?;
        let chart_style = StorageManager::load_chart_style(&store, &settings)?;
        info!("Opened budget with {} transactions", ledger.len());
        Ok(Self {
            ledger,
            store,
            settings,
            dark_mode,
            chart_style,
            ledger_service: LedgerService::new(),
            recurrence_service: RecurrenceService::new(),
            aggregation_service: AggregationService::new(),
            chart_service: ChartService::new(),
            export_service: ExportService::new(),
            listeners: Vec::new(),
        })
    }

    /// Open with default settings.
    pub fn open_with_defaults(store: S) -> Result<Self, CoreError> {
        Self::open(store, Settings::default())
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Register a callback invoked after every mutation that changed state.
    pub fn subscribe(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Validate and record a new transaction.
    /// Nothing is stored if validation fails.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Uuid, CoreError> {
        let transaction = self.ledger_service.build_transaction(draft).map_err(|e| {
            warn!("Rejected transaction: {e}");
            e
        })?;
        let id = transaction.id;

        let mut next = self.ledger.clone();
        self.ledger_service.add(&mut next, transaction);
        self.commit(next)?;
        self.notify(ChangeEvent::Added(id));
        Ok(id)
    }

    /// Delete a transaction by id. Generated instances of a deleted
    /// template are kept. Returns `false` if the id is unknown.
    pub fn delete_transaction(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let mut next = self.ledger.clone();
        if self.ledger_service.remove(&mut next, id).is_none() {
            return Ok(false);
        }
        self.commit(next)?;
        self.notify(ChangeEvent::Deleted(id));
        Ok(true)
    }

    /// Stop a recurring template. Returns `false` if there was nothing to
    /// stop (unknown id, not a template, or already stopped).
    pub fn stop_recurrence(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let mut next = self.ledger.clone();
        if !self.ledger_service.deactivate(&mut next, id) {
            return Ok(false);
        }
        self.commit(next)?;
        self.notify(ChangeEvent::RecurrenceStopped(id));
        Ok(true)
    }

    /// Materialize every recurring instance due on or before `today`.
    /// Returns the number of new instances; running it again with the same
    /// `today` returns 0.
    pub fn generate_recurring(&mut self, today: NaiveDate) -> Result<usize, CoreError> {
        let mut next = self.ledger.clone();
        let ids = self.recurrence_service.generate(&mut next, today);
        if ids.is_empty() {
            return Ok(0);
        }
        let count = ids.len();
        self.commit(next)?;
        info!("Added {count} recurring transactions");
        self.notify(ChangeEvent::Generated(ids));
        Ok(count)
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Result<(), CoreError> {
        if dark_mode == self.dark_mode {
            return Ok(());
        }
        StorageManager::save_dark_mode(&mut self.store, &self.settings, dark_mode)?;
        self.dark_mode = dark_mode;
        self.notify(ChangeEvent::ThemeChanged(dark_mode));
        Ok(())
    }

    /// Flip the theme and return the new value (`true` = dark).
    pub fn toggle_theme(&mut self) -> Result<bool, CoreError> {
        let dark_mode = !self.dark_mode;
        self.set_dark_mode(dark_mode)?;
        Ok(dark_mode)
    }

    pub fn set_chart_style(&mut self, style: ChartStyle) -> Result<(), CoreError> {
        if style == self.chart_style {
            return Ok(());
        }
        StorageManager::save_chart_style(&mut self.store, &self.settings, style)?;
        self.chart_style = style;
        self.notify(ChangeEvent::ChartStyleChanged(style));
        Ok(())
    }

    /// Switch between line and bar charts and return the new style.
    pub fn toggle_chart_style(&mut self) -> Result<ChartStyle, CoreError> {
        let style = self.chart_style.toggled();
        self.set_chart_style(style)?;
        Ok(style)
    }

    /// Run a user command.
    pub fn dispatch(
        &mut self,
        command: Command,
        today: NaiveDate,
    ) -> Result<CommandOutcome, CoreError> {
        match command {
            Command::Add(draft) => self.add_transaction(draft).map(CommandOutcome::Added),
            Command::Delete(id) => self.delete_transaction(id).map(CommandOutcome::Deleted),
            Command::StopRecurrence(id) => self.stop_recurrence(id).map(CommandOutcome::Stopped),
            Command::GenerateRecurring => {
                self.generate_recurring(today).map(CommandOutcome::Generated)
            }
            Command::ToggleTheme => self
                .toggle_theme()
                .map(|dark_mode| CommandOutcome::Theme { dark_mode }),
            Command::ToggleChartStyle => self
                .toggle_chart_style()
                .map(CommandOutcome::ChartStyle),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// All transactions in ledger order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    #[must_use]
    pub fn get_transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.ledger.get(id)
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.len()
    }

    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn chart_style(&self) -> ChartStyle {
        self.chart_style
    }

    /// Transactions matching `filter`, in ledger order.
    #[must_use]
    pub fn filtered(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        filter.apply(&self.ledger.transactions)
    }

    #[must_use]
    pub fn summary(&self, filter: &TransactionFilter, today: NaiveDate) -> BalanceSummary {
        self.aggregation_service
            .summary(&self.filtered(filter), today, self.settings.projection_days)
    }

    /// Every category label in the ledger, ignoring any filter.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.aggregation_service
            .categories(&self.filtered(&TransactionFilter::all()))
    }

    #[must_use]
    pub fn category_totals(&self, filter: &TransactionFilter) -> Vec<CategoryTotal> {
        self.aggregation_service.category_totals(&self.filtered(filter))
    }

    #[must_use]
    pub fn monthly_series(&self, filter: &TransactionFilter) -> Vec<MonthlyTotals> {
        self.aggregation_service.monthly_series(&self.filtered(filter))
    }

    #[must_use]
    pub fn running_balance(&self, filter: &TransactionFilter) -> Vec<RunningBalancePoint> {
        self.aggregation_service.running_balance(&self.filtered(filter))
    }

    #[must_use]
    pub fn insight(&self, filter: &TransactionFilter) -> Insight {
        self.aggregation_service.insight(&self.filtered(filter))
    }

    /// List rows for the filtered transactions, each with the actions it offers.
    #[must_use]
    pub fn rows(&self, filter: &TransactionFilter) -> Vec<TransactionRow> {
        let symbol = &self.settings.currency_symbol;
        self.filtered(filter)
            .into_iter()
            .map(|t| {
                let mut actions = vec![RowAction::Delete];
                if t.generates_instances() {
                    actions.push(RowAction::StopRecurrence);
                }
                TransactionRow {
                    id: t.id,
                    date: t.date,
                    description: t.description.clone(),
                    category: t.category_label().to_string(),
                    kind: t.kind,
                    recurrence: t.recurrence,
                    amount: fmt::signed_money(t.signed_amount(), symbol),
                    generated: t.is_generated(),
                    actions,
                }
            })
            .collect()
    }

    /// Everything one render pass needs, computed from the current ledger.
    #[must_use]
    pub fn dashboard(&self, filter: &TransactionFilter, today: NaiveDate) -> Dashboard {
        let visible = self.filtered(filter);
        let summary =
            self.aggregation_service
                .summary(&visible, today, self.settings.projection_days);
        let symbol = &self.settings.currency_symbol;

        Dashboard {
            rows: self.rows(filter),
            balance: fmt::money(summary.balance, symbol),
            projected_balance: fmt::money(summary.projected_balance, symbol),
            income: fmt::money(summary.income, symbol),
            expense: fmt::money(summary.expense, symbol),
            categories: self.categories(),
            category_chart: self.chart_service.category_breakdown(&visible),
            monthly_chart: self.chart_service.monthly_trend(&visible),
            balance_chart: self.chart_service.balance_over_time(&visible),
            insight: summary.insight,
            insight_message: summary.insight.message().to_string(),
            dark_mode: self.dark_mode,
            chart_style: self.chart_style,
        }
    }

    /// Generate due recurring instances, then build the dashboard.
    pub fn refresh(
        &mut self,
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> Result<Dashboard, CoreError> {
        self.generate_recurring(today)?;
        Ok(self.dashboard(filter, today))
    }

    // ── Export ──────────────────────────────────────────────────────

    /// All transactions as a CSV document, in ledger order.
    pub fn export_csv(&self) -> Result<ExportDocument, CoreError> {
        self.export_service.document(
            &self.ledger.transactions,
            self.settings.export_layout,
            &self.settings.export_file_name,
        )
    }

    /// Pretty JSON snapshot of the ledger (debugging / display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Persist `next`, then make it the current ledger. On a storage error
    /// the in-memory ledger is left untouched.
    fn commit(&mut self, next: Ledger) -> Result<(), CoreError> {
        StorageManager::save_ledger(&mut self.store, &self.settings, &next)?;
        self.ledger = next;
        Ok(())
    }

    fn notify(&mut self, event: ChangeEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
