use log::{debug, info};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::transaction::{Transaction, TransactionDraft};

/// Manages the transaction collection: validation, append, removal and
/// stopping recurring series.
///
/// Pure business logic, no I/O. Persisting is the caller's job.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Validate form input and turn it into a transaction.
    ///
    /// Rules:
    /// - Description must not be blank
    /// - Amount must parse to a finite, non-negative number
    /// - Date must be present
    pub fn build_transaction(&self, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(CoreError::ValidationError(
                "Description must not be empty".into(),
            ));
        }

        let raw_amount = draft.amount.trim();
        let amount: f64 = raw_amount.parse().map_err(|_| {
            CoreError::ValidationError(format!("Amount '{raw_amount}' is not a number"))
        })?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a non-negative number, got '{raw_amount}'"
            )));
        }
        // "-0" parses to negative zero
        let amount = if amount == 0.0 { 0.0 } else { amount };

        let date = draft
            .date
            .ok_or_else(|| CoreError::ValidationError("Date is required".into()))?;

        let category = draft
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let mut transaction = Transaction::new(description, amount, draft.kind, date);
        transaction.category = category;
        transaction.recurrence = draft.recurrence;
        transaction.recurrence_end = if draft.recurrence.is_recurring() {
            draft.recurrence_end
        } else {
            None
        };
        Ok(transaction)
    }

    /// Append a transaction to the end of the ledger.
    pub fn add(&self, ledger: &mut Ledger, transaction: Transaction) {
        debug!(
            "Adding {} '{}' of {} on {}",
            transaction.kind, transaction.description, transaction.amount, transaction.date
        );
        ledger.transactions.push(transaction);
    }

    /// Remove a transaction by id. Instances generated from a removed
    /// template stay in the ledger.
    /// Returns the removed transaction, or `None` if the id is unknown.
    pub fn remove(&self, ledger: &mut Ledger, id: Uuid) -> Option<Transaction> {
        let idx = ledger.transactions.iter().position(|t| t.id == id)?;
        let removed = ledger.transactions.remove(idx);
        if removed.is_template() {
            info!(
                "Removed template {id}; {} generated instances kept",
                ledger.instances_of(id).count()
            );
        }
        Some(removed)
    }

    /// Stop a recurring template from generating further instances.
    /// Returns `false` (and changes nothing) if the id is unknown, is not a
    /// template, or is already stopped.
    pub fn deactivate(&self, ledger: &mut Ledger, id: Uuid) -> bool {
        match ledger.transactions.iter_mut().find(|t| t.id == id) {
            Some(t) if t.generates_instances() => {
                t.active = false;
                true
            }
            _ => false,
        }
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
