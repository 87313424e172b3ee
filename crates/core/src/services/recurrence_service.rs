use chrono::NaiveDate;
use log::debug;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::ledger::Ledger;
use crate::models::transaction::Transaction;

/// Expands recurring templates into dated instances.
///
/// Generation is idempotent: an instance is keyed by `(template id, date)`
/// and is never produced twice for the same key.
pub struct RecurrenceService;

impl RecurrenceService {
    pub fn new() -> Self {
        Self
    }

    /// Due dates of `template` strictly after its own date, up to and
    /// including `min(today, recurrence_end)`.
    pub fn due_dates(&self, template: &Transaction, today: NaiveDate) -> Vec<NaiveDate> {
        let limit = match template.recurrence_end {
            Some(end) => end.min(today),
            None => today,
        };

        let mut dates = Vec::new();
        let mut step = 1u32;
        // `today` bounds the loop even without an end date.
        while let Some(candidate) = template.recurrence.advance(template.date, step) {
            if candidate > limit {
                break;
            }
            dates.push(candidate);
            step += 1;
        }
        dates
    }

    /// Build every missing instance for the active templates in `ledger`.
    /// The ledger is not modified.
    pub fn pending_instances(&self, ledger: &Ledger, today: NaiveDate) -> Vec<Transaction> {
        let mut existing: HashSet<(Uuid, NaiveDate)> = ledger
            .transactions
            .iter()
            .filter_map(|t| t.parent_id.map(|parent| (parent, t.date)))
            .collect();

        let mut instances = Vec::new();
        for template in ledger.transactions.iter().filter(|t| t.generates_instances()) {
            for date in self.due_dates(template, today) {
                if existing.insert((template.id, date)) {
                    instances.push(template.instance_on(date));
                }
            }
        }
        instances
    }

    /// Append all missing instances to the ledger.
    /// Returns the ids of the new instances, in append order.
    pub fn generate(&self, ledger: &mut Ledger, today: NaiveDate) -> Vec<Uuid> {
        let instances = self.pending_instances(ledger, today);
        let ids: Vec<Uuid> = instances.iter().map(|t| t.id).collect();
        if !ids.is_empty() {
            debug!("Generated {} recurring instances up to {today}", ids.len());
        }
        ledger.transactions.extend(instances);
        ids
    }
}

impl Default for RecurrenceService {
    fn default() -> Self {
        Self::new()
    }
}
