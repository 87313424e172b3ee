use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::CoreError;

/// Label used for transactions recorded without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Direction of a transaction. Amounts are stored unsigned; the kind
/// decides the sign at aggregation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// `1.0` for income, `-1.0` for expense.
    pub fn sign(self) -> f64 {
        match self {
            TransactionKind::Income => 1.0,
            TransactionKind::Expense => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(CoreError::ValidationError(format!(
                "Unknown transaction type '{other}' (expected income or expense)"
            ))),
        }
    }
}

/// How often a template transaction repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    Biweekly,
    Monthly,
}

impl Recurrence {
    pub fn is_recurring(self) -> bool {
        self != Recurrence::None
    }

    /// The date `steps` periods after `anchor`.
    ///
    /// Monthly steps are always measured from the anchor, and a day-of-month
    /// that does not exist in the target month is clamped to its last day
    /// (Jan 31 + 1 month = Feb 28/29, Jan 31 + 2 months = Mar 31).
    /// Returns `None` for non-recurring entries or on calendar overflow.
    pub fn advance(self, anchor: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Recurrence::None => None,
            Recurrence::Weekly => anchor.checked_add_days(Days::new(7 * u64::from(steps))),
            Recurrence::Biweekly => anchor.checked_add_days(Days::new(14 * u64::from(steps))),
            Recurrence::Monthly => anchor.checked_add_months(Months::new(steps)),
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recurrence::None => write!(f, "none"),
            Recurrence::Weekly => write!(f, "weekly"),
            Recurrence::Biweekly => write!(f, "biweekly"),
            Recurrence::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Recurrence {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Recurrence::None),
            "weekly" => Ok(Recurrence::Weekly),
            "biweekly" => Ok(Recurrence::Biweekly),
            "monthly" => Ok(Recurrence::Monthly),
            other => Err(CoreError::ValidationError(format!(
                "Unknown recurrence '{other}' (expected none, weekly, biweekly or monthly)"
            ))),
        }
    }
}

fn default_active() -> bool {
    true
}

/// Stable UUID for an id saved as a millisecond timestamp by older
/// builds of the widget. The same number always maps to the same UUID,
/// so template links survive a reload.
pub fn legacy_id(millis: u64) -> Uuid {
    Uuid::from_u128(u128::from(millis))
}

fn id_from_value(value: Value) -> Result<Uuid, String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(legacy_id)
            .ok_or_else(|| format!("id {n} is not a non-negative integer")),
        Value::String(s) => Uuid::parse_str(&s).or_else(|e| {
            s.parse::<u64>()
                .map(legacy_id)
                .map_err(|_| format!("id '{s}' is not a UUID: {e}"))
        }),
        other => Err(format!("id must be a number or string, got {other}")),
    }
}

/// Accepts both UUID strings and numeric ids.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    id_from_value(value).map_err(D::Error::custom)
}

fn deserialize_parent_id<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => id_from_value(value).map(Some).map_err(D::Error::custom),
    }
}

/// A blank category is stored by the widget as `""`; treat it as missing.
fn deserialize_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let category = Option::<String>::deserialize(deserializer)?;
    Ok(category.filter(|c| !c.trim().is_empty()))
}

/// A single income or expense entry.
///
/// Field names on the wire match the persisted blob
/// (`type`, `recurrenceEnd`, `parentId`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: Uuid,

    /// Free-text description
    pub description: String,

    /// Amount (never negative)
    pub amount: f64,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Date of the transaction (no time component)
    pub date: NaiveDate,

    /// Optional category label
    #[serde(default, deserialize_with = "deserialize_category")]
    pub category: Option<String>,

    #[serde(default)]
    pub recurrence: Recurrence,

    /// Last date (inclusive) on which the series may produce an instance
    #[serde(default)]
    pub recurrence_end: Option<NaiveDate>,

    /// Whether a recurring series still generates new instances
    #[serde(default = "default_active")]
    pub active: bool,

    /// Template this entry was generated from; `None` for user entries
    #[serde(default, deserialize_with = "deserialize_parent_id")]
    pub parent_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            kind,
            date,
            category: None,
            recurrence: Recurrence::None,
            recurrence_end: None,
            active: true,
            parent_id: None,
        }
    }

    /// A template is a user-entered recurring transaction.
    /// Generated instances are never templates, whatever their `recurrence`.
    pub fn is_template(&self) -> bool {
        self.parent_id.is_none() && self.recurrence.is_recurring()
    }

    pub fn is_generated(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Whether this entry still produces new instances.
    pub fn generates_instances(&self) -> bool {
        self.is_template() && self.active
    }

    /// Amount with the sign derived from the kind.
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }

    /// Category for grouping and filtering.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Build the instance of this template due on `date`.
    pub fn instance_on(&self, date: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date,
            parent_id: Some(self.id),
            ..self.clone()
        }
    }
}

/// Raw form input for a new transaction. Nothing is stored until it
/// validates into a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub description: String,

    /// Amount as typed by the user
    pub amount: String,

    pub kind: TransactionKind,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub recurrence: Recurrence,

    #[serde(default)]
    pub recurrence_end: Option<NaiveDate>,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            kind,
            category: None,
            date: Some(date),
            recurrence: Recurrence::None,
            recurrence_end: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn repeating(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.recurrence_end = Some(end);
        self
    }
}
