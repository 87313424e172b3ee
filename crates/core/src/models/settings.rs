use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Column order of the CSV export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportLayout {
    /// `Date,Description,Category,Type,Amount`
    #[default]
    DescriptionFirst,
    /// `Date,Category,Description,Type,Amount`
    CategoryFirst,
}

/// Host-supplied configuration. Every field has a default, so a partial
/// JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Blob store key holding the serialized transaction array.
    pub transactions_key: String,

    /// Blob store key holding the dark-mode flag.
    pub theme_key: String,

    /// Blob store key holding the chart style ("line" or "bar").
    pub chart_style_key: String,

    /// Prefix for formatted amounts (e.g., "$", "€").
    pub currency_symbol: String,

    /// How far past "today" the projected balance looks.
    pub projection_days: u32,

    pub export_layout: ExportLayout,

    /// Suggested file name for the CSV download.
    pub export_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transactions_key: "transactions".to_string(),
            theme_key: "darkMode".to_string(),
            chart_style_key: "chartType".to_string(),
            currency_symbol: "$".to_string(),
            projection_days: 30,
            export_layout: ExportLayout::DescriptionFirst,
            export_file_name: "transactions.csv".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
