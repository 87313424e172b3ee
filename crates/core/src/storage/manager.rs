use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::chart::ChartStyle;
use crate::models::ledger::Ledger;
use crate::models::settings::Settings;

use super::blob::BlobStore;

/// High-level storage operations: load/save the ledger and the theme flag
/// to/from a blob store.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a ledger to its persisted form (a JSON array).
    pub fn ledger_to_bytes(ledger: &Ledger) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize transactions: {e}")))
    }

    /// Parse a persisted transaction array.
    pub fn ledger_from_bytes(data: &[u8]) -> Result<Ledger, CoreError> {
        serde_json::from_slice(data)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize transactions: {e}")))
    }

    /// Load the ledger. A missing blob is an empty ledger; a malformed one
    /// is an error so that saved data is never silently replaced.
    pub fn load_ledger(store: &dyn BlobStore, settings: &Settings) -> Result<Ledger, CoreError> {
        match store.read(&settings.transactions_key)? {
            Some(bytes) => {
                let ledger = Self::ledger_from_bytes(&bytes)?;
                debug!("Loaded {} transactions", ledger.len());
                Ok(ledger)
            }
            None => {
                debug!("No saved transactions under '{}'", settings.transactions_key);
                Ok(Ledger::default())
            }
        }
    }

    /// Rewrite the whole transaction blob.
    pub fn save_ledger(
        store: &mut dyn BlobStore,
        settings: &Settings,
        ledger: &Ledger,
    ) -> Result<(), CoreError> {
        let bytes = Self::ledger_to_bytes(ledger)?;
        store.write(&settings.transactions_key, &bytes)?;
        debug!("Saved {} transactions", ledger.len());
        Ok(())
    }

    /// Load the dark-mode flag. Missing or unreadable means light mode.
    pub fn load_dark_mode(store: &dyn BlobStore, settings: &Settings) -> Result<bool, CoreError> {
        let Some(bytes) = store.read(&settings.theme_key)? else {
            return Ok(false);
        };
        match serde_json::from_slice::<bool>(&bytes) {
            Ok(dark) => Ok(dark),
            Err(e) => {
                warn!("Ignoring malformed theme flag under '{}': {e}", settings.theme_key);
                Ok(false)
            }
        }
    }

    pub fn save_dark_mode(
        store: &mut dyn BlobStore,
        settings: &Settings,
        dark_mode: bool,
    ) -> Result<(), CoreError> {
        let bytes = serde_json::to_vec(&dark_mode)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize theme flag: {e}")))?;
        store.write(&settings.theme_key, &bytes)
    }

    /// Load the chart style. Missing or unreadable means line charts.
    pub fn load_chart_style(
        store: &dyn BlobStore,
        settings: &Settings,
    ) -> Result<ChartStyle, CoreError> {
        let Some(bytes) = store.read(&settings.chart_style_key)? else {
            return Ok(ChartStyle::default());
        };
        match serde_json::from_slice::<ChartStyle>(&bytes) {
            Ok(style) => Ok(style),
            Err(e) => {
                warn!(
                    "Ignoring malformed chart style under '{}': {e}",
                    settings.chart_style_key
                );
                Ok(ChartStyle::default())
            }
        }
    }

    pub fn save_chart_style(
        store: &mut dyn BlobStore,
        settings: &Settings,
        style: ChartStyle,
    ) -> Result<(), CoreError> {
        let bytes = serde_json::to_vec(&style)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize chart style: {e}")))?;
        store.write(&settings.chart_style_key, &bytes)
    }
}
