use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::settings::ExportLayout;
use crate::models::transaction::Transaction;

/// A downloadable text document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

/// Serializes transactions to comma-delimited text.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn header(&self, layout: ExportLayout) -> [&'static str; 5] {
        match layout {
            ExportLayout::DescriptionFirst => ["Date", "Description", "Category", "Type", "Amount"],
            ExportLayout::CategoryFirst => ["Date", "Category", "Description", "Type", "Amount"],
        }
    }

    /// CSV text: header row, then one row per transaction in the given order.
    /// Fields containing commas, quotes or newlines are quoted.
    pub fn to_csv(
        &self,
        transactions: &[Transaction],
        layout: ExportLayout,
    ) -> Result<String, CoreError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(self.header(layout))?;
        for t in transactions {
            let date = t.date.format("%Y-%m-%d").to_string();
            let category = t.category.as_deref().unwrap_or("");
            let amount = t.amount.to_string();
            let record = match layout {
                ExportLayout::DescriptionFirst => {
                    [date.as_str(), t.description.as_str(), category, t.kind.as_str(), amount.as_str()]
                }
                ExportLayout::CategoryFirst => {
                    [date.as_str(), category, t.description.as_str(), t.kind.as_str(), amount.as_str()]
                }
            };
            writer.write_record(record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::Export(format!("Failed to flush CSV: {e}")))?;
        String::from_utf8(bytes).map_err(|e| CoreError::Export(format!("CSV is not UTF-8: {e}")))
    }

    pub fn document(
        &self,
        transactions: &[Transaction],
        layout: ExportLayout,
        file_name: &str,
    ) -> Result<ExportDocument, CoreError> {
        Ok(ExportDocument {
            file_name: file_name.to_string(),
            mime_type: "text/csv".to_string(),
            contents: self.to_csv(transactions, layout)?,
        })
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
