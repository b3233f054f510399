//! Export of income and expense records
//!
//! Supports:
//! - CSV with one row per record (`type,date,amount,description,wallet_id`)
//! - JSON array of the same rows

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::ExportRow;

/// CSV header, in column order
pub const CSV_HEADER: [&str; 5] = ["type", "date", "amount", "description", "wallet_id"];

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// MIME type for HTTP downloads
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    /// Render rows in this format
    pub fn render(&self, rows: &[ExportRow]) -> Result<String> {
        match self {
            Self::Csv => export_csv(rows),
            Self::Json => export_json(rows),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidData(format!(
                "Unknown export format: {} (expected csv or json)",
                other
            ))),
        }
    }
}

/// Write rows as CSV, amounts with two decimals
pub fn export_csv(rows: &[ExportRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for row in rows {
        writer.write_record([
            row.kind.as_str().to_string(),
            row.date.to_string(),
            format!("{:.2}", row.amount),
            row.description.clone(),
            row.wallet_id.map(|id| id.to_string()).unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

/// Write rows as a pretty-printed JSON array
pub fn export_json(rows: &[ExportRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
