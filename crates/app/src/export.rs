use std::borrow::Cow;
use std::io::Write;

use serde::{Deserialize, Serialize};
use watch_core::StoredRecord;

use crate::error::Result;

pub const CSV_HEADER: [&str; 10] = [
    "id",
    "timestamp",
    "session_id",
    "message_id",
    "model",
    "input",
    "output",
    "cached",
    "thought",
    "total",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// JSON shape of one exported record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub timestamp: String,
    pub session_id: String,
    pub message_id: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cached_tokens: u64,
    pub thought_tokens: u64,
    pub total_tokens: u64,
}

impl From<&StoredRecord> for ExportRow {
    fn from(row: &StoredRecord) -> Self {
        let record = &row.record;
        Self {
            timestamp: record.timestamp.clone(),
            session_id: record.session_id.clone(),
            message_id: record.message_id.clone(),
            model: record.model.clone(),
            input_tokens: record.usage.input_tokens,
            output_tokens: record.usage.output_tokens,
            cached_tokens: record.usage.cached_tokens,
            thought_tokens: record.usage.thought_tokens,
            total_tokens: record.usage.total_tokens,
        }
    }
}

pub fn export_file_name(stamp: &str, format: ExportFormat) -> String {
    format!("export_{}.{}", stamp, format.extension())
}

pub fn write_json<W: Write>(mut writer: W, rows: &[StoredRecord]) -> Result<()> {
    let rows = rows.iter().map(ExportRow::from).collect::<Vec<_>>();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(mut writer: W, rows: &[StoredRecord]) -> Result<()> {
    writeln!(writer, "{}", CSV_HEADER.join(","))?;
    for row in rows {
        let record = &row.record;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{}",
            row.id,
            csv_field(&record.timestamp),
            csv_field(&record.session_id),
            csv_field(&record.message_id),
            csv_field(&record.model),
            record.usage.input_tokens,
            record.usage.output_tokens,
            record.usage.cached_tokens,
            record.usage.thought_tokens,
            record.usage.total_tokens
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
