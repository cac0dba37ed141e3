use rusqlite::{Statement, params};
use watch_core::{StoredRecord, UsageRecord};

use crate::Db;
use crate::error::Result;
use crate::helpers::{RECORD_COLUMNS, row_to_stored_record};

const INSERT_RECORD: &str = r#"
    INSERT OR IGNORE INTO usage_record (
      timestamp, session_id, message_id, model, input_tokens, output_tokens,
      cached_tokens, thought_tokens, total_tokens
    ) VALUES (
      ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9
    )
"#;

impl Db {
    /// Stores the record unless its `(session_id, message_id)` already exists.
    /// Returns whether a row was written; an existing row is left untouched.
    pub fn insert_if_absent(&self, record: &UsageRecord) -> Result<bool> {
        let mut stmt = self.conn.prepare_cached(INSERT_RECORD)?;
        Ok(execute_insert(&mut stmt, record)? > 0)
    }

    pub fn insert_records(&mut self, records: &[UsageRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(INSERT_RECORD)?;
            for record in records {
                if execute_insert(&mut stmt, record)? > 0 {
                    inserted += 1;
                }
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Most recent records first; ISO-8601 timestamps sort lexicographically.
    pub fn query_recent(&self, limit: u32) -> Result<Vec<StoredRecord>> {
        let sql = format!(
            "SELECT {} FROM usage_record ORDER BY timestamp DESC, id DESC LIMIT ?1",
            RECORD_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], row_to_stored_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn count_records(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM usage_record", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

fn execute_insert(stmt: &mut Statement<'_>, record: &UsageRecord) -> Result<usize> {
    Ok(stmt.execute(params![
        record.timestamp,
        record.session_id,
        record.message_id,
        record.model,
        to_sql_count(record.usage.input_tokens),
        to_sql_count(record.usage.output_tokens),
        to_sql_count(record.usage.cached_tokens),
        to_sql_count(record.usage.thought_tokens),
        to_sql_count(record.usage.total_tokens),
    ])?)
}

/// SQLite integers are signed; counts past `i64::MAX` are stored clamped.
fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
