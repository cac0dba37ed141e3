use rusqlite::Row;
use rusqlite::types::ToSql;
use watch_core::{StoredRecord, TokenSums, UsageRecord, UsageTotals};

use crate::types::Window;

pub(crate) const RECORD_COLUMNS: &str = "id, timestamp, session_id, message_id, model, \
     input_tokens, output_tokens, cached_tokens, thought_tokens, total_tokens";

fn get_count(row: &Row<'_>, index: usize) -> std::result::Result<u64, rusqlite::Error> {
    Ok(row.get::<_, i64>(index)?.max(0) as u64)
}

pub(crate) fn row_to_stored_record(
    row: &Row<'_>,
) -> std::result::Result<StoredRecord, rusqlite::Error> {
    Ok(StoredRecord {
        id: row.get(0)?,
        record: UsageRecord {
            timestamp: row.get(1)?,
            session_id: row.get(2)?,
            message_id: row.get(3)?,
            model: row.get(4)?,
            usage: UsageTotals {
                input_tokens: get_count(row, 5)?,
                output_tokens: get_count(row, 6)?,
                cached_tokens: get_count(row, 7)?,
                thought_tokens: get_count(row, 8)?,
                total_tokens: get_count(row, 9)?,
            },
        },
    })
}

pub(crate) fn row_to_sums(row: &Row<'_>) -> std::result::Result<TokenSums, rusqlite::Error> {
    Ok(TokenSums {
        input_tokens: get_count(row, 0)?,
        output_tokens: get_count(row, 1)?,
        cached_tokens: get_count(row, 2)?,
        thought_tokens: get_count(row, 3)?,
    })
}

/// SQL predicate and bound parameters for a window.
pub(crate) fn window_clause(window: &Window) -> (&'static str, Vec<&dyn ToSql>) {
    match window {
        Window::Lifetime => ("1 = 1", Vec::new()),
        Window::Day(prefix) => (
            "substr(timestamp, 1, length(?1)) = ?1",
            vec![prefix as &dyn ToSql],
        ),
    }
}
