use std::path::Path;
use std::time::Instant;

use watch_db::Db;

use crate::parser::parse_session_file;
use crate::scanner::SessionScanner;
use crate::types::{IngestIssue, Result, SyncStats};

/// Ingests every session log under `gemini_home` into the store.
///
/// Each file is parsed on its own; a file that cannot be read or parsed is
/// recorded in [`SyncStats::issues`] and the sync moves on. Records already in
/// the store are skipped, so running this repeatedly is safe and returns zero
/// new records when nothing changed. Only store failures abort the sync.
pub fn sync_gemini_home(db: &mut Db, gemini_home: &Path) -> Result<SyncStats> {
    let started = Instant::now();
    db.initialize()?;

    let mut stats = SyncStats::default();
    let files = SessionScanner::new(gemini_home).discover();
    for path in files {
        stats.files_scanned += 1;
        let records = match parse_session_file(&path) {
            Ok(records) => records,
            Err(failure) => {
                tracing::debug!(
                    file = %failure.file_path,
                    reason = %failure.reason,
                    "skipping session log"
                );
                stats.files_skipped += 1;
                stats.issues.push(IngestIssue::from(failure));
                continue;
            }
        };
        stats.records_parsed += records.len();
        stats.records_inserted += db.insert_records(&records)?;
    }

    tracing::info!(
        files = stats.files_scanned,
        skipped = stats.files_skipped,
        parsed = stats.records_parsed,
        inserted = stats.records_inserted,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sync finished"
    );
    Ok(stats)
}
