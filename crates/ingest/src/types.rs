use serde::Serialize;

/// Summary returned after a sync pass over the Gemini session logs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub records_parsed: usize,
    pub records_inserted: usize,
    pub issues: Vec<IngestIssue>,
}

/// Non-fatal issues encountered during sync.
#[derive(Debug, Clone, Serialize)]
pub struct IngestIssue {
    pub file_path: String,
    pub message: String,
}

/// Why a session file produced no records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{file_path}: {reason}")]
pub struct ParseFailure {
    pub file_path: String,
    pub reason: String,
}

impl From<ParseFailure> for IngestIssue {
    fn from(failure: ParseFailure) -> Self {
        Self {
            file_path: failure.file_path,
            message: failure.reason,
        }
    }
}

/// Errors emitted by the sync pipeline. Only the store can fail a sync.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("db error: {0}")]
    Db(#[from] watch_db::DbError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
