#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use watch_core::{UsageRecord, UsageTotals};
use watch_db::Db;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let db = Db::open(&path).expect("open db");
    db.initialize().expect("initialize db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn usage(input: u64, output: u64, cached: u64, thought: u64) -> UsageTotals {
    UsageTotals {
        input_tokens: input,
        output_tokens: output,
        cached_tokens: cached,
        thought_tokens: thought,
        total_tokens: input + output + thought,
    }
}

pub fn make_record(
    session_id: &str,
    message_id: &str,
    timestamp: &str,
    model: &str,
    usage: UsageTotals,
) -> UsageRecord {
    UsageRecord {
        session_id: session_id.to_string(),
        message_id: message_id.to_string(),
        timestamp: timestamp.to_string(),
        model: model.to_string(),
        usage,
    }
}
