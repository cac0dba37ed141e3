mod support;

use support::{make_record, setup_db, usage};
use watch_core::UsageTotals;
use watch_db::{Db, Window};

#[test]
fn duplicate_identity_keeps_first_written_values() {
    let test_db = setup_db();
    let db = &test_db.db;
    let first = make_record(
        "s1",
        "m1",
        "2024-01-01T10:00:00Z",
        "gemini-2.5-pro",
        usage(100, 50, 0, 0),
    );
    let second = make_record(
        "s1",
        "m1",
        "2024-01-01T10:00:00Z",
        "gemini-2.5-pro",
        usage(999, 999, 999, 999),
    );

    assert!(db.insert_if_absent(&first).expect("insert first"));
    assert!(!db.insert_if_absent(&second).expect("insert duplicate"));

    let rows = db.query_recent(10).expect("recent");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record, first);
}

#[test]
fn message_id_is_only_unique_within_a_session() {
    let test_db = setup_db();
    let db = &test_db.db;
    let a = make_record("s1", "m1", "2024-01-01T10:00:00Z", "m", usage(1, 1, 0, 0));
    let b = make_record("s2", "m1", "2024-01-01T10:00:00Z", "m", usage(1, 1, 0, 0));

    assert!(db.insert_if_absent(&a).expect("insert a"));
    assert!(db.insert_if_absent(&b).expect("insert b"));
    assert_eq!(db.count_records().expect("count"), 2);
}

#[test]
fn insert_records_counts_only_new_rows() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let batch = vec![
        make_record("s1", "m1", "2024-01-01T10:00:00Z", "m", usage(1, 1, 0, 0)),
        make_record("s1", "m2", "2024-01-01T10:01:00Z", "m", usage(2, 2, 0, 0)),
        make_record("s1", "m1", "2024-01-01T10:00:00Z", "m", usage(3, 3, 0, 0)),
    ];

    assert_eq!(db.insert_records(&batch).expect("first batch"), 2);
    assert_eq!(db.insert_records(&batch).expect("second batch"), 0);
    assert_eq!(db.insert_records(&[]).expect("empty batch"), 0);
    assert_eq!(db.count_records().expect("count"), 2);
}

#[test]
fn query_recent_orders_by_timestamp_descending() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let batch = vec![
        make_record("s1", "m1", "2024-01-02T09:00:00Z", "a", usage(1, 0, 0, 0)),
        make_record("s1", "m2", "2024-01-03T09:00:00Z", "b", usage(2, 0, 0, 0)),
        make_record("s2", "m1", "2024-01-01T09:00:00Z", "c", usage(3, 0, 0, 0)),
    ];
    db.insert_records(&batch).expect("insert");

    let rows = db.query_recent(2).expect("recent");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].record.timestamp, "2024-01-03T09:00:00Z");
    assert_eq!(rows[1].record.timestamp, "2024-01-02T09:00:00Z");
    assert!(rows[0].id > 0);
}

#[test]
fn initialize_is_idempotent_and_preserves_rows() {
    let test_db = setup_db();
    let record = make_record("s1", "m1", "2024-01-01T10:00:00Z", "m", usage(1, 1, 0, 0));
    test_db.db.insert_if_absent(&record).expect("insert");

    test_db.db.initialize().expect("initialize again");
    let reopened = Db::open(&test_db.path).expect("reopen");
    reopened.initialize().expect("initialize reopened");

    assert_eq!(reopened.count_records().expect("count"), 1);
}

#[test]
fn open_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested/data/store.sqlite");

    let db = Db::open(&path).expect("open nested");
    db.initialize().expect("initialize");

    assert!(path.exists());
    assert_eq!(db.count_records().expect("count"), 0);
}

#[test]
fn counts_beyond_sqlite_range_are_clamped_not_wrapped() {
    let test_db = setup_db();
    let huge = UsageTotals {
        input_tokens: u64::MAX,
        output_tokens: 7,
        cached_tokens: 0,
        thought_tokens: 0,
        total_tokens: u64::MAX,
    };
    let record = make_record("s1", "m1", "2024-01-01T10:00:00Z", "m", huge);
    test_db.db.insert_if_absent(&record).expect("insert");

    let stored = test_db.db.query_recent(1).expect("recent");
    let lifetime = test_db
        .db
        .query_aggregates(&Window::Lifetime)
        .expect("aggregate");

    assert_eq!(stored[0].record.usage.input_tokens, i64::MAX as u64);
    assert_eq!(stored[0].record.usage.total_tokens, i64::MAX as u64);
    assert_eq!(stored[0].record.usage.output_tokens, 7);
    assert_eq!(lifetime.sums.input_tokens, i64::MAX as u64);
}
