use std::fs;
use std::path::Path;

use ingest::sync_gemini_home;
use tempfile::tempdir;
use watch_db::Db;

fn write_session(home: &Path, dir: &str, name: &str, contents: &str) {
    let chats = home.join("tmp").join(dir).join("chats");
    fs::create_dir_all(&chats).expect("create chats dir");
    fs::write(chats.join(name), contents).expect("write session");
}

fn session(session_id: &str, message_ids: &[&str]) -> String {
    let messages = message_ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            format!(
                r#"{{"type":"user","id":"u-{id}","timestamp":"2025-06-01T10:{index:02}:00Z"}},
{{"type":"gemini","id":"{id}","timestamp":"2025-06-01T10:{index:02}:30Z","model":"gemini-2.5-pro","tokens":{{"input":10,"output":5,"cached":2,"thoughts":1,"total":16}}}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!(r#"{{"sessionId":"{session_id}","messages":[{messages}]}}"#)
}

fn open_db(dir: &Path) -> Db {
    Db::open(dir.join("store/geminiwatch.sqlite")).expect("open db")
}

#[test]
fn sync_is_idempotent() {
    let dir = tempdir().expect("temp dir");
    let home = dir.path().join("gemini");
    write_session(&home, "p1", "session-a.json", &session("a", &["m1", "m2"]));
    write_session(&home, "p2", "session-b.json", &session("b", &["m1"]));
    let mut db = open_db(dir.path());

    let first = sync_gemini_home(&mut db, &home).expect("first sync");
    let second = sync_gemini_home(&mut db, &home).expect("second sync");

    assert_eq!(first.files_scanned, 2);
    assert_eq!(first.records_inserted, 3);
    assert_eq!(second.records_parsed, 3);
    assert_eq!(second.records_inserted, 0);
    assert_eq!(db.count_records().expect("count"), 3);
}

#[test]
fn corrupt_file_does_not_block_other_files() {
    let dir = tempdir().expect("temp dir");
    let home = dir.path().join("gemini");
    write_session(&home, "p1", "session-1.json", &session("first", &["m1"]));
    write_session(
        &home,
        "p2",
        "session-2.json",
        r#"{"sessionId":"second","messages":[{"type":"gemini","id":"m1","#,
    );
    write_session(&home, "p3", "session-3.json", &session("third", &["m1", "m2"]));
    let mut db = open_db(dir.path());

    let stats = sync_gemini_home(&mut db, &home).expect("sync");

    assert_eq!(stats.files_scanned, 3);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.records_inserted, 3);
    assert_eq!(stats.issues.len(), 1);
    assert!(stats.issues[0].file_path.ends_with("session-2.json"));
    let sessions: Vec<String> = db
        .query_recent(10)
        .expect("recent")
        .into_iter()
        .map(|row| row.record.session_id)
        .collect();
    assert!(!sessions.contains(&"second".to_string()));
}

#[test]
fn new_messages_appended_to_a_session_are_picked_up() {
    let dir = tempdir().expect("temp dir");
    let home = dir.path().join("gemini");
    write_session(&home, "p1", "session-a.json", &session("a", &["m1"]));
    let mut db = open_db(dir.path());
    sync_gemini_home(&mut db, &home).expect("first sync");

    write_session(&home, "p1", "session-a.json", &session("a", &["m1", "m2", "m3"]));
    let stats = sync_gemini_home(&mut db, &home).expect("second sync");

    assert_eq!(stats.records_inserted, 2);
    assert_eq!(db.count_records().expect("count"), 3);
}

#[test]
fn missing_gemini_home_is_an_empty_sync() {
    let dir = tempdir().expect("temp dir");
    let mut db = open_db(dir.path());

    let stats = sync_gemini_home(&mut db, &dir.path().join("nowhere")).expect("sync");

    assert_eq!(stats.files_scanned, 0);
    assert_eq!(stats.records_inserted, 0);
    assert_eq!(db.count_records().expect("count"), 0);
}

#[test]
fn files_outside_the_session_layout_are_ignored() {
    let dir = tempdir().expect("temp dir");
    let home = dir.path().join("gemini");
    write_session(&home, "p1", "session-a.json", &session("a", &["m1"]));
    write_session(&home, "p1", "checkpoint-a.json", &session("x", &["m1"]));
    fs::write(home.join("session-root.json"), session("y", &["m1"])).expect("write root");
    let mut db = open_db(dir.path());

    let stats = sync_gemini_home(&mut db, &home).expect("sync");

    assert_eq!(stats.files_scanned, 1);
    assert_eq!(stats.records_inserted, 1);
}
