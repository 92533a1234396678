use std::sync::Arc;

use jiff::civil::date;
use tempfile::TempDir;

use logylyzer_core::models::analysis::AnalysisResult;
use logylyzer_core::models::record::AnalysisRecord;
use logylyzer_storage::error::StorageError;
use logylyzer_storage::store::RecordStore;
use logylyzer_storage::writer::RecordWriter;

fn record(service: &str, logs: &str) -> AnalysisRecord {
    AnalysisRecord::at(
        "2024-05-01T12:00:00Z".parse().unwrap(),
        service,
        None,
        AnalysisResult::fallback("raw"),
        logs,
    )
}

#[tokio::test]
async fn submitted_records_are_persisted_in_submission_order() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(RecordStore::new(dir.path()));
    let writer = RecordWriter::spawn(Arc::clone(&store));

    let first = writer.submit(record("auth", "one"));
    let second = writer.submit(record("auth", "two"));
    first.outcome().await.unwrap();
    let path = second.outcome().await.unwrap();
    assert_eq!(path, dir.path().join("auth-2024-05-01.json"));

    let entries = store.read_day("auth", date(2024, 5, 1)).await.unwrap();
    let logs: Vec<&str> = entries.iter().map(|e| e.original_logs.as_str()).collect();
    assert_eq!(logs, vec!["one", "two"]);
}

#[tokio::test]
async fn failures_reach_the_handle() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();
    let writer = RecordWriter::spawn(Arc::new(RecordStore::new(&blocker)));

    let err = writer.submit(record("auth", "x")).outcome().await.unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
}

#[tokio::test]
async fn dropped_handles_still_write() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(RecordStore::new(dir.path()));
    let writer = RecordWriter::spawn(Arc::clone(&store));

    drop(writer.submit(record("auth", "unobserved")));
    writer.submit(record("auth", "observed")).outcome().await.unwrap();

    let entries = store.read_day("auth", date(2024, 5, 1)).await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn worker_drains_queue_after_last_writer_drops() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(RecordStore::new(dir.path()));
    let (writer, task) = RecordWriter::start(Arc::clone(&store));

    for i in 0..5 {
        drop(writer.submit(record("billing", &format!("line {i}"))));
    }
    drop(writer);
    task.await.unwrap();

    let entries = store.read_day("billing", date(2024, 5, 1)).await.unwrap();
    assert_eq!(entries.len(), 5);
}

#[tokio::test]
async fn full_queue_drops_instead_of_waiting() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(RecordStore::new(dir.path()));
    let (writer, _task) = RecordWriter::with_capacity(Arc::clone(&store), 1);

    // The single-threaded test runtime has not polled the worker yet, so the
    // first record occupies the only slot.
    let queued = writer.submit(record("auth", "kept"));
    let overflow = writer.submit(record("auth", "dropped"));

    let err = overflow.outcome().await.unwrap_err();
    assert!(matches!(err, StorageError::QueueFull));
    queued.outcome().await.unwrap();

    let entries = store.read_day("auth", date(2024, 5, 1)).await.unwrap();
    let logs: Vec<&str> = entries.iter().map(|e| e.original_logs.as_str()).collect();
    assert_eq!(logs, vec!["kept"]);
}
