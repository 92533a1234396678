//! Background persistence for analysis records.
//!
//! Request handlers hand records to a [`RecordWriter`] and return at once.
//! A single worker task drains a bounded queue into the [`RecordStore`];
//! failures are logged by the worker and also delivered to the optional
//! [`AppendHandle`]. When the queue is full the record is dropped with a
//! warning instead of blocking the submitter.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, warn};

use logylyzer_core::models::record::AnalysisRecord;

use crate::error::StorageError;
use crate::store::RecordStore;

/// Records that may wait for the worker before submissions are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

struct AppendJob {
    record: AnalysisRecord,
    done: oneshot::Sender<Result<PathBuf, StorageError>>,
}

#[derive(Debug, Clone)]
pub struct RecordWriter {
    tx: mpsc::Sender<AppendJob>,
}

/// Completion of one submitted append. Dropping it does not cancel the write.
#[derive(Debug)]
pub struct AppendHandle {
    rx: oneshot::Receiver<Result<PathBuf, StorageError>>,
}

impl AppendHandle {
    /// Wait for the append to finish and return the bucket path it wrote.
    pub async fn outcome(self) -> Result<PathBuf, StorageError> {
        self.rx.await.map_err(|_| StorageError::WorkerGone)?
    }
}

impl RecordWriter {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(store: Arc<RecordStore>) -> Self {
        Self::start(store).0
    }

    /// Like [`RecordWriter::spawn`], also returning the worker task. The task
    /// finishes once every `RecordWriter` clone is dropped and the queue is
    /// drained.
    pub fn start(store: Arc<RecordStore>) -> (Self, JoinHandle<()>) {
        Self::with_capacity(store, DEFAULT_QUEUE_CAPACITY)
    }

    /// Start the worker with room for `capacity` queued records.
    pub fn with_capacity(store: Arc<RecordStore>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let task = tokio::spawn(run(store, rx));
        (Self { tx }, task)
    }

    /// Queue a record for appending. Never waits: a full or closed queue
    /// drops the record and reports it through the handle.
    pub fn submit(&self, record: AnalysisRecord) -> AppendHandle {
        let (done, rx) = oneshot::channel();
        match self.tx.try_send(AppendJob { record, done }) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => {
                warn!(
                    service_name = %job.record.service_name,
                    "record writer queue full, dropping analysis record"
                );
                let _ = job.done.send(Err(StorageError::QueueFull));
            }
            Err(TrySendError::Closed(job)) => {
                warn!(
                    service_name = %job.record.service_name,
                    "record writer stopped, dropping analysis record"
                );
                let _ = job.done.send(Err(StorageError::WorkerGone));
            }
        }
        AppendHandle { rx }
    }
}

async fn run(store: Arc<RecordStore>, mut rx: mpsc::Receiver<AppendJob>) {
    while let Some(job) = rx.recv().await {
        let service_name = job.record.service_name.clone();
        let result = store.append(job.record).await;
        if let Err(e) = &result {
            error!(service_name = %service_name, error = %e, "failed to export analysis");
        }
        let _ = job.done.send(result);
    }
}
