use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use jiff::civil::Date;
use tokio::fs;
use tracing::{debug, info};

use logylyzer_core::bucket_keys;
use logylyzer_core::models::record::AnalysisRecord;

use crate::error::StorageError;
use crate::json_file;

/// Filesystem store for analysis records.
///
/// Each (service, UTC day) bucket is a JSON array file under `root`. Appends
/// rewrite the whole array, so appends to the same bucket are serialized
/// through a per-bucket async lock. Appends to different buckets proceed
/// concurrently.
#[derive(Debug)]
pub struct RecordStore {
    root: PathBuf,
    bucket_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl RecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bucket_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Append a record to the bucket derived from its service name and the
    /// UTC date of its own timestamp. Returns the bucket file path.
    ///
    /// Creates the storage root and the bucket file on first use. An existing
    /// bucket that does not parse as a record array is left untouched and
    /// reported as a serialization error.
    pub async fn append(&self, record: AnalysisRecord) -> Result<PathBuf, StorageError> {
        bucket_keys::validate_service_name(&record.service_name)?;
        let file_name = bucket_keys::bucket_file_name(&record.service_name, record.bucket_date());

        let lock = self.bucket_lock(&file_name);
        let _guard = lock.lock().await;

        fs::create_dir_all(&self.root)
            .await
            .map_err(StorageError::io(&self.root))?;

        let path = self.root.join(&file_name);
        let mut entries: Vec<AnalysisRecord> = match json_file::load_json(&path).await {
            Ok(entries) => entries,
            Err(StorageError::NotFound { .. }) => Vec::new(),
            Err(e) => return Err(e),
        };

        entries.push(record);
        json_file::save_json(&path, &entries).await?;

        info!(path = %path.display(), entries = entries.len(), "analysis exported");
        Ok(path)
    }

    /// All records in one bucket, in append order.
    ///
    /// A bucket that was never written is `StorageError::NotFound`, never an
    /// empty list.
    pub async fn read_day(
        &self,
        service_name: &str,
        date: Date,
    ) -> Result<Vec<AnalysisRecord>, StorageError> {
        bucket_keys::validate_service_name(service_name)?;
        let path = self
            .root
            .join(bucket_keys::bucket_file_name(service_name, date));
        json_file::load_json(&path).await
    }

    /// Every service with at least one bucket, sorted.
    ///
    /// Never fails: an absent or unreadable root yields an empty set.
    pub async fn list_services(&self) -> BTreeSet<String> {
        self.scan_buckets()
            .await
            .into_iter()
            .map(|(service, _)| service)
            .collect()
    }

    /// Dates that have a bucket for `service_name`, oldest first.
    pub async fn list_dates(&self, service_name: &str) -> Result<Vec<Date>, StorageError> {
        bucket_keys::validate_service_name(service_name)?;
        let mut dates: Vec<Date> = self
            .scan_buckets()
            .await
            .into_iter()
            .filter(|(service, _)| service == service_name)
            .map(|(_, date)| date)
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    async fn scan_buckets(&self) -> Vec<(String, Date)> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) => {
                debug!(root = %self.root.display(), error = %e, "storage root not readable");
                return Vec::new();
            }
        };

        let mut buckets = Vec::new();
        loop {
            match dir.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name();
                    if let Some((service, date)) = name
                        .to_str()
                        .and_then(bucket_keys::parse_bucket_file_name)
                    {
                        buckets.push((service.to_string(), date));
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    debug!(root = %self.root.display(), error = %e, "stopped scanning storage root");
                    break;
                }
            }
        }
        buckets
    }

    fn bucket_lock(&self, file_name: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .bucket_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Drop locks nobody is holding or waiting on.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        locks
            .entry(file_name.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}
