use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;

/// Load a JSON file. A missing file is reported as `StorageError::NotFound`
/// keyed by its file name.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let body = match fs::read(path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound {
                key: file_key(path),
            });
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    Ok(serde_json::from_slice(&body)?)
}

/// Write a JSON file by filling a sibling temp file and renaming it over the
/// target, so readers see either the old array or the new one.
pub async fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    let tmp = tmp_path(path);

    let written = write_synced(&tmp, &body).await;
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }

    if let Err(source) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

async fn write_synced(path: &Path, body: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::File::create(path).await.map_err(StorageError::io(path))?;
    file.write_all(body).await.map_err(StorageError::io(path))?;
    file.sync_all().await.map_err(StorageError::io(path))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
