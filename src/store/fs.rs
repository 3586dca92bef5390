// src/store/fs.rs
// JSON file primitives shared by the repositories: whole-file reads and
// temp-file + rename writes so a crashed write never leaves a half-written
// record behind.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use super::StoreError;

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and parse a JSON record. A missing file is `Ok(None)`; a file that
/// exists but does not parse is `Unreadable`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(path, e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StoreError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize a record to pretty JSON and replace the file atomically:
/// write a sibling temp file, fsync, then rename over the destination.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_err(parent, e))?;
    }

    let json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let temp_path = temp_sibling(path);
    let mut file = tokio::fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&temp_path)
        .await
        .map_err(|e| io_err(&temp_path, e))?;

    file.write_all(&json).await.map_err(|e| io_err(&temp_path, e))?;
    file.sync_all().await.map_err(|e| io_err(&temp_path, e))?;
    drop(file);

    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| io_err(path, e))
}

/// Delete a record. Returns false when the file was not there.
pub async fn remove(path: &Path) -> Result<bool, StoreError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_err(path, e)),
    }
}

/// File names in a store directory. A directory that does not exist yet is
/// an empty store, not an error.
pub async fn list_file_names(dir: &Path) -> Result<Vec<String>, StoreError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(dir, e)),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_err(dir, e))? {
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let pid = std::process::id();
    let mut tmp = path.to_path_buf();
    let suffix = format!("tmp.{}.{}", pid, ts);
    let new_ext = match path.extension().and_then(|e| e.to_str()) {
        Some(orig) => format!("{}.{}", orig, suffix),
        None => suffix,
    };
    tmp.set_extension(new_ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let got: Option<Vec<String>> = read_json(&dir.path().join("nope.json")).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("record.json");
        write_json(&path, &vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        let got: Option<Vec<String>> = read_json(&path).await.unwrap();
        assert_eq!(got.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let got: Result<Option<Vec<String>>, _> = read_json(&path).await;
        assert!(got.unwrap_err().is_unreadable());
    }

    #[tokio::test]
    async fn test_remove_reports_absence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.json");
        assert!(!remove(&path).await.unwrap());
        std::fs::write(&path, b"[]").unwrap();
        assert!(remove(&path).await.unwrap());
    }
}
