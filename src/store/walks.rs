// src/store/walks.rs
// Walk logs are stored as plain JSON arrays (oldest first) and re-bounded
// through WalkLog on every read, so the on-disk format stays what it
// always was while the eviction policy lives in one type.

use std::path::PathBuf;

use tracing::warn;

use super::{StoreError, fs};
use crate::domain::{CageId, WalkEvent, WalkLog};

/// Cage-level walk log, one file per cage.
#[derive(Debug, Clone)]
pub struct CageWalkStore {
    dir: PathBuf,
    capacity: usize,
}

impl CageWalkStore {
    pub fn new(data_dir: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            dir: data_dir.into().join("cage_walks"),
            capacity,
        }
    }

    fn path(&self, cage: CageId) -> PathBuf {
        self.dir.join(format!("cage_{cage}_walks.json"))
    }

    pub async fn get(&self, cage: CageId) -> Result<Option<WalkLog>, StoreError> {
        let events: Option<Vec<WalkEvent>> = fs::read_json(&self.path(cage)).await?;
        Ok(events.map(|events| WalkLog::from_events(events, self.capacity)))
    }

    pub async fn put(&self, cage: CageId, log: &WalkLog) -> Result<(), StoreError> {
        let events: Vec<&WalkEvent> = log.iter().collect();
        fs::write_json(&self.path(cage), &events).await
    }

    pub async fn delete(&self, cage: CageId) -> Result<bool, StoreError> {
        fs::remove(&self.path(cage)).await
    }

    pub fn empty_log(&self) -> WalkLog {
        WalkLog::with_capacity(self.capacity)
    }
}

/// Per-dog walk log, keyed by (cage, dog).
#[derive(Debug, Clone)]
pub struct DogWalkStore {
    dir: PathBuf,
    capacity: usize,
}

impl DogWalkStore {
    pub fn new(data_dir: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            dir: data_dir.into().join("cage_dog_walks"),
            capacity,
        }
    }

    fn path(&self, cage: CageId, dog_id: &str) -> PathBuf {
        self.dir.join(format!("cage_{cage}_dog_{dog_id}_walks.json"))
    }

    fn decode_key(file_name: &str) -> Option<(CageId, String)> {
        let raw = file_name
            .strip_prefix("cage_")?
            .strip_suffix("_walks.json")?;
        let (cage_part, dog_part) = raw.split_once("_dog_")?;
        let cage = CageId::new(cage_part.parse().ok()?).ok()?;
        if dog_part.is_empty() {
            return None;
        }
        Some((cage, dog_part.to_string()))
    }

    pub async fn get(&self, cage: CageId, dog_id: &str) -> Result<Option<WalkLog>, StoreError> {
        let events: Option<Vec<WalkEvent>> = fs::read_json(&self.path(cage, dog_id)).await?;
        Ok(events.map(|events| WalkLog::from_events(events, self.capacity)))
    }

    pub async fn put(&self, cage: CageId, dog_id: &str, log: &WalkLog) -> Result<(), StoreError> {
        let events: Vec<&WalkEvent> = log.iter().collect();
        fs::write_json(&self.path(cage, dog_id), &events).await
    }

    pub async fn delete(&self, cage: CageId, dog_id: &str) -> Result<bool, StoreError> {
        fs::remove(&self.path(cage, dog_id)).await
    }

    pub fn empty_log(&self) -> WalkLog {
        WalkLog::with_capacity(self.capacity)
    }

    /// Every readable dog walk log. Same containment rules as the roster
    /// scan: foreign names ignored, unreadable files logged and skipped.
    pub async fn list(&self) -> Result<Vec<(CageId, String, WalkLog)>, StoreError> {
        let mut logs = Vec::new();
        for name in fs::list_file_names(&self.dir).await? {
            let Some((cage, dog_id)) = Self::decode_key(&name) else {
                continue;
            };
            match self.get(cage, &dog_id).await {
                Ok(Some(log)) => logs.push((cage, dog_id, log)),
                Ok(None) => {}
                Err(e) => warn!(%cage, %dog_id, "skipping unreadable walk log: {e}"),
            }
        }
        Ok(logs)
    }
}
