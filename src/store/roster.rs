// src/store/roster.rs

use std::path::PathBuf;

use tracing::warn;

use super::{StoreError, fs};
use crate::domain::{CageId, Dog};

/// Per-cage dog roster, one JSON array per cage.
#[derive(Debug, Clone)]
pub struct RosterStore {
    dir: PathBuf,
}

impl RosterStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: data_dir.into().join("cage_dogs"),
        }
    }

    fn path(&self, cage: CageId) -> PathBuf {
        self.dir.join(format!("cage_{cage}_dogs.json"))
    }

    fn decode_key(file_name: &str) -> Option<CageId> {
        let raw = file_name
            .strip_prefix("cage_")?
            .strip_suffix("_dogs.json")?;
        CageId::new(raw.parse().ok()?).ok()
    }

    pub async fn get(&self, cage: CageId) -> Result<Option<Vec<Dog>>, StoreError> {
        fs::read_json(&self.path(cage)).await
    }

    pub async fn put(&self, cage: CageId, dogs: &[Dog]) -> Result<(), StoreError> {
        fs::write_json(&self.path(cage), &dogs).await
    }

    pub async fn delete(&self, cage: CageId) -> Result<bool, StoreError> {
        fs::remove(&self.path(cage)).await
    }

    /// Every readable roster in the store. Files with foreign names are
    /// ignored; files that fail to parse are logged and skipped so one bad
    /// record cannot poison a full scan.
    pub async fn list(&self) -> Result<Vec<(CageId, Vec<Dog>)>, StoreError> {
        let mut rosters = Vec::new();
        for name in fs::list_file_names(&self.dir).await? {
            let Some(cage) = Self::decode_key(&name) else {
                continue;
            };
            match self.get(cage).await {
                Ok(Some(dogs)) => rosters.push((cage, dogs)),
                Ok(None) => {}
                Err(e) => warn!(%cage, "skipping unreadable roster: {e}"),
            }
        }
        Ok(rosters)
    }
}
