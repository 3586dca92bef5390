// src/store/names.rs

use std::path::PathBuf;

use super::{StoreError, fs};
use crate::domain::{CageId, CageName};

/// Custom cage display names. Absence of a record means the cage goes by
/// its default numbered name.
#[derive(Debug, Clone)]
pub struct CageNameStore {
    dir: PathBuf,
}

impl CageNameStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: data_dir.into().join("cage_names"),
        }
    }

    fn path(&self, cage: CageId) -> PathBuf {
        self.dir.join(format!("cage_{cage}_name.json"))
    }

    pub async fn get(&self, cage: CageId) -> Result<Option<CageName>, StoreError> {
        fs::read_json(&self.path(cage)).await
    }

    pub async fn put(&self, cage: CageId, name: &CageName) -> Result<(), StoreError> {
        fs::write_json(&self.path(cage), name).await
    }

    pub async fn delete(&self, cage: CageId) -> Result<bool, StoreError> {
        fs::remove(&self.path(cage)).await
    }

    /// Display name with the default applied: used anywhere a cage is shown.
    pub async fn display_name(&self, cage: CageId) -> Result<String, StoreError> {
        Ok(match self.get(cage).await? {
            Some(record) if !record.name.is_empty() => record.name,
            _ => cage.default_name(),
        })
    }
}
