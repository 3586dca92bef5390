// src/store/mod.rs
// Typed flat-file repositories. Each store owns one directory under the
// data dir and is the only place its filename convention is known.

mod fs;
mod names;
mod roster;
mod walks;

pub use names::CageNameStore;
pub use roster::RosterStore;
pub use walks::{CageWalkStore, DogWalkStore};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unreadable record at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_unreadable(&self) -> bool {
        matches!(self, StoreError::Unreadable { .. })
    }
}
