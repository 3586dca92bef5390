// src/state.rs

use std::path::Path;
use std::sync::Arc;

use crate::config::CONFIG;
use crate::media::{ObjectStore, PhotoPipeline};
use crate::store::{CageNameStore, CageWalkStore, DogWalkStore, RosterStore};

/// Everything the handlers need, shared behind an Arc.
pub struct AppState {
    pub rosters: RosterStore,
    pub cage_names: CageNameStore,
    pub cage_walks: CageWalkStore,
    pub dog_walks: DogWalkStore,
    pub photos: Arc<dyn ObjectStore>,
    pub pipeline: Arc<dyn PhotoPipeline>,
}

impl AppState {
    pub fn new(
        data_dir: &Path,
        photos: Arc<dyn ObjectStore>,
        pipeline: Arc<dyn PhotoPipeline>,
    ) -> Self {
        let capacity = CONFIG.walk_log_capacity;
        Self {
            rosters: RosterStore::new(data_dir),
            cage_names: CageNameStore::new(data_dir),
            cage_walks: CageWalkStore::new(data_dir, capacity),
            dog_walks: DogWalkStore::new(data_dir, capacity),
            photos,
            pipeline,
        }
    }
}
