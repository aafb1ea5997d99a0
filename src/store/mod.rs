pub mod file_store;
pub mod memory_store;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{AppPaths, Settings};
use crate::error::AppResult;
use crate::profile::{Auth, Endpoint, Identifier};

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub base: String,
    #[serde(default)]
    pub auth: Option<Auth>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

pub trait ProfileStore {
    fn get(&self, id: &Identifier) -> AppResult<Option<ProfileRecord>>;
    fn put(&mut self, id: &Identifier, record: &ProfileRecord) -> AppResult<()>;
    fn remove(&mut self, id: &Identifier) -> AppResult<bool>;
    fn list(&self) -> AppResult<Vec<(Identifier, ProfileRecord)>>;
    /// Releases the store. Any later call fails.
    fn close(&mut self) -> AppResult<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreTarget {
    #[default]
    Default,
    /// Disposable store kept apart from real profiles.
    Test,
    Path(PathBuf),
}

impl StoreTarget {
    pub fn from_flags(test: bool, path: Option<PathBuf>) -> Self {
        match (path, test) {
            (Some(path), _) => StoreTarget::Path(path),
            (None, true) => StoreTarget::Test,
            (None, false) => StoreTarget::Default,
        }
    }

    pub fn resolve(&self, paths: &AppPaths, settings: &Settings) -> PathBuf {
        match self {
            StoreTarget::Default => settings
                .store_path
                .clone()
                .unwrap_or_else(|| paths.store_file()),
            StoreTarget::Test => paths.test_store_file(),
            StoreTarget::Path(path) => path.clone(),
        }
    }
}
