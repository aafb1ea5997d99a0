use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "ergal";
const HOME_ENV: &str = "ERGAL_HOME";
const STORE_FILE: &str = "ergal.json";
const TEST_STORE_FILE: &str = "ergal_test.json";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppPaths {
    /// Resolves the platform config and data directories, or `$ERGAL_HOME`
    /// for both when it is set.
    pub fn discover() -> AppResult<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return Self::at(home);
        }

        let config_root = dirs::config_dir()
            .ok_or_else(|| AppError::Config("unable to resolve config directory".to_string()))?;
        let data_root = dirs::data_dir()
            .ok_or_else(|| AppError::Config("unable to resolve data directory".to_string()))?;

        Self::with_dirs(config_root.join(APP_DIR), data_root.join(APP_DIR))
    }

    pub fn at(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        Self::with_dirs(root.clone(), root)
    }

    fn with_dirs(config_dir: PathBuf, data_dir: PathBuf) -> AppResult<Self> {
        fs::create_dir_all(&config_dir)?;
        fs::create_dir_all(&data_dir)?;

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    pub fn test_store_file(&self) -> PathBuf {
        self.data_dir.join(TEST_STORE_FILE)
    }
}
