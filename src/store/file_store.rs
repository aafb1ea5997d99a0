use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::profile::Identifier;

use super::{ProfileRecord, ProfileStore};

const STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    profiles: BTreeMap<Identifier, ProfileRecord>,
}

/// JSON file holding every profile, guarded by a `.lock` sibling until close or drop.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    records: BTreeMap<Identifier, ProfileRecord>,
    locked: bool,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_path = lock_path_for(&path);
        acquire_lock(&path, &lock_path)?;

        let records = match read_records(&path) {
            Ok(records) => records,
            Err(err) => {
                let _ = fs::remove_file(&lock_path);
                return Err(err);
            }
        };
        debug!(path = %path.display(), profiles = records.len(), "opened profile store");

        Ok(Self {
            path,
            lock_path,
            records,
            locked: true,
        })
    }

    fn ensure_open(&self) -> AppResult<()> {
        if !self.locked {
            return Err(AppError::Store(format!(
                "{} has already been closed",
                self.path.display()
            )));
        }

        Ok(())
    }

    fn flush(&self, records: &BTreeMap<Identifier, ProfileRecord>) -> AppResult<()> {
        write_records(&self.path, records)?;
        debug!(path = %self.path.display(), profiles = records.len(), "wrote profile store");
        Ok(())
    }

    fn release(&mut self) -> AppResult<()> {
        if !self.locked {
            return Ok(());
        }

        self.locked = false;
        match fs::remove_file(&self.lock_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl ProfileStore for FileStore {
    fn get(&self, id: &Identifier) -> AppResult<Option<ProfileRecord>> {
        self.ensure_open()?;
        Ok(self.records.get(id).cloned())
    }

    fn put(&mut self, id: &Identifier, record: &ProfileRecord) -> AppResult<()> {
        self.ensure_open()?;

        let mut candidate = self.records.clone();
        candidate.insert(id.clone(), record.clone());
        self.flush(&candidate)?;
        self.records = candidate;
        Ok(())
    }

    fn remove(&mut self, id: &Identifier) -> AppResult<bool> {
        self.ensure_open()?;

        if !self.records.contains_key(id) {
            return Ok(false);
        }

        let mut candidate = self.records.clone();
        candidate.remove(id);
        self.flush(&candidate)?;
        self.records = candidate;
        Ok(true)
    }

    fn list(&self) -> AppResult<Vec<(Identifier, ProfileRecord)>> {
        self.ensure_open()?;
        Ok(self
            .records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect())
    }

    fn close(&mut self) -> AppResult<()> {
        self.release()?;
        debug!(path = %self.path.display(), "closed profile store");
        Ok(())
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(path = %self.lock_path.display(), "failed to release store lock: {err}");
        }
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(".lock");
    PathBuf::from(raw)
}

fn acquire_lock(path: &Path, lock_path: &Path) -> AppResult<()> {
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            writeln!(file, "{}", std::process::id())?;
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            Err(AppError::StoreLocked(path.to_path_buf()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Writes a sibling temp file and renames it over `path`, so readers see the
/// old document or the new one, never a truncated mix.
fn write_records(path: &Path, records: &BTreeMap<Identifier, ProfileRecord>) -> AppResult<()> {
    let file = StoreFile {
        version: STORE_VERSION,
        profiles: records.clone(),
    };
    let payload = serde_json::to_vec_pretty(&file)?;

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    temp.write_all(&payload)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

fn read_records(path: &Path) -> AppResult<BTreeMap<Identifier, ProfileRecord>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let file: StoreFile = serde_json::from_str(&raw)?;
    if file.version != STORE_VERSION {
        return Err(AppError::Store(format!(
            "{} has unsupported store version {} (expected {STORE_VERSION})",
            path.display(),
            file.version
        )));
    }

    Ok(file.profiles)
}
