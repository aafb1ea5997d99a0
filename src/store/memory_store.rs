use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::profile::Identifier;

use super::{ProfileRecord, ProfileStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<Identifier, ProfileRecord>,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> AppResult<()> {
        if self.closed {
            return Err(AppError::Store("memory store is closed".to_string()));
        }

        Ok(())
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, id: &Identifier) -> AppResult<Option<ProfileRecord>> {
        self.ensure_open()?;
        Ok(self.records.get(id).cloned())
    }

    fn put(&mut self, id: &Identifier, record: &ProfileRecord) -> AppResult<()> {
        self.ensure_open()?;
        self.records.insert(id.clone(), record.clone());
        Ok(())
    }

    fn remove(&mut self, id: &Identifier) -> AppResult<bool> {
        self.ensure_open()?;
        Ok(self.records.remove(id).is_some())
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
        self.closed = true;
        Ok(())
    }
}
