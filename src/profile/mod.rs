pub mod auth;
pub mod endpoint;
pub mod identifier;
pub mod validate;

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::store::{ProfileRecord, ProfileStore};

pub use auth::{Auth, AuthMethod, AuthParams};
pub use endpoint::Endpoint;
pub use identifier::Identifier;
pub use validate::{Rejection, Warning};

#[derive(Debug)]
pub struct Profile<S: ProfileStore> {
    name: String,
    identifier: Identifier,
    base: String,
    auth: Option<Auth>,
    endpoints: Vec<Endpoint>,
    warnings: Vec<Warning>,
    store: S,
}

impl<S: ProfileStore> Profile<S> {
    /// Opens the profile called `name`, creating it with `base` when the store
    /// has no record for it yet. An existing record wins over `base`.
    pub fn open(name: &str, base: &str, mut store: S) -> AppResult<Self> {
        validate::check_name(name).map_err(AppError::InvalidProfile)?;
        let name = name.trim();
        let identifier = Identifier::from_name(name);

        if let Some(record) = store.get(&identifier)? {
            debug!(profile = name, identifier = identifier.short(), "hydrated profile");
            return Ok(Self::hydrate(name, identifier, record, store));
        }

        let warnings = validate::check_base(base);
        report(name, &warnings);

        let record = ProfileRecord {
            name: name.to_string(),
            base: base.to_string(),
            auth: None,
            endpoints: Vec::new(),
        };
        store.put(&identifier, &record)?;
        info!(profile = name, identifier = identifier.short(), "created profile");

        Ok(Self {
            name: record.name,
            identifier,
            base: record.base,
            auth: None,
            endpoints: Vec::new(),
            warnings,
            store,
        })
    }

    pub fn load(name: &str, store: S) -> AppResult<Self> {
        validate::check_name(name).map_err(AppError::InvalidProfile)?;
        let name = name.trim();
        let identifier = Identifier::from_name(name);

        match store.get(&identifier)? {
            Some(record) => {
                debug!(profile = name, identifier = identifier.short(), "hydrated profile");
                Ok(Self::hydrate(name, identifier, record, store))
            }
            None => Err(AppError::ProfileNotFound(name.to_string())),
        }
    }

    fn hydrate(name: &str, identifier: Identifier, record: ProfileRecord, store: S) -> Self {
        Self {
            name: name.to_string(),
            identifier,
            base: record.base,
            auth: record.auth,
            endpoints: record.endpoints,
            warnings: Vec::new(),
            store,
        }
    }

    pub fn set_auth(&mut self, method: &str, params: AuthParams) -> AppResult<()> {
        let method = validate::check_auth(method, &params).map_err(AppError::InvalidAuth)?;

        let mut candidate = self.record();
        candidate.auth = Some(Auth { method, params });
        self.commit(candidate)?;

        debug!(profile = %self.name, %method, "auth updated");
        Ok(())
    }

    /// Appends an endpoint. Duplicates are kept; path warnings never block the append.
    pub fn add_endpoint(&mut self, path: &str, method: &str) -> AppResult<Vec<Warning>> {
        let warnings = validate::check_endpoint(path, method).map_err(AppError::InvalidEndpoint)?;
        report(&self.name, &warnings);

        let mut candidate = self.record();
        candidate.endpoints.push(Endpoint::new(path, method));
        self.commit(candidate)?;

        debug!(profile = %self.name, path, method, "endpoint added");
        Ok(warnings)
    }

    pub fn set_base(&mut self, base: &str) -> AppResult<Vec<Warning>> {
        let warnings = validate::check_base(base);
        report(&self.name, &warnings);

        let mut candidate = self.record();
        candidate.base = base.to_string();
        self.commit(candidate)?;

        debug!(profile = %self.name, base, "base updated");
        Ok(warnings)
    }

    fn commit(&mut self, candidate: ProfileRecord) -> AppResult<()> {
        self.store.put(&self.identifier, &candidate)?;

        let ProfileRecord {
            base,
            auth,
            endpoints,
            ..
        } = candidate;
        self.base = base;
        self.auth = auth;
        self.endpoints = endpoints;
        Ok(())
    }

    pub fn record(&self) -> ProfileRecord {
        ProfileRecord {
            name: self.name.clone(),
            base: self.base.clone(),
            auth: self.auth.clone(),
            endpoints: self.endpoints.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn close(mut self) -> AppResult<()> {
        self.store.close()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn report(profile: &str, warnings: &[Warning]) {
    for warning in warnings {
        warn!(profile, "{warning}");
    }
}
