use std::path::PathBuf;

use crate::api::ApiClient;
use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::output::Output;
use crate::profile::Profile;
use crate::store::{FileStore, StoreTarget};

#[derive(Debug)]
pub struct AppContext {
    pub profile: String,
    pub paths: AppPaths,
    pub settings: Settings,
    pub store_path: PathBuf,
    pub api_client: ApiClient,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(
        profile: Option<String>,
        target: StoreTarget,
        json: bool,
    ) -> AppResult<Self> {
        let paths = AppPaths::discover()?;
        Self::with_paths(paths, profile, target, json)
    }

    pub fn with_paths(
        paths: AppPaths,
        profile: Option<String>,
        target: StoreTarget,
        json: bool,
    ) -> AppResult<Self> {
        let settings = config::load_settings(&paths)?;
        let profile = config::resolve_profile(profile.as_deref(), &settings);
        let store_path = target.resolve(&paths, &settings);
        let api_client = ApiClient::new(settings.user_agent())?;
        let output = Output::new(json);

        Ok(Self {
            profile,
            paths,
            settings,
            store_path,
            api_client,
            output,
        })
    }

    pub fn open_store(&self) -> AppResult<FileStore> {
        FileStore::open(&self.store_path)
    }

    pub fn open_profile(&self, base: &str) -> AppResult<Profile<FileStore>> {
        Profile::open(&self.profile, base, self.open_store()?)
    }

    pub fn load_profile(&self) -> AppResult<Profile<FileStore>> {
        Profile::load(&self.profile, self.open_store()?)
    }
}
