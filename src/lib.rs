pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod output;
pub mod profile;
pub mod store;

use cli::Cli;
use error::AppResult;

pub use profile::{Auth, AuthMethod, AuthParams, Endpoint, Identifier, Profile, Rejection, Warning};
pub use store::{FileStore, MemoryStore, ProfileRecord, ProfileStore, StoreTarget};

pub async fn run(cli: Cli) -> AppResult<()> {
    app::run(cli).await
}
