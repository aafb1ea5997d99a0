use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::profile::Rejection;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid profile: {0}")]
    InvalidProfile(Rejection),
    #[error("auth configuration error: {0}")]
    InvalidAuth(Rejection),
    #[error("endpoint configuration error: {0}")]
    InvalidEndpoint(Rejection),
    #[error("profile `{0}` does not exist. run `ergal init --base <url>` first")]
    ProfileNotFound(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("store {} is locked by another handle", .0.display())]
    StoreLocked(PathBuf),
    #[error("api error: {0}")]
    Api(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}
