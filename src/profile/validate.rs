use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::auth::{AuthMethod, AuthParams};

const SCHEMES: [&str; 2] = ["https://", "http://"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("profile name must not be empty")]
    EmptyName,
    #[error("auth method is required")]
    MissingAuthMethod,
    #[error("unsupported auth method `{0}`. expected one of none, basic, key-header, key-query")]
    UnsupportedAuthMethod(String),
    #[error("`{method}` auth requires the `{param}` parameter")]
    MissingAuthParam {
        method: AuthMethod,
        param: &'static str,
    },
    #[error("`method` is reserved and cannot be passed as an auth parameter")]
    ReservedAuthParam,
    #[error("endpoint path is required")]
    MissingPath,
    #[error("endpoint method is required")]
    MissingMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    BaseMissingScheme,
    BaseWhitespace,
    BaseMissingDot,
    BaseTrailingSlash,
    PathMissingLeadingSlash,
    PathTrailingSlash,
    PathWhitespace,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Warning::BaseMissingScheme => "base url should start with https:// or http://",
            Warning::BaseWhitespace => "base url contains whitespace",
            Warning::BaseMissingDot => "base url host has no `.`",
            Warning::BaseTrailingSlash => "base url should not end with `/`",
            Warning::PathMissingLeadingSlash => "endpoint path should start with `/`",
            Warning::PathTrailingSlash => "endpoint path should not end with `/`",
            Warning::PathWhitespace => "endpoint path contains whitespace",
        };
        f.write_str(message)
    }
}

pub fn check_name(name: &str) -> Result<(), Rejection> {
    if name.trim().is_empty() {
        return Err(Rejection::EmptyName);
    }

    Ok(())
}

/// A base url never rejects; each broken rule yields exactly one warning.
pub fn check_base(base: &str) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let remainder = SCHEMES
        .iter()
        .find_map(|scheme| base.strip_prefix(scheme));
    if remainder.is_none() {
        warnings.push(Warning::BaseMissingScheme);
    }

    if base.chars().any(char::is_whitespace) {
        warnings.push(Warning::BaseWhitespace);
    }

    let host = host_portion(remainder.unwrap_or(base));
    if !host.contains('.') {
        warnings.push(Warning::BaseMissingDot);
    }

    if base.ends_with('/') {
        warnings.push(Warning::BaseTrailingSlash);
    }

    warnings
}

pub fn check_auth(method: &str, params: &AuthParams) -> Result<AuthMethod, Rejection> {
    let method = method.parse::<AuthMethod>()?;

    if params.contains_key("method") {
        return Err(Rejection::ReservedAuthParam);
    }

    for &param in method.required_params() {
        let present = params
            .get(param)
            .is_some_and(|value| !value.trim().is_empty());
        if !present {
            return Err(Rejection::MissingAuthParam { method, param });
        }
    }

    Ok(method)
}

/// Missing arguments reject; a malformed path only warns.
pub fn check_endpoint(path: &str, method: &str) -> Result<Vec<Warning>, Rejection> {
    if path.trim().is_empty() {
        return Err(Rejection::MissingPath);
    }

    if method.trim().is_empty() {
        return Err(Rejection::MissingMethod);
    }

    let mut warnings = Vec::new();
    if !path.starts_with('/') {
        warnings.push(Warning::PathMissingLeadingSlash);
    }

    if path.ends_with('/') {
        warnings.push(Warning::PathTrailingSlash);
    }

    if path.chars().any(char::is_whitespace) {
        warnings.push(Warning::PathWhitespace);
    }

    Ok(warnings)
}

fn host_portion(rest: &str) -> &str {
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}
