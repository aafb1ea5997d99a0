use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validate::Rejection;

pub type AuthParams = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMethod {
    None,
    Basic,
    KeyHeader,
    KeyQuery,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 4] = [
        AuthMethod::None,
        AuthMethod::Basic,
        AuthMethod::KeyHeader,
        AuthMethod::KeyQuery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AuthMethod::None => "none",
            AuthMethod::Basic => "basic",
            AuthMethod::KeyHeader => "key-header",
            AuthMethod::KeyQuery => "key-query",
        }
    }

    pub fn required_params(self) -> &'static [&'static str] {
        match self {
            AuthMethod::None => &[],
            AuthMethod::Basic => &["username", "password"],
            AuthMethod::KeyHeader | AuthMethod::KeyQuery => &["key", "name"],
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = Rejection;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Rejection::MissingAuthMethod);
        }

        AuthMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == raw)
            .ok_or_else(|| Rejection::UnsupportedAuthMethod(raw.to_string()))
    }
}

/// Authentication settings stored on a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
    pub method: AuthMethod,
    #[serde(flatten)]
    pub params: AuthParams,
}

impl Auth {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
