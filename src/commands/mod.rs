pub mod auth;
pub mod call;
pub mod endpoint;
pub mod profile;

use serde::Serialize;

use crate::profile::{Auth, Endpoint, Identifier, Warning};
use crate::store::ProfileRecord;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub identifier: Identifier,
    pub base: String,
    pub auth: Option<Auth>,
    pub endpoints: Vec<Endpoint>,
}

impl ProfileView {
    pub fn new(identifier: Identifier, record: ProfileRecord) -> Self {
        Self {
            name: record.name,
            identifier,
            base: record.base,
            auth: record.auth,
            endpoints: record.endpoints,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeView {
    pub profile: ProfileView,
    pub warnings: Vec<String>,
    pub note: String,
}

impl ChangeView {
    pub fn new(profile: ProfileView, warnings: &[Warning], note: impl Into<String>) -> Self {
        Self {
            profile,
            warnings: warnings.iter().map(ToString::to_string).collect(),
            note: note.into(),
        }
    }
}

/// Auth summary for text output. Parameter values are never printed.
fn describe_auth(auth: Option<&Auth>) -> String {
    let Some(auth) = auth else {
        return "(not set)".to_string();
    };

    if auth.params.is_empty() {
        return auth.method.to_string();
    }

    let keys = auth.params.keys().map(String::as_str).collect::<Vec<_>>();
    format!("{} ({})", auth.method, keys.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AuthMethod;

    #[test]
    fn auth_summary_hides_values() {
        let auth = Auth {
            method: AuthMethod::KeyHeader,
            params: [("key", "testkey"), ("name", "test")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };

        let summary = describe_auth(Some(&auth));
        assert_eq!(summary, "key-header (key, name)");
        assert!(!summary.contains("testkey"));
    }

    #[test]
    fn missing_auth_is_reported() {
        assert_eq!(describe_auth(None), "(not set)");
    }
}
