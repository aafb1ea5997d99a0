use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub path: String,
    pub method: String,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
        }
    }

    pub fn matches(&self, path: &str, method: Option<&str>) -> bool {
        self.path == path
            && method.is_none_or(|method| self.method.eq_ignore_ascii_case(method))
    }
}
