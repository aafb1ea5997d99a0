use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use reqwest::{Client, Method, Request};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::profile::{Auth, AuthMethod, Endpoint};
use crate::store::ProfileRecord;

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
}

impl ApiClient {
    pub fn new(user_agent: &str) -> AppResult<Self> {
        let http = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { http })
    }

    pub fn with_http(http: Client) -> Self {
        Self { http }
    }

    pub fn build_request(&self, profile: &ProfileRecord, endpoint: &Endpoint) -> AppResult<Request> {
        let method = parse_method(&endpoint.method)?;
        let mut url = endpoint_url(&profile.base, &endpoint.path)?;

        if let Some(auth) = profile.auth.as_ref().filter(|auth| auth.method == AuthMethod::KeyQuery) {
            let (name, key) = key_pair(auth)?;
            url.query_pairs_mut().append_pair(name, key);
        }

        let mut request = self
            .http
            .request(method, url)
            .build()
            .map_err(reqwest::Error::without_url)?;
        if let Some((name, value)) = auth_header(profile.auth.as_ref())? {
            request.headers_mut().insert(name, value);
        }

        Ok(request)
    }

    pub async fn call(&self, profile: &ProfileRecord, endpoint: &Endpoint) -> AppResult<ApiResponse> {
        let request = self.build_request(profile, endpoint)?;
        let method = request.method().to_string();
        let url = redact_query(request.url(), profile.auth.as_ref());
        debug!(profile = %profile.name, %method, %url, "calling endpoint");

        // reqwest errors carry the full url, key-query secret included.
        let response = self
            .http
            .execute(request)
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        Ok(ApiResponse {
            method,
            url,
            status,
            body,
        })
    }
}

/// First endpoint on the profile matching `path` and, when given, `method`.
pub fn find_endpoint<'a>(
    profile: &'a ProfileRecord,
    path: &str,
    method: Option<&str>,
) -> AppResult<&'a Endpoint> {
    profile
        .endpoints
        .iter()
        .find(|endpoint| endpoint.matches(path, method))
        .ok_or_else(|| {
            let method = method.map(|method| format!(" {method}")).unwrap_or_default();
            AppError::InvalidInput(format!(
                "profile `{}` has no endpoint{method} {path}. run `ergal endpoint ls`",
                profile.name
            ))
        })
}

fn parse_method(raw: &str) -> AppResult<Method> {
    Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| AppError::InvalidInput(format!("`{raw}` is not a valid http method")))
}

fn endpoint_url(base: &str, path: &str) -> AppResult<Url> {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim();
    let joined = if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    };

    Ok(Url::parse(&joined)?)
}

fn key_pair(auth: &Auth) -> AppResult<(&str, &str)> {
    match (auth.param("name"), auth.param("key")) {
        (Some(name), Some(key)) => Ok((name, key)),
        _ => Err(AppError::Config(format!(
            "`{}` auth is missing its key or name",
            auth.method
        ))),
    }
}

fn auth_header(auth: Option<&Auth>) -> AppResult<Option<(HeaderName, HeaderValue)>> {
    let Some(auth) = auth else {
        return Ok(None);
    };

    match auth.method {
        AuthMethod::None | AuthMethod::KeyQuery => Ok(None),
        AuthMethod::Basic => {
            let username = auth.param("username").unwrap_or_default();
            let password = auth.param("password").unwrap_or_default();
            let encoded = STANDARD.encode(format!("{username}:{password}"));
            let mut value = header_value(&format!("Basic {encoded}"))?;
            value.set_sensitive(true);
            Ok(Some((AUTHORIZATION, value)))
        }
        AuthMethod::KeyHeader => {
            let (name, key) = key_pair(auth)?;
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                AppError::Config(format!("`{name}` is not a valid http header name"))
            })?;
            let mut value = header_value(key)?;
            value.set_sensitive(true);
            Ok(Some((name, value)))
        }
    }
}

fn header_value(raw: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(raw)
        .map_err(|_| AppError::Config("auth value is not a valid http header value".to_string()))
}

fn redact_query(url: &Url, auth: Option<&Auth>) -> String {
    let Some(name) = auth
        .filter(|auth| auth.method == AuthMethod::KeyQuery)
        .and_then(|auth| auth.param("name"))
    else {
        return url.to_string();
    };

    let mut redacted = url.clone();
    let pairs = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == name { "***".into() } else { value };
            (key.into_owned(), value.into_owned())
        })
        .collect::<Vec<_>>();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
