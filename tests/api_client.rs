use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ergal::api::{ApiClient, find_endpoint};
use ergal::error::AppError;
use ergal::{Auth, AuthMethod, Endpoint, ProfileRecord};

fn auth(method: AuthMethod, params: &[(&str, &str)]) -> Auth {
    Auth {
        method,
        params: params
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    }
}

fn profile(base: &str, auth: Option<Auth>) -> ProfileRecord {
    ProfileRecord {
        name: "test".to_string(),
        base: base.to_string(),
        auth,
        endpoints: vec![
            Endpoint::new("/users", "get"),
            Endpoint::new("/users", "post"),
        ],
    }
}

fn client() -> ApiClient {
    ApiClient::new("ergal-test").expect("client should build")
}

#[test]
fn key_header_auth_sets_named_header() {
    let profile = profile(
        "https://api.test.com",
        Some(auth(AuthMethod::KeyHeader, &[("key", "testkey"), ("name", "X-Api-Key")])),
    );
    let request = client()
        .build_request(&profile, &profile.endpoints[0])
        .expect("request should build");

    assert_eq!(request.method(), reqwest::Method::GET);
    assert_eq!(request.url().as_str(), "https://api.test.com/users");
    assert_eq!(
        request.headers().get("x-api-key").and_then(|v| v.to_str().ok()),
        Some("testkey")
    );
}

#[test]
fn key_query_auth_appends_query_pair() {
    let profile = profile(
        "https://api.test.com",
        Some(auth(AuthMethod::KeyQuery, &[("key", "secret"), ("name", "api_key")])),
    );
    let request = client()
        .build_request(&profile, &profile.endpoints[1])
        .expect("request should build");

    assert_eq!(request.method(), reqwest::Method::POST);
    assert_eq!(request.url().as_str(), "https://api.test.com/users?api_key=secret");
}

#[test]
fn basic_auth_sets_authorization_header() {
    let profile = profile(
        "https://api.test.com",
        Some(auth(AuthMethod::Basic, &[("username", "user"), ("password", "pass")])),
    );
    let request = client()
        .build_request(&profile, &profile.endpoints[0])
        .expect("request should build");

    let expected = format!("Basic {}", STANDARD.encode("user:pass"));
    assert_eq!(
        request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
        Some(expected.as_str())
    );
}

#[test]
fn no_auth_adds_nothing() {
    let profile = profile("https://api.test.com", Some(auth(AuthMethod::None, &[])));
    let request = client()
        .build_request(&profile, &profile.endpoints[0])
        .expect("request should build");

    assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    assert_eq!(request.url().query(), None);
}

#[test]
fn finds_endpoint_by_path_and_method() {
    let profile = profile("https://api.test.com", None);

    let endpoint = find_endpoint(&profile, "/users", Some("POST")).expect("endpoint");
    assert_eq!(endpoint.method, "post");

    let endpoint = find_endpoint(&profile, "/users", None).expect("endpoint");
    assert_eq!(endpoint.method, "get");

    assert!(matches!(
        find_endpoint(&profile, "/posts", None),
        Err(AppError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn call_returns_raw_status_and_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut received = Vec::new();
        let mut buf = [0_u8; 1024];
        while !received.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buf).await.expect("read");
            if read == 0 {
                break;
            }
            received.extend_from_slice(&buf[..read]);
        }

        socket
            .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 7\r\nconnection: close\r\n\r\nmissing")
            .await
            .expect("write");
        String::from_utf8_lossy(&received).to_string()
    });

    let profile = profile(
        &format!("http://{addr}"),
        Some(auth(AuthMethod::KeyQuery, &[("key", "secret"), ("name", "api_key")])),
    );
    let http = reqwest::Client::builder().no_proxy().build().expect("client");
    let response = ApiClient::with_http(http)
        .call(&profile, &profile.endpoints[0])
        .await
        .expect("call should complete");

    assert_eq!(response.status, 404);
    assert_eq!(response.body, "missing");
    assert_eq!(response.method, "GET");
    assert!(response.url.ends_with("/users?api_key=***"));

    let request = server.await.expect("server task");
    assert!(request.starts_with("GET /users?api_key=secret HTTP/1.1"));
}

#[tokio::test]
async fn failed_call_does_not_leak_query_key() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let profile = profile(
        &format!("http://{addr}"),
        Some(auth(AuthMethod::KeyQuery, &[("key", "s3cr3t"), ("name", "api_key")])),
    );
    let http = reqwest::Client::builder().no_proxy().build().expect("client");
    let err = ApiClient::with_http(http)
        .call(&profile, &profile.endpoints[0])
        .await
        .expect_err("nothing listens on the port");

    assert!(matches!(err, AppError::Http(_)));
    let message = err.to_string();
    assert!(!message.contains("s3cr3t"), "secret leaked: {message}");
}
