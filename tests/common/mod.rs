#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use classroom_seats::{app, config::Config, AppState};

pub const ADMIN_PASSWORD: &str = "lop-truong";

pub async fn test_app() -> Router {
    test_app_with(Config::for_tests()).await
}

pub async fn test_app_with(config: Config) -> Router {
    let state = AppState::in_memory(config).await.expect("in-memory state");
    app(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub text: String,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse { status, set_cookie, text, body }
}

/// Logs in and returns the `name=value` pair to send back as a Cookie header.
pub async fn login(app: &Router) -> String {
    let res = send(
        app,
        Method::POST,
        "/api/admin/login",
        Some(serde_json::json!({ "password": ADMIN_PASSWORD })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let set_cookie = res.set_cookie.expect("login sets a cookie");
    set_cookie.split(';').next().unwrap().to_string()
}
