//! HTTP client for integration testing.
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// Client address reported to the per-IP rate limiter unless a test overrides it.
pub const DEFAULT_CLIENT_IP: &str = "203.0.113.10";

/// Client for calling the API router without a socket.
#[derive(Clone)]
pub struct ApiClient {
    router: Router,
    client_ip: String,
    token: Option<String>,
}

/// Status and decoded JSON body of a response.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// The `error` field of a failure envelope.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// Gets a value at the given dotted JSON path (`user.familyMembers`).
    pub fn get(&self, path: &str) -> Value {
        let mut current = &self.body;
        for key in path.split('.') {
            current = match key.parse::<usize>() {
                Ok(index) => &current[index],
                Err(_) => &current[key],
            };
        }
        current.clone()
    }
}

impl ApiClient {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            client_ip: DEFAULT_CLIENT_IP.to_string(),
            token: None,
        }
    }

    /// Same router, requests sent with `token` in the Authorization header.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..self.clone()
        }
    }

    /// Same router, requests appear to come from `ip`.
    pub fn from_ip(&self, ip: &str) -> Self {
        Self {
            client_ip: ip.to_string(),
            ..self.clone()
        }
    }

    pub async fn get(&self, uri: &str) -> ApiResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> ApiResponse {
        self.request(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> ApiResponse {
        self.request(Method::PUT, uri, Some(body.to_string())).await
    }

    /// Send a raw (possibly malformed) JSON body.
    pub async fn post_raw(&self, uri: &str, body: &str) -> ApiResponse {
        self.request(Method::POST, uri, Some(body.to_string())).await
    }

    async fn request(&self, method: Method, uri: &str, body: Option<String>) -> ApiResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", &self.client_ip);

        if let Some(token) = &self.token {
            builder = builder.header("authorization", token);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json)),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        ApiResponse { status, body }
    }
}
