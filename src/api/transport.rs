//! HTTP transport layer
//!
//! The `Transport` trait is the seam between the typed client and the
//! network: the real implementation wraps reqwest, tests substitute a fake
//! that scripts responses and records every request it sees.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::common::{Error, Result};

/// HTTP method for an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One request against the API, relative to the base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path including any query string, e.g. `/interpreters/available?specialization=medical`
    pub path: String,
    /// Bearer token, absent only for key issuance
    pub bearer: Option<String>,
    /// JSON body for POST requests
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            bearer: None,
            body: Some(body),
        }
    }

    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

/// Status and decoded JSON body of one response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes API requests. One implementation speaks real HTTP, tests
/// provide a scripted fake.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// Real transport over reqwest
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Build a transport for a base URL with a per-request timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = request.method.as_str(), %url, "sending request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    url: url.clone(),
                    secs: self.timeout_secs,
                }
            } else {
                Error::Transport {
                    url: url.clone(),
                    source: e,
                }
            }
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| Error::Transport {
            url: url.clone(),
            source: e,
        })?;

        let body: Value = serde_json::from_str(&text).map_err(|_| Error::InvalidBody {
            path: request.path.clone(),
            snippet: truncate(&text, 200),
        })?;

        Ok(ApiResponse { status, body })
    }
}

/// Shorten a body snippet for error messages without splitting a UTF-8
/// character
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.len() > max {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}

/// Scripted transport for unit tests
#[cfg(test)]
pub(crate) mod fake {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Returns canned responses in order and logs every request it sees.
    /// Running past the script yields an internal error, which is itself
    /// useful for asserting that no extra request was issued.
    pub struct FakeTransport {
        script: Mutex<VecDeque<ApiResponse>>,
        log: Mutex<Vec<ApiRequest>>,
    }

    impl FakeTransport {
        pub fn new(responses: Vec<ApiResponse>) -> Self {
            Self {
                script: Mutex::new(responses.into()),
                log: Mutex::new(Vec::new()),
            }
        }

        /// Canned 200 response with the given body
        pub fn ok(body: Value) -> ApiResponse {
            ApiResponse { status: 200, body }
        }

        /// All requests executed so far
        pub fn requests(&self) -> Vec<ApiRequest> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
            self.log.lock().unwrap().push(request.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::Internal("unexpected request past end of script".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::get("/pricing").with_bearer("tok_abc123");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/pricing");
        assert_eq!(req.bearer.as_deref(), Some("tok_abc123"));
        assert!(req.body.is_none());

        let req = ApiRequest::post("/auth/get-test-key", serde_json::json!({"email": "a@b.c"}));
        assert_eq!(req.method, Method::Post);
        assert!(req.bearer.is_none());
        assert!(req.body.is_some());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let transport = HttpTransport::new("http://localhost:4000/v1/", 10).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:4000/v1");
    }

    #[test]
    fn test_response_success_range() {
        let ok = ApiResponse {
            status: 201,
            body: Value::Null,
        };
        assert!(ok.is_success());

        let err = ApiResponse {
            status: 404,
            body: Value::Null,
        };
        assert!(!err.is_success());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "é".repeat(120);
        let out = truncate(&s, 5);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 8);
    }
}
