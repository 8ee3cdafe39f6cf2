//! Typed API client
//!
//! One method per endpoint. Each builds a request, runs it over the
//! transport, rejects non-2xx responses, and decodes the typed body.
//! Extracted values (key, request id) are returned to the caller, which
//! threads them into later calls - nothing is cached here.

use serde::de::DeserializeOwned;

use crate::common::{Error, Result};

use super::transport::{truncate, ApiRequest, ApiResponse, Transport};
use super::types::{
    ApiKey, AvailableInterpreters, EndSessionRequest, EndSessionResponse, InterpreterRequest,
    InterpreterRequestResponse, PricingInfo, SessionStatus, TestKeyRequest, TestKeyResponse,
};

/// Client for the ASL AI Agent API, generic over its transport
pub struct ApiClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /auth/get-test-key` - issue a short-lived test credential
    pub async fn issue_test_key(&self, email: &str) -> Result<ApiKey> {
        let request = ApiRequest::post(
            "/auth/get-test-key",
            serde_json::to_value(TestKeyRequest {
                email: email.to_string(),
            })?,
        );
        let response = self.execute(&request).await?;
        let body: TestKeyResponse = decode(&request.path, response)?;
        ApiKey::new(body.api_key)
    }

    /// `POST /interpreter/request` - open a new interpreter session
    pub async fn request_interpreter(
        &self,
        key: &ApiKey,
        req: &InterpreterRequest,
    ) -> Result<InterpreterRequestResponse> {
        let request = ApiRequest::post("/interpreter/request", serde_json::to_value(req)?)
            .with_bearer(key.as_str());
        let response = self.execute(&request).await?;
        decode(&request.path, response)
    }

    /// `GET /sessions/{id}` - current status, duration and running cost
    pub async fn session_status(&self, key: &ApiKey, request_id: &str) -> Result<SessionStatus> {
        let request = ApiRequest::get(format!("/sessions/{request_id}")).with_bearer(key.as_str());
        let response = self.execute(&request).await?;
        decode(&request.path, response)
    }

    /// `POST /sessions/{id}/end` - terminate the session
    ///
    /// Verifies that the returned three-way token split sums to the final
    /// cost before handing the response back.
    pub async fn end_session(
        &self,
        key: &ApiKey,
        request_id: &str,
        req: &EndSessionRequest,
    ) -> Result<EndSessionResponse> {
        let request = ApiRequest::post(
            format!("/sessions/{request_id}/end"),
            serde_json::to_value(req)?,
        )
        .with_bearer(key.as_str());
        let response = self.execute(&request).await?;
        let body: EndSessionResponse = decode(&request.path, response)?;

        if !body.token_distribution.matches(body.final_cost) {
            return Err(Error::SplitMismatch {
                split_total: body.token_distribution.total(),
                final_cost: body.final_cost,
            });
        }

        Ok(body)
    }

    /// `GET /interpreters/available?specialization=X` - filtered listing
    pub async fn available_interpreters(
        &self,
        key: &ApiKey,
        specialization: &str,
    ) -> Result<AvailableInterpreters> {
        let request = ApiRequest::get(format!(
            "/interpreters/available?specialization={specialization}"
        ))
        .with_bearer(key.as_str());
        let response = self.execute(&request).await?;
        decode(&request.path, response)
    }

    /// `GET /pricing` - base rate and revenue split percentages
    pub async fn pricing(&self, key: &ApiKey) -> Result<PricingInfo> {
        let request = ApiRequest::get("/pricing").with_bearer(key.as_str());
        let response = self.execute(&request).await?;
        decode(&request.path, response)
    }

    /// Run a request and reject non-2xx responses
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let response = self.transport.execute(request).await?;

        if !response.is_success() {
            return Err(Error::HttpStatus {
                method: request.method.as_str(),
                path: request.path.clone(),
                status: response.status,
                detail: error_detail(&response),
            });
        }

        Ok(response)
    }
}

/// Decode a response body, mapping serde errors to contract failures
fn decode<B: DeserializeOwned>(path: &str, response: ApiResponse) -> Result<B> {
    serde_json::from_value(response.body).map_err(|e| Error::contract(path, e.to_string()))
}

/// Pull a human-readable detail out of an error response body
fn error_detail(response: &ApiResponse) -> String {
    response
        .body
        .get("error")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| truncate(&response.body.to_string(), 200))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::transport::fake::FakeTransport;
    use super::super::transport::Method;
    use super::*;

    fn client(responses: Vec<ApiResponse>) -> ApiClient<FakeTransport> {
        ApiClient::new(FakeTransport::new(responses))
    }

    #[tokio::test]
    async fn test_issue_test_key_extracts_credential() {
        let client = client(vec![FakeTransport::ok(json!({"api_key": "tok_abc123"}))]);

        let key = client.issue_test_key("test@example.com").await.unwrap();
        assert_eq!(key.as_str(), "tok_abc123");

        let requests = client.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/auth/get-test-key");
        assert!(requests[0].bearer.is_none());
        assert_eq!(requests[0].body.as_ref().unwrap()["email"], "test@example.com");
    }

    #[tokio::test]
    async fn test_issue_test_key_missing_field_is_contract_failure() {
        let client = client(vec![FakeTransport::ok(json!({"message": "ok"}))]);

        let err = client.issue_test_key("test@example.com").await.unwrap_err();
        assert_eq!(err.kind(), crate::common::FailureKind::Contract);
        assert!(err.to_string().contains("api_key"));
    }

    #[tokio::test]
    async fn test_issue_test_key_rejects_empty_credential() {
        let client = client(vec![FakeTransport::ok(json!({"api_key": ""}))]);

        let err = client.issue_test_key("test@example.com").await.unwrap_err();
        assert!(matches!(err, Error::EmptyApiKey));
    }

    #[tokio::test]
    async fn test_request_interpreter_carries_bearer() {
        let client = client(vec![FakeTransport::ok(json!({
            "request_id": "req_1",
            "video_room": {"url": "https://rooms.example.com/req_1"},
            "pricing": {"estimated_cost": 15.0}
        }))]);

        let key = ApiKey::new("tok_abc123").unwrap();
        let req = InterpreterRequest {
            user_wallet: "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb".to_string(),
            urgency: "high".to_string(),
            estimated_duration: 30,
            specialization: "medical".to_string(),
        };
        let session = client.request_interpreter(&key, &req).await.unwrap();
        assert_eq!(session.request_id, "req_1");
        assert_eq!(session.pricing.estimated_cost, 15.0);

        let requests = client.transport.requests();
        assert_eq!(requests[0].bearer.as_deref(), Some("tok_abc123"));
        assert_eq!(requests[0].body.as_ref().unwrap()["specialization"], "medical");
    }

    #[tokio::test]
    async fn test_session_status_addresses_session() {
        let client = client(vec![FakeTransport::ok(json!({
            "status": "in_progress",
            "duration_minutes": 12.0,
            "current_cost": 6.0
        }))]);

        let key = ApiKey::new("tok_abc123").unwrap();
        let status = client.session_status(&key, "req_1").await.unwrap();
        assert_eq!(status.status, "in_progress");

        let requests = client.transport.requests();
        assert_eq!(requests[0].path, "/sessions/req_1");
        assert_eq!(requests[0].method, Method::Get);
    }

    #[tokio::test]
    async fn test_end_session_accepts_consistent_split() {
        let client = client(vec![FakeTransport::ok(json!({
            "duration_minutes": 65.0,
            "final_cost": 100.0,
            "token_distribution": {"interpreter": 45.0, "platform": 45.0, "user_cashback": 10.0}
        }))]);

        let key = ApiKey::new("tok_abc123").unwrap();
        let ended = client
            .end_session(&key, "req_1", &EndSessionRequest::default())
            .await
            .unwrap();
        assert_eq!(ended.final_cost, 100.0);
        assert_eq!(ended.token_distribution.user_cashback, 10.0);
    }

    #[tokio::test]
    async fn test_end_session_flags_inconsistent_split() {
        let client = client(vec![FakeTransport::ok(json!({
            "duration_minutes": 65.0,
            "final_cost": 100.0,
            "token_distribution": {"interpreter": 45.0, "platform": 40.0, "user_cashback": 10.0}
        }))]);

        let key = ApiKey::new("tok_abc123").unwrap();
        let err = client
            .end_session(&key, "req_1", &EndSessionRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SplitMismatch {
                split_total,
                final_cost,
            } if split_total == 95.0 && final_cost == 100.0
        ));
    }

    #[tokio::test]
    async fn test_available_interpreters_builds_query() {
        let client = client(vec![FakeTransport::ok(json!({
            "total": 2,
            "interpreters": [
                {"id": "int_1", "rating": 4.9, "total_sessions": 120},
                {"id": "int_2", "rating": 4.7, "total_sessions": 44}
            ]
        }))]);

        let key = ApiKey::new("tok_abc123").unwrap();
        let listing = client.available_interpreters(&key, "medical").await.unwrap();
        assert_eq!(listing.total, 2);
        assert_eq!(listing.interpreters[0].id, "int_1");

        let requests = client.transport.requests();
        assert_eq!(
            requests[0].path,
            "/interpreters/available?specialization=medical"
        );
    }

    #[tokio::test]
    async fn test_non_2xx_multibyte_body_truncates_on_char_boundary() {
        // No "error" field, so the whole body becomes the detail snippet.
        // Long enough that the 200-byte cutoff lands inside a multibyte
        // character.
        let message = format!("a{}", "é".repeat(150));
        let client = client(vec![ApiResponse {
            status: 500,
            body: json!({ "message": message }),
        }]);

        let key = ApiKey::new("tok_abc123").unwrap();
        let err = client.pricing(&key).await.unwrap_err();
        assert_eq!(err.kind(), crate::common::FailureKind::Protocol);
        let rendered = err.to_string();
        assert!(rendered.contains("500"));
        assert!(rendered.contains("..."));
    }

    #[tokio::test]
    async fn test_non_2xx_is_protocol_failure_with_detail() {
        let client = client(vec![ApiResponse {
            status: 401,
            body: json!({"error": "invalid API key"}),
        }]);

        let key = ApiKey::new("tok_bad").unwrap();
        let err = client.pricing(&key).await.unwrap_err();
        assert_eq!(err.kind(), crate::common::FailureKind::Protocol);
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid API key"));
    }
}
