//! Wire types for the ASL AI Agent API
//!
//! Field names match the API's JSON bodies exactly. Costs and token
//! amounts are denominated in ASL.

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

/// Maximum drift tolerated between the three-way token split and the
/// final cost. Shares come back rounded to at most two decimals, so exact
/// float equality is never required.
pub const SPLIT_TOLERANCE: f64 = 0.05;

// === Credentials ===

/// Opaque bearer token issued for the duration of one test run.
///
/// Guaranteed non-empty: every call after key issuance authenticates
/// with one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key, rejecting an empty string
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(Error::EmptyApiKey);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// === Auth ===

/// Request body for `POST /auth/get-test-key`
#[derive(Debug, Clone, Serialize)]
pub struct TestKeyRequest {
    pub email: String,
}

/// Response body for `POST /auth/get-test-key`
#[derive(Debug, Clone, Deserialize)]
pub struct TestKeyResponse {
    pub api_key: String,
}

// === Interpreter request ===

/// Request body for `POST /interpreter/request`
#[derive(Debug, Clone, Serialize)]
pub struct InterpreterRequest {
    pub user_wallet: String,
    pub urgency: String,
    pub estimated_duration: u32,
    pub specialization: String,
}

/// Joinable video room for a matched session
#[derive(Debug, Clone, Deserialize)]
pub struct VideoRoom {
    pub url: String,
}

/// Estimated pricing attached to a new session
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatedPricing {
    pub estimated_cost: f64,
}

/// Response body for `POST /interpreter/request`
#[derive(Debug, Clone, Deserialize)]
pub struct InterpreterRequestResponse {
    pub request_id: String,
    pub video_room: VideoRoom,
    pub pricing: EstimatedPricing,
}

// === Session lifecycle ===

/// Response body for `GET /sessions/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStatus {
    pub status: String,
    pub duration_minutes: f64,
    pub current_cost: f64,
}

/// Request body for `POST /sessions/{id}/end`
#[derive(Debug, Clone, Serialize)]
pub struct EndSessionRequest {
    pub ended_by: String,
    pub reason: String,
    pub rating: u8,
    pub feedback: String,
}

impl Default for EndSessionRequest {
    fn default() -> Self {
        Self {
            ended_by: "agent".to_string(),
            reason: "completed".to_string(),
            rating: 5,
            feedback: "Great interpreter!".to_string(),
        }
    }
}

/// Three-way split of a session's final cost
#[derive(Debug, Clone, Deserialize)]
pub struct TokenDistribution {
    pub interpreter: f64,
    pub platform: f64,
    pub user_cashback: f64,
}

impl TokenDistribution {
    /// Sum of the three shares
    pub fn total(&self) -> f64 {
        self.interpreter + self.platform + self.user_cashback
    }

    /// Whether the shares add up to the final cost within tolerance
    pub fn matches(&self, final_cost: f64) -> bool {
        (self.total() - final_cost).abs() <= SPLIT_TOLERANCE
    }
}

/// Response body for `POST /sessions/{id}/end`
#[derive(Debug, Clone, Deserialize)]
pub struct EndSessionResponse {
    pub duration_minutes: f64,
    pub final_cost: f64,
    pub token_distribution: TokenDistribution,
}

// === Interpreter listing ===

/// One interpreter in the availability listing
#[derive(Debug, Clone, Deserialize)]
pub struct InterpreterSummary {
    pub id: String,
    pub rating: f64,
    pub total_sessions: u64,
}

/// Response body for `GET /interpreters/available`
#[derive(Debug, Clone, Deserialize)]
pub struct AvailableInterpreters {
    pub total: u64,
    #[serde(default)]
    pub interpreters: Vec<InterpreterSummary>,
}

// === Pricing ===

/// Revenue split expressed as percentages
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueSplit {
    pub interpreter_percent: f64,
    pub platform_percent: f64,
    pub user_cashback_percent: f64,
}

/// Response body for `GET /pricing`
#[derive(Debug, Clone, Deserialize)]
pub struct PricingInfo {
    pub base_rate_per_minute: f64,
    pub revenue_split: RevenueSplit,
}
