//! Error types for the smoke tester
//!
//! Every failure the harness can hit maps into one of three categories:
//! transport (the host was never reached), protocol (the host answered
//! with a bad status or a non-JSON body), or contract (valid JSON that is
//! missing a required field or carries an inconsistent value).

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke tester
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("Failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} timed out after {secs} seconds")]
    Timeout { url: String, secs: u64 },

    // === Protocol Errors ===
    #[error("{method} {path} returned HTTP {status}: {detail}")]
    HttpStatus {
        method: &'static str,
        path: String,
        status: u16,
        detail: String,
    },

    #[error("Response from {path} is not valid JSON: {snippet}")]
    InvalidBody { path: String, snippet: String },

    // === Contract Errors ===
    #[error("Response from {path} violates the API contract: {message}")]
    Contract { path: String, message: String },

    #[error("Token split sums to {split_total} ASL but final cost is {final_cost} ASL")]
    SplitMismatch { split_total: f64, final_cost: f64 },

    #[error("API issued an empty credential")]
    EmptyApiKey,

    // === Run Errors ===
    #[error("Step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a contract error for a malformed response body
    pub fn contract(path: &str, message: impl Into<String>) -> Self {
        Self::Contract {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Classify this error into the harness failure taxonomy
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Transport { .. } | Error::Timeout { .. } => FailureKind::Transport,
            Error::HttpStatus { .. } | Error::InvalidBody { .. } => FailureKind::Protocol,
            Error::Contract { .. } | Error::SplitMismatch { .. } | Error::EmptyApiKey => {
                FailureKind::Contract
            }
            _ => FailureKind::Other,
        }
    }
}

/// High-level failure category used in run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The host was never reached (refused, DNS, timeout)
    Transport,
    /// The host answered with an error status or a non-JSON body
    Protocol,
    /// The body decoded but violates the API contract
    Contract,
    /// Anything local: config, IO, internal
    Other,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::Transport => "transport",
            FailureKind::Protocol => "protocol",
            FailureKind::Contract => "contract",
            FailureKind::Other => "other",
        };
        write!(f, "{s}")
    }
}
