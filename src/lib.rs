//! ASL API smoke tester
//!
//! This library provides a typed client for the ASL AI Agent API and a
//! fixed-order smoke-test runner that exercises its six public endpoints.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;

// Re-export commonly used types for tests
pub use api::client::ApiClient;
pub use api::transport::{HttpTransport, Transport};
pub use common::{Error, FailureKind, Result};
pub use harness::runner::{run_suite, RunOptions, RunResult};
