//! Typed client for the ASL AI Agent API
//!
//! Consumes the remote API's JSON-over-HTTP contract: test-key issuance,
//! interpreter session lifecycle, interpreter listing and pricing. The
//! transport is a trait so the client can be driven against a fake in tests.

pub mod client;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
