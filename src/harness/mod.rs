//! Fixed-order smoke-test execution
//!
//! Drives the six API calls in their required order, threading the issued
//! key and session id between steps as typed values, and reports each
//! step's outcome.

pub mod runner;

pub use runner::{run_suite, RunOptions, RunResult, StepPlan, STEPS};
