//! Smoke-test runner
//!
//! Executes the step sequence against a typed API client. Strictly
//! sequential: a step is issued only after the previous step's response
//! has been fully decoded, and the run aborts on the first failure without
//! retrying or rolling anything back.

use colored::Colorize;

use crate::api::client::ApiClient;
use crate::api::transport::Transport;
use crate::api::types::{EndSessionRequest, InterpreterRequest};
use crate::common::Error;

/// One entry in the fixed step plan
#[derive(Debug, Clone, Copy)]
pub struct StepPlan {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    pub authed: bool,
}

/// The six steps, in required order
pub const STEPS: [StepPlan; 6] = [
    StepPlan {
        name: "issue test key",
        method: "POST",
        path: "/auth/get-test-key",
        authed: false,
    },
    StepPlan {
        name: "request interpreter",
        method: "POST",
        path: "/interpreter/request",
        authed: true,
    },
    StepPlan {
        name: "query session status",
        method: "GET",
        path: "/sessions/{id}",
        authed: true,
    },
    StepPlan {
        name: "end session",
        method: "POST",
        path: "/sessions/{id}/end",
        authed: true,
    },
    StepPlan {
        name: "list available interpreters",
        method: "GET",
        path: "/interpreters/available?specialization={s}",
        authed: true,
    },
    StepPlan {
        name: "fetch pricing",
        method: "GET",
        path: "/pricing",
        authed: true,
    },
];

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Contact email sent when requesting the test key
    pub email: String,
    /// Payload for the interpreter request
    pub request: InterpreterRequest,
    /// Payload for the session-end call
    pub end: EndSessionRequest,
    /// Show request payloads alongside step results
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            email: "test@example.com".to_string(),
            request: InterpreterRequest {
                user_wallet: "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb".to_string(),
                urgency: "high".to_string(),
                estimated_duration: 30,
                specialization: "medical".to_string(),
            },
            end: EndSessionRequest::default(),
            verbose: false,
        }
    }
}

/// Result of a run
#[derive(Debug)]
pub struct RunResult {
    pub passed: bool,
    /// Steps that completed successfully before the run ended
    pub steps_run: usize,
    pub steps_total: usize,
    /// Name of the failing step, when one failed
    pub failed_step: Option<&'static str>,
    pub error: Option<String>,
}

impl RunResult {
    fn pass() -> Self {
        Self {
            passed: true,
            steps_run: STEPS.len(),
            steps_total: STEPS.len(),
            failed_step: None,
            error: None,
        }
    }

    fn fail(step_index: usize, error: &Error) -> Self {
        Self {
            passed: false,
            steps_run: step_index,
            steps_total: STEPS.len(),
            failed_step: Some(STEPS[step_index].name),
            error: Some(error.to_string()),
        }
    }
}

/// Print a passing step line with its extracted fields
fn report_pass(step_index: usize, detail: &str) {
    println!(
        "  {} Step {}: {} ({})",
        "✓".green(),
        step_index + 1,
        STEPS[step_index].name,
        detail.dimmed()
    );
}

/// Print a failing step line with the failure category and cause
fn report_fail(step_index: usize, error: &Error) {
    println!(
        "  {} Step {}: {} ({} failure): {}",
        "✗".red(),
        step_index + 1,
        STEPS[step_index].name,
        error.kind(),
        error
    );
}

/// Run the full six-step sequence, aborting on the first failure
pub async fn run_suite<T: Transport>(client: &ApiClient<T>, opts: &RunOptions) -> RunResult {
    println!("\n{}", "Running API smoke test".blue().bold());
    println!("\n{}", "Steps:".cyan());

    // Step 1: issue test key
    if opts.verbose {
        println!("    email: {}", opts.email.dimmed());
    }
    let key = match client.issue_test_key(&opts.email).await {
        Ok(key) => {
            report_pass(0, &format!("key {}", key.as_str()));
            key
        }
        Err(e) => {
            report_fail(0, &e);
            return RunResult::fail(0, &e);
        }
    };

    // Step 2: request interpreter
    if opts.verbose {
        println!(
            "    wallet: {}, urgency: {}, duration: {} min, specialization: {}",
            opts.request.user_wallet.dimmed(),
            opts.request.urgency.dimmed(),
            opts.request.estimated_duration,
            opts.request.specialization.dimmed()
        );
    }
    let session = match client.request_interpreter(&key, &opts.request).await {
        Ok(session) => {
            report_pass(
                1,
                &format!(
                    "session {}, room {}, estimated {} ASL",
                    session.request_id, session.video_room.url, session.pricing.estimated_cost
                ),
            );
            session
        }
        Err(e) => {
            report_fail(1, &e);
            return RunResult::fail(1, &e);
        }
    };

    let request_id = session.request_id.as_str();

    // Step 3: query session status
    match client.session_status(&key, request_id).await {
        Ok(status) => {
            report_pass(
                2,
                &format!(
                    "status {}, {} min, {} ASL so far",
                    status.status, status.duration_minutes, status.current_cost
                ),
            );
        }
        Err(e) => {
            report_fail(2, &e);
            return RunResult::fail(2, &e);
        }
    }

    // Step 4: end session
    if opts.verbose {
        println!(
            "    ended by: {}, reason: {}, rating: {}",
            opts.end.ended_by.dimmed(),
            opts.end.reason.dimmed(),
            opts.end.rating
        );
    }
    match client.end_session(&key, request_id, &opts.end).await {
        Ok(ended) => {
            report_pass(
                3,
                &format!(
                    "{} min, final {} ASL (interpreter {} / platform {} / cashback {})",
                    ended.duration_minutes,
                    ended.final_cost,
                    ended.token_distribution.interpreter,
                    ended.token_distribution.platform,
                    ended.token_distribution.user_cashback
                ),
            );
        }
        Err(e) => {
            report_fail(3, &e);
            return RunResult::fail(3, &e);
        }
    }

    // Step 5: list available interpreters
    match client
        .available_interpreters(&key, &opts.request.specialization)
        .await
    {
        Ok(listing) => {
            report_pass(4, &format!("{} available", listing.total));
            for interpreter in &listing.interpreters {
                println!(
                    "      - {}: rating {}, {} sessions",
                    interpreter.id.dimmed(),
                    interpreter.rating,
                    interpreter.total_sessions
                );
            }
        }
        Err(e) => {
            report_fail(4, &e);
            return RunResult::fail(4, &e);
        }
    }

    // Step 6: fetch pricing
    match client.pricing(&key).await {
        Ok(pricing) => {
            report_pass(
                5,
                &format!(
                    "{} ASL/min (interpreter {}% / platform {}% / cashback {}%)",
                    pricing.base_rate_per_minute,
                    pricing.revenue_split.interpreter_percent,
                    pricing.revenue_split.platform_percent,
                    pricing.revenue_split.user_cashback_percent
                ),
            );
        }
        Err(e) => {
            report_fail(5, &e);
            return RunResult::fail(5, &e);
        }
    }

    println!("\n{} {}\n", "✓".green().bold(), "Smoke Test Passed".green().bold());

    RunResult::pass()
}
