//! CLI command handling
//!
//! Merges flags over the config file, builds the HTTP client, and drives
//! the runner.

use colored::Colorize;

use crate::api::client::ApiClient;
use crate::api::transport::HttpTransport;
use crate::api::types::{EndSessionRequest, InterpreterRequest};
use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::harness::runner::{self, RunOptions, STEPS};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            base_url,
            email,
            specialization,
            timeout,
            verbose,
        } => {
            let config = Config::load()?;

            let base_url = base_url.unwrap_or(config.api.base_url);
            let timeout_secs = timeout.unwrap_or(config.timeouts.request_secs);

            let opts = RunOptions {
                email: email.unwrap_or(config.api.email),
                request: InterpreterRequest {
                    user_wallet: config.request.user_wallet,
                    urgency: config.request.urgency,
                    estimated_duration: config.request.estimated_duration,
                    specialization: specialization
                        .unwrap_or(config.request.specialization),
                },
                end: EndSessionRequest::default(),
                verbose,
            };

            tracing::info!(%base_url, timeout_secs, "starting smoke test");

            let transport = HttpTransport::new(&base_url, timeout_secs)?;
            let client = ApiClient::new(transport);

            let result = runner::run_suite(&client, &opts).await;

            if result.passed {
                Ok(())
            } else {
                println!(
                    "\n{} {} ({}/{} steps passed)\n",
                    "✗".red().bold(),
                    "Smoke Test Failed".red().bold(),
                    result.steps_run,
                    result.steps_total
                );
                Err(Error::StepFailed {
                    step: result.failed_step.unwrap_or("unknown").to_string(),
                    message: result.error.unwrap_or_default(),
                })
            }
        }

        Commands::Plan => {
            println!("{}", "Step plan:".cyan());
            for (i, step) in STEPS.iter().enumerate() {
                let auth = if step.authed { "bearer" } else { "none" };
                println!(
                    "  {}. {} - {} {} (auth: {})",
                    i + 1,
                    step.name,
                    step.method,
                    step.path,
                    auth.dimmed()
                );
            }
            Ok(())
        }
    }
}
