//! CLI command definitions
//!
//! Defines the clap commands for the smoke tester.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full smoke-test sequence against the API
    Run {
        /// Base URL of the API, e.g. http://localhost:4000/v1
        #[arg(long)]
        base_url: Option<String>,

        /// Contact email sent when requesting the test key
        #[arg(long)]
        email: Option<String>,

        /// Interpreter specialization to request and filter by
        #[arg(long)]
        specialization: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Show request payloads alongside step results
        #[arg(long, short)]
        verbose: bool,
    },

    /// Print the ordered step plan without sending any requests
    Plan,
}
