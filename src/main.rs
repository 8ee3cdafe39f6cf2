//! ASL API smoke tester - a typed harness for the ASL AI Agent API
//!
//! Drives the remote API through a fixed sequence of HTTP calls (issue a
//! test key, request an interpreter, poll the session, end it, list
//! interpreters, fetch pricing) and reports pass/fail per step.

use asl_smoke::{cli, commands::Commands, common::logging};
use clap::Parser;

#[derive(Parser)]
#[command(name = "asl-smoke", about = "Smoke-test harness for the ASL AI Agent API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
