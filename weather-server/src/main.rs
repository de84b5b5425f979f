//! Binary crate for the `weather-server` proxy.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving `GET /api/weather` or answering a single one-shot lookup
//! - Interactive configuration

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    weather_server::logging::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
