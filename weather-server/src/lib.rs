//! Adapters over [`weather_core::WeatherService`]: the HTTP listener, the one-shot handler
//! and logging setup shared by the `weather-server` binary.

pub mod http;
pub mod logging;

use std::io::Write;

use anyhow::Context;
use weather_core::{Config, WeatherService, gateway_from_config};

/// Build the service both entry points run requests through.
pub fn build_service(config: &Config) -> anyhow::Result<WeatherService> {
    Ok(WeatherService::new(gateway_from_config(config)?))
}

/// Answer a single lookup, writing the JSON reply as one line to `out`.
///
/// Returns the process exit status: `0` for a 200 reply, `1` otherwise.
pub async fn handle_once<W: Write>(
    config: &Config,
    city: Option<&str>,
    out: &mut W,
) -> anyhow::Result<u8> {
    let service = build_service(config)?;
    let reply = service.respond(city).await;

    writeln!(out, "{}", reply.body).context("Failed to write reply")?;

    Ok(if reply.is_success() { 0 } else { 1 })
}
