//! HTTP surface for the weather lookup.
//!
//! `GET /api/weather?city=<name>` answers with the provider payload or an `{ "error": ... }` body.

use anyhow::Context;
use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use weather_core::{Reply, WeatherService};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

/// Picks the `city` value out of the raw query pairs.
///
/// A repeated key still counts as present: the first non-blank value wins.
fn city_param(pairs: Vec<(String, String)>) -> Option<String> {
    let mut cities = pairs.into_iter().filter(|(key, _)| key == "city").map(|(_, v)| v);
    let first = cities.next()?;

    if !first.trim().is_empty() {
        return Some(first);
    }
    Some(cities.find(|v| !v.trim().is_empty()).unwrap_or(first))
}

fn into_response(reply: Reply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], reply.body).into_response()
}

/// GET /api/weather - Current weather for a city
async fn get_weather(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    // An undecodable query string carries no usable city either.
    let city = params.ok().and_then(|Query(pairs)| city_param(pairs));
    into_response(state.service.respond(city.as_deref()).await)
}

/// GET /health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Create the HTTP router
pub fn create_router(service: Arc<WeatherService>) -> Router {
    let state = AppState { service };

    // Browser front-ends call this from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/weather", get(get_weather))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server until Ctrl-C.
pub async fn run_http_server(service: Arc<WeatherService>, port: u16) -> anyhow::Result<()> {
    let app = create_router(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind HTTP listener on port {port}"))?;
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn city_param_absent() {
        assert_eq!(city_param(pairs(&[])), None);
        assert_eq!(city_param(pairs(&[("town", "London")])), None);
    }

    #[test]
    fn city_param_takes_first_of_repeated_keys() {
        let city = city_param(pairs(&[("city", "London"), ("city", "Paris")]));
        assert_eq!(city.as_deref(), Some("London"));
    }

    #[test]
    fn city_param_skips_blank_repeats() {
        let city = city_param(pairs(&[("city", " "), ("units", "x"), ("city", "Paris")]));
        assert_eq!(city.as_deref(), Some("Paris"));

        let city = city_param(pairs(&[("city", ""), ("city", "  ")]));
        assert_eq!(city.as_deref(), Some(""));
    }
}
