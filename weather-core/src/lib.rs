//! Core library for the weather lookup proxy.
//!
//! This crate defines:
//! - Configuration handling (config file + environment)
//! - The Query Validator and the Weather Gateway abstraction
//! - Shared domain models (queries, reports, error bodies)
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod service;
pub mod validate;

pub use config::Config;
pub use error::LookupError;
pub use gateway::{WeatherGateway, gateway_from_config};
pub use model::{ErrorResponse, Reply, WeatherQuery, WeatherReport, WeatherSummary};
pub use service::WeatherService;
pub use validate::validate;
