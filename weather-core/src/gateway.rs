use crate::{
    Config, LookupError, WeatherQuery, WeatherReport, gateway::openweather::OpenWeatherGateway,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// One outbound call per query; no retries, no caching.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, LookupError>;
}

/// Construct the provider gateway from config.
pub fn gateway_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherGateway>> {
    Ok(Box::new(OpenWeatherGateway::new(config)?))
}
