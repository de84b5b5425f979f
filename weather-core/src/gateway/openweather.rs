use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{Config, LookupError, WeatherQuery, WeatherReport};

use super::WeatherGateway;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherGateway {
    api_key: String,
    endpoint: String,
    strict_schema: bool,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherGateway")
            .field("endpoint", &self.endpoint)
            .field("strict_schema", &self.strict_schema)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherGateway {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?.to_owned();
        let endpoint = format!(
            "{}{CURRENT_WEATHER_PATH}",
            config.base_url.trim_end_matches('/')
        );

        Ok(Self {
            api_key,
            endpoint,
            strict_schema: config.strict_schema,
            http: Client::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport> {
        // The request URL carries the API key, so it is stripped from transport errors.
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read OpenWeather current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let report = WeatherReport::from_json(body)
            .context("Failed to parse OpenWeather current JSON")?;

        if let Some(failure) = reported_failure(report.as_str()) {
            return Err(anyhow!("OpenWeather reported a failure: {failure}"));
        }

        if self.strict_schema {
            report
                .summary()
                .context("OpenWeather payload is missing required fields")?
                .condition()
                .ok_or_else(|| anyhow!("OpenWeather payload has an empty `weather` list"))?;
        }

        Ok(report)
    }
}

/// Reads the status envelope OpenWeather embeds in object bodies,
/// e.g. `{"cod":"404","message":"city not found"}`.
fn reported_failure(body: &str) -> Option<String> {
    let Value::Object(fields) = serde_json::from_str::<Value>(body).ok()? else {
        return None;
    };

    let code = match fields.get("cod")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    match code {
        Some(200) | None => None,
        Some(code) => {
            let message = match fields.get("message") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "no message".to_string(),
            };
            Some(format!("code {code}: {message}"))
        }
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, LookupError> {
        self.fetch_current(query.city())
            .await
            .map_err(LookupError::Upstream)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
