use serde::{Deserialize, Serialize};

/// A validated lookup: `city` is trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    pub(crate) fn new(city: String) -> Self {
        Self { city }
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Upstream payload, kept as the exact text the provider sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    body: String,
}

impl WeatherReport {
    /// Wrap `body` after checking that it is a JSON object.
    pub fn from_json(body: String) -> serde_json::Result<Self> {
        serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&body)?;
        Ok(Self { body })
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Typed view over the fields the presentation layer reads.
    pub fn summary(&self) -> serde_json::Result<WeatherSummary> {
        serde_json::from_str(&self.body)
    }
}

/// `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Transport-neutral response: an HTTP status plus a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSummary {
    pub name: String,
    pub weather: Vec<Condition>,
    pub main: Readings,
}

impl WeatherSummary {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Readings {
    pub temp: f64,
}
