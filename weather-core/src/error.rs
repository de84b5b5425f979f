use crate::model::{ErrorResponse, Reply};

/// Why a lookup did not produce a [`crate::WeatherReport`].
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The `city` parameter was absent or blank.
    #[error("City name required")]
    MissingCity,

    /// The provider call failed. The cause is for server-side logs only.
    #[error("Upstream weather request failed: {0:#}")]
    Upstream(anyhow::Error),
}

impl LookupError {
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::MissingCity => 400,
            LookupError::Upstream(_) => 500,
        }
    }

    /// Message shown to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            LookupError::MissingCity => "City name required",
            LookupError::Upstream(_) => "Failed to fetch weather data",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.public_message().to_string(),
        }
    }

    pub fn to_reply(&self) -> Reply {
        let body = serde_json::to_string(&self.to_error_response())
            .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, self.public_message()));

        Reply {
            status: self.status_code(),
            body,
        }
    }
}
