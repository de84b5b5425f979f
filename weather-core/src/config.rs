use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

/// Listen port used when neither the config file nor `PORT` sets one.
pub const DEFAULT_PORT: u16 = 5000;

/// OpenWeather API host.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

pub const ENV_API_KEY: &str = "WEATHER_API_KEY";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BASE_URL: &str = "WEATHER_API_BASE_URL";

/// Process-wide configuration, built once at startup and never mutated afterwards.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// port = 5000
/// base_url = "https://api.openweathermap.org"
/// strict_schema = false
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeather `appid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Port the long-running listener binds to.
    pub port: u16,

    /// Scheme and host of the upstream provider, without a trailing path.
    pub base_url: String,

    /// Reject upstream payloads that lack the fields the presentation layer reads.
    pub strict_schema: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            strict_schema: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("strict_schema", &self.strict_schema)
            .finish()
    }
}

impl Config {
    /// Load the config file (if any), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)?.with_env(|key| std::env::var(key).ok())
    }

    /// Load config from `path`, or return the defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Apply `WEATHER_API_KEY`, `PORT` and `WEATHER_API_BASE_URL` on top of `self`.
    ///
    /// `lookup` stands in for the process environment so callers decide where values come from.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }

        if let Some(port) = lookup(ENV_PORT).filter(|p| !p.trim().is_empty()) {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {ENV_PORT} value '{port}'"))?;
        }

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().trim_end_matches('/').to_string();
        }

        Ok(self)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-proxy", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API key, or an error with a setup hint.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured for the weather provider.\n\
                 Hint: set {ENV_API_KEY} or run `weather-server configure`."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }
}
