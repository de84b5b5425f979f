use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Password};
use weather_core::Config;
use weather_server::{build_service, handle_once, http};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather lookup proxy")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP listener.
    Serve {
        /// Overrides the configured port and `PORT`.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Answer a single lookup and print the JSON reply.
    Handle {
        /// City name; omit to get the "City name required" reply.
        #[arg(long)]
        city: Option<String>,
    },

    /// Store the API key and listener settings in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Serve { port } => {
                let mut config = load_config(self.config.as_deref())?;
                if let Some(port) = port {
                    config.port = port;
                }
                tracing::debug!(?config, "starting listener");

                let service = build_service(&config)?;
                http::run_http_server(Arc::new(service), config.port).await?;
            }
            Command::Handle { city } => {
                let config = load_config(self.config.as_deref())?;
                let status = handle_once(&config, city.as_deref(), &mut std::io::stdout()).await?;

                return Ok(ExitCode::from(status));
            }
            Command::Configure => configure(self.config.as_deref())?,
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)?.with_env(|key| std::env::var(key).ok()),
        None => Config::load(),
    }
}

/// Interactive configuration. Environment overrides are not written to the file.
fn configure(path: Option<&Path>) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::config_file_path()?,
    };
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    config.port = CustomType::<u16>::new("Listen port:")
        .with_default(config.port)
        .prompt()
        .context("Failed to read port")?;

    config.strict_schema = Confirm::new("Reject provider payloads missing name/weather/temp?")
        .with_default(config.strict_schema)
        .prompt()
        .context("Failed to read schema option")?;

    config.save_to(&path)?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
