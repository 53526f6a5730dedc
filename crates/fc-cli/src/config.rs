use anyhow::{Context, Result};
use clap::ValueEnum;
use fc_api::ClientOptions;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::trace;

/// How command results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable.
    #[default]
    Text,

    /// Pretty printed json, comments stay raw.
    Json,
}

/// Cli config.
///
/// Every section is optional:
///
/// ```toml
/// output = "json"
///
/// [client]
/// retry_count = 5
/// cache_capacity = 100
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub client: ClientOptions,
    pub output: OutputFormat,
}

/// Load config from toml file on `path`, or the default one if no path given.
pub async fn load_config(path: Option<&str>) -> Result<Config> {
    let path = match path {
        Some(v) => v,
        None => return Ok(Config::default()),
    };
    let data = fs::read_to_string(path)
        .await
        .with_context(|| format!("when reading config file {path}"))?;
    let config = parse_config(data.as_str())?;
    trace!("loaded config from {path}");
    Ok(config)
}

fn parse_config(data: &str) -> Result<Config> {
    toml::from_str(data).context("invalid config")
}
