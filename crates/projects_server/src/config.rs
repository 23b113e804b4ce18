use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output format for the diagnostic stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, colored lines
    Pretty,
    /// One JSON object per event
    Json,
}

/// Projects Server Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP API bind address
    pub http_bind: SocketAddr,

    /// Log level
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,

    /// How long to wait for in-flight requests on shutdown
    #[serde(with = "duration_secs")]
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind: SocketAddr::from(([0, 0, 0, 0], 3333)),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

/// CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "projects-server")]
#[command(about = "Projects Server - in-memory project registry over HTTP")]
pub struct Cli {
    /// Configuration file path (JSON or TOML)
    #[arg(short, long, env = "PROJECTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// HTTP bind address
    #[arg(long, env = "PROJECTS_HTTP_BIND")]
    pub http_bind: Option<SocketAddr>,

    /// Log level
    #[arg(long, env = "PROJECTS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format
    #[arg(long, env = "PROJECTS_LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Load configuration from environment, CLI args, and optional config file
    pub fn from_env() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Layer defaults, the config file and CLI overrides, in that order
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(http_bind) = cli.http_bind {
            config.http_bind = http_bind;
        }
        if let Some(log_level) = cli.log_level {
            config.log_level = log_level;
        }
        if let Some(log_format) = cli.log_format {
            config.log_format = log_format;
        }

        config.validate()?;

        Ok(config)
    }

    /// Read a JSON or TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str::<Config>(&config_str)
            .or_else(|_| toml::from_str(&config_str))
            .context("Failed to parse config file")
    }

    fn validate(&self) -> Result<()> {
        if self.shutdown_timeout.is_zero() {
            anyhow::bail!("shutdown_timeout must be greater than 0");
        }

        if self.log_level.trim().is_empty() {
            anyhow::bail!("log_level must not be empty");
        }

        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
