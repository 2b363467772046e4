//! Command-line and environment configuration for the `clinixa` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use clinixa_core::RawForm;
use clinixa_engine::{ClientSettings, DEFAULT_BASE_URL};
use log::LevelFilter;
use url::Url;

use crate::platform::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "clinixa",
    version,
    about = "Symptom analysis and health recommendations from the terminal"
)]
pub struct Cli {
    /// Base URL of the analysis service.
    #[arg(long, env = "CLINIXA_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Seconds to wait for a TCP connection to the service.
    #[arg(long, env = "CLINIXA_CONNECT_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub connect_timeout_secs: u64,

    /// Optional deadline for a whole request. Unset means wait for the answer.
    #[arg(long, env = "CLINIXA_REQUEST_TIMEOUT_SECS", global = true)]
    pub request_timeout_secs: Option<u64>,

    /// Write logs to this file instead of the terminal.
    #[arg(long, env = "CLINIXA_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Default, Subcommand)]
pub enum Command {
    /// Fill in the symptom form at the prompt (default).
    #[default]
    Interactive,
    /// Submit a single analysis from arguments.
    Analyze(AnalyzeArgs),
    /// Check whether the analysis service is up.
    Health,
}

#[derive(Debug, Default, Args)]
pub struct AnalyzeArgs {
    /// Describe your symptoms, e.g. "headache, fever".
    #[arg(long, default_value = "")]
    pub symptoms: String,
    /// Age in years (0-120).
    #[arg(long, default_value = "")]
    pub age: String,
    /// male, female or other.
    #[arg(long, default_value = "")]
    pub gender: String,
    /// How long the symptoms have lasted, e.g. "2 days".
    #[arg(long, default_value = "")]
    pub duration: String,
}

impl From<AnalyzeArgs> for RawForm {
    fn from(args: AnalyzeArgs) -> Self {
        RawForm {
            symptoms: args.symptoms,
            age: args.age,
            gender: args.gender,
            duration: args.duration,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid api url {value:?}: {source}")]
    InvalidApiUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("api url must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientSettings,
    pub log: LogSettings,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let base_url = Url::parse(cli.api_url.trim()).map_err(|source| ConfigError::InvalidApiUrl {
            value: cli.api_url.clone(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }

        let client = ClientSettings {
            base_url,
            connect_timeout: Duration::from_secs(cli.connect_timeout_secs),
            request_timeout: cli.request_timeout_secs.map(Duration::from_secs),
        };

        Ok(Self {
            client,
            log: log_settings(cli.log_file.clone(), cli.verbose),
        })
    }
}

/// The terminal is shared with the prompt, so it only gets warnings unless asked.
fn log_settings(log_file: Option<PathBuf>, verbose: bool) -> LogSettings {
    match (log_file, verbose) {
        (Some(path), true) => LogSettings {
            destination: LogDestination::Both(path),
            level: LevelFilter::Debug,
        },
        (Some(path), false) => LogSettings {
            destination: LogDestination::File(path),
            level: LevelFilter::Info,
        },
        (None, true) => LogSettings {
            destination: LogDestination::Terminal,
            level: LevelFilter::Debug,
        },
        (None, false) => LogSettings {
            destination: LogDestination::Terminal,
            level: LevelFilter::Warn,
        },
    }
}
