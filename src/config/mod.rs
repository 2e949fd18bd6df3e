pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_bind_address, validate_log_format, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "receipt-processor")]
#[command(about = "Scores purchase receipts and serves their points over HTTP")]
pub struct CliConfig {
    /// Address to listen on (host:port)
    #[arg(long)]
    pub bind: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併 CLI 參數與設定檔，CLI 優先
    pub fn resolve(&self) -> Result<ServerSettings> {
        let file_config = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Some(config)
            }
            None => None,
        };

        ServerSettings::merge(
            file_config.as_ref(),
            self.bind.clone(),
            self.verbose,
            self.json_logs,
        )
    }
}

/// Effective settings of the running server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: String,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl ServerSettings {
    pub fn merge(
        file_config: Option<&TomlConfig>,
        bind: Option<String>,
        verbose: bool,
        json_logs: bool,
    ) -> Result<Self> {
        let bind = bind
            .or_else(|| file_config.and_then(|c| c.bind().map(str::to_string)))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let log_format = if json_logs {
            LogFormat::Json
        } else {
            match file_config.and_then(|c| c.log_format()) {
                Some(format) => validate_log_format("logging.format", format)?,
                None => LogFormat::Compact,
            }
        };

        Ok(Self {
            bind,
            log_level: file_config.and_then(|c| c.log_level().map(str::to_ascii_lowercase)),
            log_format,
            verbose,
        })
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            log_level: None,
            log_format: LogFormat::Compact,
            verbose: false,
        }
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validate_bind_address("bind", &self.bind)
    }
}
