use crate::config::toml_config::{ServiceVariant, TomlConfig};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;

/// Command-line flags shared by both server binaries.
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Path to a TOML configuration file; environment variables are used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on, overrides `service.bind_address`
    #[arg(long)]
    pub bind: Option<String>,

    /// Log format: compact or json
    #[arg(long)]
    pub log_format: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Loads the configuration and applies command-line overrides.
    pub fn load_config(&self, variant: ServiceVariant) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::from_env()?,
        };

        if let Some(bind) = &self.bind {
            config.service.bind_address = Some(bind.clone());
        }

        if let Some(format) = &self.log_format {
            config.service.log_format = Some(format.clone());
        }

        config.validate_for(variant)?;
        Ok(config)
    }

    pub fn log_format(&self, config: &TomlConfig) -> LogFormat {
        config
            .service
            .log_format
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }
}
