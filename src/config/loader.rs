use super::types::*;
use std::fs;
use std::path::Path;

/// Strategy names the driver knows how to build, in execution order
pub const KNOWN_STRATEGIES: &[&str] =
    &["mysql", "jellyfin", "radarr", "sonarr", "grocy", "duplicati"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown strategy '{0}'")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    for name in config.strategies.keys() {
        if !KNOWN_STRATEGIES.contains(&name.as_str()) {
            return Err(ConfigError::UnknownStrategy(name.clone()));
        }
    }

    if config.global.command_timeout_seconds == 0 {
        return Err(ConfigError::ValidationError(
            "command_timeout_seconds must be positive".to_string(),
        ));
    }

    Ok(())
}
