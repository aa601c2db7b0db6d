use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,

    /// Per-strategy overrides, keyed by strategy name
    #[serde(default)]
    pub strategies: HashMap<String, StrategyConfig>,
}

impl Config {
    /// Settings for one strategy, falling back to defaults when the config
    /// file has no table for it
    pub fn strategy(&self, name: &str) -> StrategyConfig {
        self.strategies.get(name).cloned().unwrap_or_default()
    }
}

/// Global configuration settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalConfig {
    /// Logging configuration
    #[serde(default = "default_log_directory")]
    pub log_directory: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_max_files")]
    pub log_max_files: u32,

    /// Timeout for each remote command execution
    #[serde(default = "default_command_timeout")]
    pub command_timeout_seconds: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_directory: default_log_directory(),
            log_level: default_log_level(),
            log_max_files: default_log_max_files(),
            command_timeout_seconds: default_command_timeout(),
        }
    }
}

/// Per-strategy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Extra name-filter keywords, concatenated with the strategy's defaults
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            keywords: None,
        }
    }
}

// Default value functions

fn default_log_directory() -> PathBuf { PathBuf::from("~/logs") }
fn default_log_level() -> String { "info".to_string() }
fn default_log_max_files() -> u32 { 10 }
fn default_command_timeout() -> u64 { 300 }
fn default_enabled() -> bool { true }
