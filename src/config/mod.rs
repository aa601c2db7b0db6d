//! Configuration module for dockup
//!
//! The config file is optional; every setting has a built-in default. It
//! carries the logging settings, the per-command timeout, and per-strategy
//! overrides (enable flag, extra name-filter keywords):
//!
//! ```toml
//! [global]
//! log_directory = "~/logs"
//! command_timeout_seconds = 300
//!
//! [strategies.mysql]
//! keywords = ["percona"]
//!
//! [strategies.duplicati]
//! enabled = false
//! ```

mod loader;
mod types;

pub use loader::{load_config, ConfigError, Result, KNOWN_STRATEGIES};
pub use types::*;
