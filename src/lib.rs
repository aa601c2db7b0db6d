//! Dockup Library
//!
//! This library backs up stateful data from running Docker containers:
//! strategies dump each supported data engine in-container, results are
//! gzip-compressed into timestamped files, and old backups are pruned.

pub mod config;
pub mod managers;
pub mod strategies;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, Config, ConfigError};
pub use managers::backup::BackupManager;
pub use managers::logging::{init_console_logging, init_logging, LogGuard, LoggingConfig};
