//! Backup manager - orchestrates strategy execution and retention pruning

use crate::config::Config;
use crate::strategies::{mysql::MysqlBackup, sqlite::SqliteBackup, BackupStrategy};
use crate::utils::docker_ops::ContainerRuntime;
use crate::utils::prune::prune_old_backups;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

pub struct BackupManager {
    config: Config,
    backup_dir: PathBuf,
    max_age_days: u64,
    runtime: Arc<dyn ContainerRuntime>,
}

impl BackupManager {
    pub fn new(
        config: Config,
        backup_dir: PathBuf,
        max_age_days: u64,
        runtime: Arc<dyn ContainerRuntime>,
    ) -> Self {
        Self {
            config,
            backup_dir,
            max_age_days,
            runtime,
        }
    }

    /// Build the enabled strategies in their fixed execution order.
    /// Construction discovers and filters containers, so an unreachable
    /// runtime fails the whole run here.
    fn build_strategies(&self) -> Result<Vec<Box<dyn BackupStrategy>>> {
        let timeout = Duration::from_secs(self.config.global.command_timeout_seconds);
        let mut strategies: Vec<Box<dyn BackupStrategy>> = Vec::new();

        type Builder = fn(
            Arc<dyn ContainerRuntime>,
            PathBuf,
            Option<Vec<String>>,
            Duration,
        ) -> Result<SqliteBackup>;

        let settings = self.config.strategy("mysql");
        if settings.enabled {
            strategies.push(Box::new(MysqlBackup::new(
                self.runtime.clone(),
                self.backup_dir.clone(),
                settings.keywords,
                timeout,
            )?));
        }

        let sqlite_apps: [(&str, Builder); 5] = [
            ("jellyfin", SqliteBackup::jellyfin),
            ("radarr", SqliteBackup::radarr),
            ("sonarr", SqliteBackup::sonarr),
            ("grocy", SqliteBackup::grocy),
            ("duplicati", SqliteBackup::duplicati),
        ];

        for (name, builder) in sqlite_apps {
            let settings = self.config.strategy(name);
            if !settings.enabled {
                info!("Strategy '{}' is disabled, skipping", name);
                continue;
            }

            strategies.push(Box::new(builder(
                self.runtime.clone(),
                self.backup_dir.clone(),
                settings.keywords,
                timeout,
            )?));
        }

        Ok(strategies)
    }

    /// Run every enabled strategy in sequence, then prune expired backups
    pub fn run(&self) -> Result<()> {
        fs::create_dir_all(&self.backup_dir)?;

        let strategies = self.build_strategies()?;
        info!("Running {} backup strategies", strategies.len());

        let mut total_written = 0;
        let mut errors = Vec::new();

        for strategy in &strategies {
            info!("Running strategy: {}", strategy.name());

            match strategy.execute() {
                Ok(written) => {
                    info!("Strategy '{}' wrote {} file(s)", strategy.name(), written);
                    total_written += written;
                }
                Err(e) => {
                    error!("Strategy '{}' failed: {}", strategy.name(), e);
                    errors.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        let removed = prune_old_backups(&self.backup_dir, self.max_age_days)?;

        info!(
            "Backup summary: {} file(s) written, {} expired file(s) pruned",
            total_written, removed
        );

        if !errors.is_empty() {
            anyhow::bail!(
                "{} strategy(ies) failed:\n{}",
                errors.len(),
                errors.join("\n")
            );
        }

        Ok(())
    }
}
