//! MySQL/MariaDB backup strategy
//!
//! Dumps each matching container's database with mysqldump, using the
//! database name and root password from the container's environment.

use super::{discover_containers, merge_keywords, to_strings, BackupStrategy};
use crate::utils::archive::{backup_file_path, write_compressed};
use crate::utils::docker_ops::ContainerRuntime;
use crate::utils::env::parse_env;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_KEYWORDS: &[&str] = &["mysql", "mariadb"];

pub struct MysqlBackup {
    backup_dir: PathBuf,
    containers: Vec<String>,
    runtime: Arc<dyn ContainerRuntime>,
    timeout: Duration,
}

impl MysqlBackup {
    /// Discover matching containers and capture them as a snapshot.
    /// `custom_keywords` come from configuration and are concatenated with the
    /// built-in defaults.
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        backup_dir: PathBuf,
        custom_keywords: Option<Vec<String>>,
        timeout: Duration,
    ) -> Result<Self> {
        let keywords = merge_keywords(Some(to_strings(DEFAULT_KEYWORDS)), custom_keywords)
            .unwrap_or_default();

        let containers = discover_containers(runtime.as_ref(), &backup_dir, &keywords, timeout)?;

        Ok(Self {
            backup_dir,
            containers,
            runtime,
            timeout,
        })
    }

    fn backup_container(&self, container: &str) -> Result<()> {
        let env_output = self
            .runtime
            .exec(container, "env", self.timeout)
            .with_context(|| format!("Failed to read environment of '{}'", container))?;

        if !env_output.success() {
            anyhow::bail!(
                "Reading environment of '{}' exited with code {}",
                container,
                env_output.exit_code
            );
        }

        let env = parse_env(&env_output.text());

        // Missing variables pass through as empty text; the dump command then
        // fails inside the container and is caught by the exit-status check.
        let database = env.get("MYSQL_DATABASE").cloned().unwrap_or_default();
        let password = env.get("MYSQL_ROOT_PASSWORD").cloned().unwrap_or_default();

        let dump_command = format!("/usr/bin/mysqldump {} -u root -p{}", database, password);

        let dump = self
            .runtime
            .exec(container, &dump_command, self.timeout)
            .with_context(|| format!("Failed to run mysqldump in '{}'", container))?;

        if !dump.success() {
            anyhow::bail!(
                "mysqldump in '{}' exited with code {}: {}",
                container,
                dump.exit_code,
                dump.text().lines().next().unwrap_or("")
            );
        }

        let path = backup_file_path(
            &self.backup_dir,
            &format!("{}_{}", container, database),
            "sql.gz",
        );
        write_compressed(&path, &dump.output)?;

        info!("Backed up database '{}' from '{}'", database, container);
        Ok(())
    }
}

impl BackupStrategy for MysqlBackup {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn execute(&self) -> Result<usize> {
        let mut written = 0;

        for container in &self.containers {
            match self.backup_container(container) {
                Ok(()) => written += 1,
                Err(e) => {
                    warn!("Skipping container '{}': {}", container, e);
                }
            }
        }

        Ok(written)
    }
}
