//! SQLite-family backup strategy
//!
//! One strategy shape shared by the SQLite-backed applications; each
//! application constructor fixes the default keywords and the glob where that
//! application keeps its database files inside the container.

use super::{discover_containers, merge_keywords, to_strings, BackupStrategy};
use crate::utils::archive::{backup_file_path, write_compressed};
use crate::utils::docker_ops::ContainerRuntime;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct SqliteBackup {
    strategy_name: &'static str,
    db_glob: &'static str,
    backup_dir: PathBuf,
    containers: Vec<String>,
    runtime: Arc<dyn ContainerRuntime>,
    timeout: Duration,
}

impl SqliteBackup {
    fn new(
        strategy_name: &'static str,
        db_glob: &'static str,
        default_keywords: &[&str],
        runtime: Arc<dyn ContainerRuntime>,
        backup_dir: PathBuf,
        custom_keywords: Option<Vec<String>>,
        timeout: Duration,
    ) -> Result<Self> {
        let keywords =
            merge_keywords(Some(to_strings(default_keywords)), custom_keywords).unwrap_or_default();

        let containers = discover_containers(runtime.as_ref(), &backup_dir, &keywords, timeout)?;

        Ok(Self {
            strategy_name,
            db_glob,
            backup_dir,
            containers,
            runtime,
            timeout,
        })
    }

    pub fn jellyfin(
        runtime: Arc<dyn ContainerRuntime>,
        backup_dir: PathBuf,
        custom_keywords: Option<Vec<String>>,
        timeout: Duration,
    ) -> Result<Self> {
        Self::new(
            "jellyfin",
            "/config/data/*.db",
            &["jellyfin"],
            runtime,
            backup_dir,
            custom_keywords,
            timeout,
        )
    }

    pub fn radarr(
        runtime: Arc<dyn ContainerRuntime>,
        backup_dir: PathBuf,
        custom_keywords: Option<Vec<String>>,
        timeout: Duration,
    ) -> Result<Self> {
        Self::new(
            "radarr",
            "/config/*.db",
            &["radarr"],
            runtime,
            backup_dir,
            custom_keywords,
            timeout,
        )
    }

    pub fn sonarr(
        runtime: Arc<dyn ContainerRuntime>,
        backup_dir: PathBuf,
        custom_keywords: Option<Vec<String>>,
        timeout: Duration,
    ) -> Result<Self> {
        Self::new(
            "sonarr",
            "/config/*.db",
            &["sonarr"],
            runtime,
            backup_dir,
            custom_keywords,
            timeout,
        )
    }

    pub fn grocy(
        runtime: Arc<dyn ContainerRuntime>,
        backup_dir: PathBuf,
        custom_keywords: Option<Vec<String>>,
        timeout: Duration,
    ) -> Result<Self> {
        Self::new(
            "grocy",
            "/config/data/*.db",
            &["grocy"],
            runtime,
            backup_dir,
            custom_keywords,
            timeout,
        )
    }

    pub fn duplicati(
        runtime: Arc<dyn ContainerRuntime>,
        backup_dir: PathBuf,
        custom_keywords: Option<Vec<String>>,
        timeout: Duration,
    ) -> Result<Self> {
        Self::new(
            "duplicati",
            "/data/*.sqlite",
            &["duplicati"],
            runtime,
            backup_dir,
            custom_keywords,
            timeout,
        )
    }

    /// List the database files matching this application's glob inside a
    /// container
    fn list_databases(&self, container: &str) -> Result<Vec<String>> {
        let listing = self
            .runtime
            .exec(container, &format!("ls {}", self.db_glob), self.timeout)
            .with_context(|| format!("Failed to list databases in '{}'", container))?;

        if !listing.success() {
            anyhow::bail!(
                "Listing '{}' in '{}' exited with code {}: {}",
                self.db_glob,
                container,
                listing.exit_code,
                listing.text().lines().next().unwrap_or("")
            );
        }

        Ok(listing
            .text()
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    /// Dump one SQLite database file and write the compressed result.
    /// The file qualifier is the base name with its extension stripped.
    fn backup_database(&self, container: &str, db_path: &str) -> Result<()> {
        let dump = self
            .runtime
            .exec(container, &format!("sqlite3 {} .dump", db_path), self.timeout)
            .with_context(|| format!("Failed to dump '{}' in '{}'", db_path, container))?;

        if !dump.success() {
            anyhow::bail!(
                "sqlite3 dump of '{}' in '{}' exited with code {}",
                db_path,
                container,
                dump.exit_code
            );
        }

        let qualifier = Path::new(db_path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| db_path.to_string());

        let path = backup_file_path(
            &self.backup_dir,
            &format!("{}_{}", container, qualifier),
            "sql.gz",
        );
        write_compressed(&path, &dump.output)?;

        info!("Backed up database '{}' from '{}'", db_path, container);
        Ok(())
    }
}

impl BackupStrategy for SqliteBackup {
    fn name(&self) -> &'static str {
        self.strategy_name
    }

    fn execute(&self) -> Result<usize> {
        let mut written = 0;

        for container in &self.containers {
            let databases = match self.list_databases(container) {
                Ok(databases) => databases,
                Err(e) => {
                    // A failed listing skips this container only; the rest of
                    // the snapshot is still processed.
                    warn!("Skipping container '{}': {}", container, e);
                    continue;
                }
            };

            for db_path in databases {
                match self.backup_database(container, &db_path) {
                    Ok(()) => written += 1,
                    Err(e) => {
                        warn!("Skipping database '{}' in '{}': {}", db_path, container, e);
                    }
                }
            }
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::docker_ops::mock::MockRuntime;
    use flate2::read::GzDecoder;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    fn backup_files(dir: &Path) -> Vec<String> {
        let mut files: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_sqlite_backup_dumps_each_listed_database() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = Arc::new(
            MockRuntime::new()
                .with_containers(&["jellyfin-media"])
                .expect(
                    "jellyfin-media",
                    "ls ",
                    0,
                    b"/config/data/jellyfin.db\n/config/data/library.db\n",
                )
                .expect("jellyfin-media", "sqlite3 ", 0, b"SQLITE DUMP"),
        );

        let strategy = SqliteBackup::jellyfin(
            runtime.clone(),
            temp_dir.path().to_path_buf(),
            None,
            Duration::from_secs(10),
        )
        .unwrap();

        let written = strategy.execute().unwrap();
        assert_eq!(written, 2);
        assert!(runtime.was_execed("jellyfin-media", "sqlite3 /config/data/jellyfin.db .dump"));
        assert!(runtime.was_execed("jellyfin-media", "sqlite3 /config/data/library.db .dump"));

        let files = backup_files(temp_dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].starts_with("jellyfin-media_jellyfin_"));
        assert!(files[1].starts_with("jellyfin-media_library_"));

        let mut decoder = GzDecoder::new(fs::File::open(temp_dir.path().join(&files[0])).unwrap());
        let mut bytes = Vec::new();
        decoder.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, b"SQLITE DUMP");
    }

    #[test]
    fn test_sqlite_listing_failure_skips_only_that_container() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = Arc::new(
            MockRuntime::new()
                .with_containers(&["radarr-a", "radarr-b"])
                .expect("radarr-a", "ls ", 2, b"ls: /config/*.db: No such file or directory\n")
                .expect("radarr-b", "ls ", 0, b"/config/radarr.db\n")
                .expect("radarr-b", "sqlite3 ", 0, b"DATA"),
        );

        let strategy = SqliteBackup::radarr(
            runtime.clone(),
            temp_dir.path().to_path_buf(),
            None,
            Duration::from_secs(10),
        )
        .unwrap();

        // The first container's listing failure must not halt the strategy
        let written = strategy.execute().unwrap();
        assert_eq!(written, 1);
        assert!(runtime.was_execed("radarr-b", "sqlite3 /config/radarr.db .dump"));

        let files = backup_files(temp_dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("radarr-b_radarr_"));
    }

    #[test]
    fn test_sqlite_qualifier_strips_directory_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = Arc::new(
            MockRuntime::new()
                .with_containers(&["duplicati-1"])
                .expect("duplicati-1", "ls ", 0, b"/data/Duplicati-server.sqlite\n")
                .expect("duplicati-1", "sqlite3 ", 0, b"X"),
        );

        let strategy = SqliteBackup::duplicati(
            runtime,
            temp_dir.path().to_path_buf(),
            None,
            Duration::from_secs(10),
        )
        .unwrap();

        strategy.execute().unwrap();

        let files = backup_files(temp_dir.path());
        assert!(files[0].starts_with("duplicati-1_Duplicati-server_"));
    }

    #[test]
    fn test_sqlite_empty_listing_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = Arc::new(
            MockRuntime::new()
                .with_containers(&["grocy-app"])
                .expect("grocy-app", "ls ", 0, b""),
        );

        let strategy = SqliteBackup::grocy(
            runtime,
            temp_dir.path().to_path_buf(),
            None,
            Duration::from_secs(10),
        )
        .unwrap();

        assert_eq!(strategy.execute().unwrap(), 0);
        assert!(backup_files(temp_dir.path()).is_empty());
    }
}
