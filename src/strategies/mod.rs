//! Backup strategies
//!
//! Each strategy knows how to dump one kind of data engine from inside its
//! containers. Container discovery and keyword filtering happen once, at
//! construction; `execute` operates over that snapshot.

pub mod mysql;
pub mod sqlite;

use crate::utils::docker_ops::ContainerRuntime;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Trait for backup strategies
pub trait BackupStrategy {
    /// Strategy name (for logging)
    fn name(&self) -> &'static str;

    /// Back up every matching container, returning the number of files written
    fn execute(&self) -> Result<usize>;
}

/// Merge a strategy's default keywords with caller-supplied custom keywords.
/// Both present means concatenation, without deduplication.
pub fn merge_keywords(
    defaults: Option<Vec<String>>,
    custom: Option<Vec<String>>,
) -> Option<Vec<String>> {
    match (defaults, custom) {
        (None, None) => None,
        (Some(defaults), None) => Some(defaults),
        (None, Some(custom)) => Some(custom),
        (Some(mut defaults), Some(custom)) => {
            defaults.extend(custom);
            Some(defaults)
        }
    }
}

/// Keep the containers whose name contains at least one keyword as a
/// case-sensitive substring
pub fn filter_containers(names: Vec<String>, keywords: &[String]) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| keywords.iter().any(|k| name.contains(k.as_str())))
        .collect()
}

/// Discover running containers matching the keywords, creating the backup
/// directory if missing. The result is a snapshot; strategies do not re-query.
pub fn discover_containers(
    runtime: &dyn ContainerRuntime,
    backup_dir: &Path,
    keywords: &[String],
    timeout: Duration,
) -> Result<Vec<String>> {
    let running = runtime
        .list_running(timeout)
        .context("Failed to list running containers")?;

    fs::create_dir_all(backup_dir)
        .with_context(|| format!("Failed to create backup directory: {:?}", backup_dir))?;

    Ok(filter_containers(running, keywords))
}

fn to_strings(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|s| s.to_string()).collect()
}
