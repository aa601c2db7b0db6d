//! Retention pruning for the backup directory

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Delete files in the backup directory whose last-modified time is strictly
/// older than `max_age_days` days. Non-recursive; files exactly at the cutoff
/// are retained. Returns the number of files removed.
pub fn prune_old_backups(backup_dir: &Path, max_age_days: u64) -> Result<usize> {
    let cutoff = SystemTime::now() - Duration::from_secs(max_age_days * SECONDS_PER_DAY);
    prune_older_than(backup_dir, cutoff)
}

fn prune_older_than(backup_dir: &Path, cutoff: SystemTime) -> Result<usize> {
    let entries = fs::read_dir(backup_dir)
        .with_context(|| format!("Failed to read backup directory: {:?}", backup_dir))?;

    let mut removed = 0;

    for entry in entries {
        let entry = entry?;
        let metadata = entry.metadata()?;

        if !metadata.is_file() {
            continue;
        }

        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to read mtime of {:?}", entry.path()))?;

        if modified < cutoff {
            fs::remove_file(entry.path())
                .with_context(|| format!("Failed to delete expired backup {:?}", entry.path()))?;
            info!("Pruned expired backup: {:?}", entry.path());
            removed += 1;
        } else {
            debug!("Keeping backup: {:?}", entry.path());
        }
    }

    Ok(removed)
}
