//! Backup file naming and compressed output

use anyhow::{Context, Result};
use chrono::Local;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build a timestamped destination path: `{dir}/{name}_{YYYY-MM-DD_HH-MM-SS}.{ext}`.
///
/// The timestamp is generated fresh per call in local time. There is no
/// collision detection; within the same second the same name/extension pair
/// resolves to the same path and a later write overwrites the earlier one.
pub fn backup_file_path(backup_dir: &Path, name: &str, extension: &str) -> PathBuf {
    let now = Local::now().format("%Y-%m-%d_%H-%M-%S");
    backup_dir.join(format!("{}_{}.{}", name, now, extension))
}

/// Gzip-compress a payload and write it to the given path, creating parent
/// directories as needed. Prints a confirmation line to stdout, the stable
/// user-facing channel for written files.
pub fn write_compressed(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let file = File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;

    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(data)
        .with_context(|| format!("Failed to write compressed data to {:?}", path))?;
    encoder
        .finish()
        .with_context(|| format!("Failed to finish compressed file {:?}", path))?;

    debug!("Compressed {} bytes to {:?}", data.len(), path);
    println!("Wrote file: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn decompress(path: &Path) -> Vec<u8> {
        let file = File::open(path).unwrap();
        let mut decoder = GzDecoder::new(file);
        let mut bytes = Vec::new();
        decoder.read_to_end(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_backup_file_path_format() {
        let path = backup_file_path(Path::new("/backups"), "db_app", "sql.gz");
        let name = path.file_name().unwrap().to_string_lossy().to_string();

        assert!(path.starts_with("/backups"));
        assert!(name.starts_with("db_app_"));
        assert!(name.ends_with(".sql.gz"));

        // Timestamp segment: YYYY-MM-DD_HH-MM-SS
        let stamp = name
            .strip_prefix("db_app_")
            .unwrap()
            .strip_suffix(".sql.gz")
            .unwrap();
        assert_eq!(stamp.len(), 19);
        assert_eq!(stamp.as_bytes()[10], b'_');
    }

    #[test]
    fn test_backup_file_paths_differ_across_seconds() {
        let first = backup_file_path(Path::new("/backups"), "db", "sql.gz");
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let second = backup_file_path(Path::new("/backups"), "db", "sql.gz");
        assert_ne!(first, second);
    }

    #[test]
    fn test_write_compressed_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dump.sql.gz");

        let payload = b"CREATE TABLE t (id INTEGER);\x00\xff\x01binary";
        write_compressed(&path, payload).unwrap();

        assert_eq!(decompress(&path), payload);
    }

    #[test]
    fn test_write_compressed_empty_payload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.sql.gz");

        write_compressed(&path, b"").unwrap();

        assert!(decompress(&path).is_empty());
    }

    #[test]
    fn test_write_compressed_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("dump.sql.gz");

        write_compressed(&path, b"DUMP").unwrap();

        assert_eq!(decompress(&path), b"DUMP");
    }
}
