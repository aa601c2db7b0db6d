use anyhow::Result;
use clap::Parser;
use dockup::managers::logging::{init_logging, LoggingConfig};
use dockup::utils::docker::DockerCli;
use dockup::{config, BackupManager, Config};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dockup")]
#[command(about = "Back up stateful data from running Docker containers", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory where backup archives are written
    backup_dir: PathBuf,

    /// Delete backup files older than this many days
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    max_days: u64,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };

    // Setup logging with file rotation (must keep guard alive)
    let logging_config = LoggingConfig::from_global(&config.global);
    let _log_guard = init_logging(&logging_config)?;

    if which::which("docker").is_err() {
        eprintln!("⚠️  Docker CLI not found in PATH!");
        eprintln!();
        eprintln!("dockup discovers and dumps containers through the docker client.");
        eprintln!("Install docker or add it to PATH, then try again.");
        eprintln!();
        std::process::exit(1);
    }

    let runtime = Arc::new(DockerCli::new());
    let manager = BackupManager::new(config, cli.backup_dir, cli.max_days, runtime);

    manager.run()?;

    println!("✓ All backups completed successfully");
    Ok(())
}
