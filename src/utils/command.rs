//! Utilities for running external commands with proper error handling and timeouts

use anyhow::{Context, Result};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use tracing::{debug, error};

/// Run a command and return its output without inspecting the exit status.
///
/// Callers that need the exit code (e.g. to skip a failing container instead of
/// aborting) use this directly; an error here means the process could not be
/// spawned or timed out, not that it exited non-zero.
pub fn run_command_raw(
    program: &str,
    args: &[&str],
    timeout: Option<Duration>,
) -> Result<Output> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    debug!("Running command: {} {}", program, args.join(" "));

    let output = if let Some(timeout_duration) = timeout {
        // Build a throwaway current-thread runtime so callers stay synchronous
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create runtime for command timeout")?;

        runtime.block_on(async {
            let result =
                tokio::time::timeout(timeout_duration, tokio::process::Command::from(cmd).output())
                    .await;

            match result {
                Ok(output) => output.context(format!("Failed to execute {}", program)),
                Err(_) => Err(anyhow::anyhow!(
                    "Command timed out after {:?}",
                    timeout_duration
                )),
            }
        })?
    } else {
        cmd.output()
            .context(format!("Failed to execute {}", program))?
    };

    Ok(output)
}

/// Run a command, treating a non-zero exit status as an error
pub fn run_command(
    program: &str,
    args: &[&str],
    timeout: Option<Duration>,
) -> Result<Output> {
    let output = run_command_raw(program, args, timeout)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("Command failed: {} {}", program, args.join(" "));
        error!("Stderr: {}", stderr);
        anyhow::bail!(
            "Command failed with exit code {:?}: {}",
            output.status.code(),
            stderr
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
        debug!("Command output: {}", stdout);
    }

    Ok(output)
}

/// Run a command and return stdout as string
pub fn run_command_stdout(
    program: &str,
    args: &[&str],
    timeout: Option<Duration>,
) -> Result<String> {
    let output = run_command(program, args, timeout)?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_raw_captures_exit_code() {
        let output = run_command_raw("sh", &["-c", "exit 3"], None).unwrap();
        assert_eq!(output.status.code(), Some(3));
    }

    #[test]
    fn test_run_command_fails_on_nonzero_exit() {
        let result = run_command("sh", &["-c", "echo oops >&2; exit 1"], None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("oops"));
    }

    #[test]
    fn test_run_command_stdout() {
        let stdout = run_command_stdout("sh", &["-c", "echo hello"], None).unwrap();
        assert_eq!(stdout.trim(), "hello");
    }

    #[test]
    fn test_run_command_with_timeout() {
        let stdout =
            run_command_stdout("sh", &["-c", "echo fast"], Some(Duration::from_secs(10))).unwrap();
        assert_eq!(stdout.trim(), "fast");
    }

    #[test]
    fn test_run_command_timeout_expires() {
        let result = run_command_raw("sleep", &["5"], Some(Duration::from_millis(100)));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timed out"));
    }
}
