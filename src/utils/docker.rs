//! Docker CLI implementation of the container runtime

use super::command::{run_command_raw, run_command_stdout};
use super::docker_ops::{ContainerRuntime, ExecOutput};
use anyhow::Result;
use std::time::Duration;

/// Container runtime backed by the `docker` command-line client
#[derive(Debug, Clone, Default)]
pub struct DockerCli;

impl DockerCli {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerRuntime for DockerCli {
    fn list_running(&self, timeout: Duration) -> Result<Vec<String>> {
        let output = run_command_stdout(
            "docker",
            &["ps", "--format", "{{.Names}}"],
            Some(timeout),
        )?;

        Ok(output.lines().map(|s| s.to_string()).collect())
    }

    fn exec(&self, container: &str, command: &str, timeout: Duration) -> Result<ExecOutput> {
        let output = run_command_raw(
            "docker",
            &["exec", container, "sh", "-c", command],
            Some(timeout),
        )?;

        // Combine stdout and stderr, as the Docker exec API does without
        // stream demultiplexing
        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        Ok(ExecOutput {
            output: combined,
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
