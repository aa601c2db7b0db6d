//! Container runtime abstraction for testability
//!
//! This module provides a trait-based abstraction over the container runtime,
//! enabling dependency injection and mocking for tests.

use anyhow::Result;
use std::time::Duration;

/// Result of running a command inside a container.
///
/// `output` holds stdout and stderr combined, matching what the Docker exec API
/// returns when streams are not demultiplexed.
#[derive(Clone, Debug)]
pub struct ExecOutput {
    pub output: Vec<u8>,
    pub exit_code: i32,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Combined output decoded lossily as UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).to_string()
    }
}

/// Abstraction over the container runtime, enabling mocking in tests
pub trait ContainerRuntime: Send + Sync {
    /// List the names of all currently running containers
    fn list_running(&self, timeout: Duration) -> Result<Vec<String>>;

    /// Run a shell command inside a container and capture its combined output
    /// and exit status
    fn exec(&self, container: &str, command: &str, timeout: Duration) -> Result<ExecOutput>;
}

/// Mock implementation for testing
/// Available for use in integration tests
#[allow(dead_code)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Recorded exec invocation
    #[derive(Clone, Debug)]
    pub struct ExecCall {
        pub container: String,
        pub command: String,
    }

    #[derive(Clone, Debug)]
    struct ExecRule {
        container: String,
        command_prefix: String,
        response: ExecOutput,
    }

    /// Mock container runtime for testing
    #[derive(Clone, Default)]
    pub struct MockRuntime {
        /// Running container names returned by list_running
        containers: Arc<Mutex<Vec<String>>>,
        /// Configured responses, matched by container name and command prefix
        rules: Arc<Mutex<Vec<ExecRule>>>,
        /// Recorded exec calls
        calls: Arc<Mutex<Vec<ExecCall>>>,
        /// Whether list_running should fail
        should_fail_list: Arc<Mutex<bool>>,
    }

    impl MockRuntime {
        pub fn new() -> Self {
            Self::default()
        }

        /// Configure running containers
        pub fn with_containers(self, names: &[&str]) -> Self {
            *self.containers.lock().unwrap() = names.iter().map(|s| s.to_string()).collect();
            self
        }

        /// Configure the response for commands starting with `command_prefix`
        /// in the given container
        pub fn expect(
            self,
            container: &str,
            command_prefix: &str,
            exit_code: i32,
            output: &[u8],
        ) -> Self {
            self.rules.lock().unwrap().push(ExecRule {
                container: container.to_string(),
                command_prefix: command_prefix.to_string(),
                response: ExecOutput {
                    output: output.to_vec(),
                    exit_code,
                },
            });
            self
        }

        /// Configure list_running to fail
        pub fn with_failing_list(self) -> Self {
            *self.should_fail_list.lock().unwrap() = true;
            self
        }

        /// Get all recorded exec calls
        pub fn get_calls(&self) -> Vec<ExecCall> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of exec calls made against a container
        pub fn exec_count(&self, container: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.container == container)
                .count()
        }

        /// Whether any exec call in a container started with the given prefix
        pub fn was_execed(&self, container: &str, command_prefix: &str) -> bool {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .any(|c| c.container == container && c.command.starts_with(command_prefix))
        }
    }

    impl ContainerRuntime for MockRuntime {
        fn list_running(&self, _timeout: Duration) -> Result<Vec<String>> {
            if *self.should_fail_list.lock().unwrap() {
                anyhow::bail!("Mock list_running failure");
            }
            Ok(self.containers.lock().unwrap().clone())
        }

        fn exec(&self, container: &str, command: &str, _timeout: Duration) -> Result<ExecOutput> {
            self.calls.lock().unwrap().push(ExecCall {
                container: container.to_string(),
                command: command.to_string(),
            });

            let rules = self.rules.lock().unwrap();
            let response = rules
                .iter()
                .find(|r| r.container == container && command.starts_with(&r.command_prefix))
                .map(|r| r.response.clone())
                .unwrap_or(ExecOutput {
                    output: Vec::new(),
                    exit_code: 0,
                });

            Ok(response)
        }
    }
}
