pub mod archive;
pub mod command;
pub mod docker;
pub mod env;
pub mod prune;

// Trait-based abstraction for testability
pub mod docker_ops;

// Re-export commonly used types and traits
#[allow(unused_imports)]
pub use docker::DockerCli;
#[allow(unused_imports)]
pub use docker_ops::{ContainerRuntime, ExecOutput};
