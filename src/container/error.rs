//! Error types for the Keycloak container.

use thiserror::Error;

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;

/// Errors that can occur while running or querying the container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The runtime failed to create, start, or wait for the container.
    #[error("Failed to start container from '{image}': {reason}")]
    StartFailed {
        /// Image reference.
        image: String,
        /// Reason for failure.
        reason: String,
    },

    /// The HTTPS readiness probe client could not be built.
    #[error("Failed to build readiness probe client: {0}")]
    ProbeClient(#[source] reqwest::Error),

    /// The default admin client transport could not be built.
    #[error("Failed to build admin client transport: {0}")]
    AdminTransport(#[source] reqwest::Error),

    /// The runtime could not report the container host.
    #[error("Failed to resolve host of container '{id}': {reason}")]
    HostResolution {
        /// Container ID.
        id: String,
        /// Reason for failure.
        reason: String,
    },

    /// The runtime could not report the host port mapped to a container port.
    #[error("Failed to resolve mapped port {port}/tcp of container '{id}': {reason}")]
    PortResolution {
        /// Container ID.
        id: String,
        /// Container port.
        port: u16,
        /// Reason for failure.
        reason: String,
    },

    /// Stopping or removing the container failed.
    #[error("Failed to terminate container '{id}': {reason}")]
    TerminateFailed {
        /// Container ID.
        id: String,
        /// Reason for failure.
        reason: String,
    },
}
