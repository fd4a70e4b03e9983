//! The slice of the container runtime the Keycloak handle depends on.

use async_trait::async_trait;
use testcontainers::core::ContainerPort;
use testcontainers::{ContainerAsync, Image};

use crate::container::error::{ContainerError, Result};

/// A started container that can report where it is reachable.
///
/// Implemented for testcontainers' [`ContainerAsync`]; tests substitute their
/// own implementation to exercise URL derivation without Docker.
#[async_trait]
pub trait RunningContainer: Send + Sync {
    /// Runtime identifier of the container.
    fn id(&self) -> &str;

    /// Host the mapped ports are reachable on.
    async fn host(&self) -> Result<String>;

    /// Host port mapped to the container `port` (TCP).
    async fn mapped_port(&self, port: u16) -> Result<u16>;

    /// Stop and remove the container.
    async fn terminate(self) -> Result<()>;
}

#[async_trait]
impl<I: Image> RunningContainer for ContainerAsync<I> {
    fn id(&self) -> &str {
        ContainerAsync::id(self)
    }

    async fn host(&self) -> Result<String> {
        self.get_host()
            .await
            .map(|host| host.to_string())
            .map_err(|e| ContainerError::HostResolution {
                id: ContainerAsync::id(self).to_string(),
                reason: e.to_string(),
            })
    }

    async fn mapped_port(&self, port: u16) -> Result<u16> {
        self.get_host_port_ipv4(ContainerPort::Tcp(port))
            .await
            .map_err(|e| ContainerError::PortResolution {
                id: ContainerAsync::id(self).to_string(),
                port,
                reason: e.to_string(),
            })
    }

    async fn terminate(self) -> Result<()> {
        let id = ContainerAsync::id(&self).to_string();
        tracing::debug!("Removing container: {}", id);
        self.rm().await.map_err(|e| ContainerError::TerminateFailed {
            id,
            reason: e.to_string(),
        })
    }
}
