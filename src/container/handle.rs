//! Handle to a running Keycloak container.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use testcontainers::ContainerAsync;

use crate::admin::AdminClient;
use crate::container::error::{ContainerError, Result};
use crate::container::image::KeycloakImage;
use crate::container::runtime::RunningContainer;
use crate::launch::{
    ADMIN_PASSWORD_ENV, ADMIN_USERNAME_ENV, CONTEXT_PATH_ENV, HTTP_PORT, HTTPS_PORT, LaunchRequest,
};

/// A running Keycloak container plus the settings it was launched with.
///
/// The container stays up until [`terminate`](Self::terminate) is called (or
/// the underlying runtime handle is dropped).
pub struct KeycloakContainer<C = ContainerAsync<KeycloakImage>> {
    container: C,
    username: String,
    password: SecretString,
    context_path: String,
    tls_enabled: bool,
    admin_timeout: Option<Duration>,
}

impl<C: RunningContainer> KeycloakContainer<C> {
    /// Wrap a started container, remembering credentials, context path and
    /// TLS from the request that launched it.
    ///
    /// The context path is kept as configured; without one it is empty.
    pub fn new(container: C, request: &LaunchRequest) -> Self {
        Self {
            container,
            username: request
                .env_value(ADMIN_USERNAME_ENV)
                .unwrap_or_default()
                .to_string(),
            password: SecretString::from(
                request.env_value(ADMIN_PASSWORD_ENV).unwrap_or_default(),
            ),
            context_path: request
                .env_value(CONTEXT_PATH_ENV)
                .unwrap_or_default()
                .to_string(),
            tls_enabled: request.tls_enabled(),
            admin_timeout: None,
        }
    }

    /// Request timeout for admin clients built with the default transport.
    pub fn with_admin_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.admin_timeout = timeout;
        self
    }

    /// The underlying runtime handle.
    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn id(&self) -> &str {
        self.container.id()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls_enabled
    }

    /// Container port Keycloak is reached on.
    pub fn port(&self) -> u16 {
        if self.tls_enabled { HTTPS_PORT } else { HTTP_PORT }
    }

    /// Host the container's ports are published on.
    pub async fn host(&self) -> Result<String> {
        self.container.host().await
    }

    /// Host port mapped to a container port.
    pub async fn mapped_port(&self, port: u16) -> Result<u16> {
        self.container.mapped_port(port).await
    }

    /// Externally reachable base URL, e.g. `http://localhost:32768/auth`, or
    /// `http://localhost:32768` without a context path.
    ///
    /// Host and port are looked up from the runtime on every call.
    pub async fn auth_server_url(&self) -> Result<String> {
        let host = self.container.host().await?;
        let port = self.container.mapped_port(self.port()).await?;
        let scheme = if self.tls_enabled { "https" } else { "http" };

        let url = format!("{}://{}:{}{}", scheme, host, port, self.context_path);
        tracing::debug!("Keycloak '{}' reachable at {}", self.id(), url);
        Ok(url)
    }

    /// Admin client for this container, using the default transport.
    pub async fn admin_client(&self) -> crate::error::Result<AdminClient> {
        let transport = default_transport(self.admin_timeout)?;
        self.admin_client_with(transport).await
    }

    /// Admin client for this container over a caller-supplied transport,
    /// e.g. one that trusts the container's self-signed certificate.
    pub async fn admin_client_with(
        &self,
        transport: reqwest::Client,
    ) -> crate::error::Result<AdminClient> {
        let server_url = self.auth_server_url().await?;
        let client = AdminClient::connect(
            server_url,
            self.username.clone(),
            self.password.expose_secret(),
            Some(transport),
        )
        .await?;
        Ok(client)
    }

    /// Stop and remove the container.
    pub async fn terminate(self) -> Result<()> {
        self.container.terminate().await
    }
}

fn default_transport(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ContainerError::AdminTransport)
}
