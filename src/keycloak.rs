//! Builder that launches a Keycloak container.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerRequest, ImageExt};

use crate::config::KeycloakConfig;
use crate::container::{ContainerError, KeycloakContainer, KeycloakImage};
use crate::error::{ConfigError, Result};
use crate::launch::{KeycloakOption, LaunchRequest, ReadinessCheck};

/// A Keycloak container waiting to be started.
///
/// Options are recorded in the order they are added and applied on
/// [`launch_request`](Self::launch_request) / [`start`](Self::start).
#[derive(Debug, Clone, Default)]
pub struct Keycloak {
    config: KeycloakConfig,
    options: Vec<KeycloakOption>,
}

impl Keycloak {
    /// Start from `config` with no options applied.
    pub fn new(config: KeycloakConfig) -> Self {
        Self {
            config,
            options: Vec::new(),
        }
    }

    /// Defaults this launch starts from.
    pub fn config(&self) -> &KeycloakConfig {
        &self.config
    }

    /// Run a different image, given as `name[:tag]`.
    pub fn with_image(mut self, reference: &str) -> Self {
        self.config = self.config.with_image(reference);
        self
    }

    /// How long to wait for the container to become ready.
    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.config.startup_timeout = Some(timeout);
        self
    }

    /// Add one option; it is applied after those already added.
    pub fn with_option(mut self, option: KeycloakOption) -> Self {
        self.options.push(option);
        self
    }

    /// Add several options, in iteration order.
    pub fn with_options(mut self, options: impl IntoIterator<Item = KeycloakOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Admin username; empty falls back to `admin`.
    pub fn with_admin_username(self, username: impl Into<String>) -> Self {
        self.with_option(KeycloakOption::AdminUsername(username.into()))
    }

    /// Admin password; empty falls back to `admin`.
    pub fn with_admin_password(self, password: impl Into<SecretString>) -> Self {
        self.with_option(KeycloakOption::AdminPassword(password.into()))
    }

    /// Serve Keycloak under `path`, e.g. `/auth`.
    pub fn with_context_path(self, path: impl Into<String>) -> Self {
        self.with_option(KeycloakOption::ContextPath(path.into()))
    }

    /// Import a realm export file at startup.
    pub fn with_realm_import_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_option(KeycloakOption::RealmImportFile(path.into()))
    }

    /// Install provider archives.
    ///
    /// See <https://www.keycloak.org/server/configuration-provider>.
    pub fn with_providers<P: Into<PathBuf>>(self, paths: impl IntoIterator<Item = P>) -> Self {
        self.with_option(KeycloakOption::Providers(
            paths.into_iter().map(Into::into).collect(),
        ))
    }

    /// Serve HTTPS with a PEM certificate and key.
    pub fn with_tls(self, certificate: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        self.with_option(KeycloakOption::Tls {
            certificate: certificate.into(),
            key: key.into(),
        })
    }

    /// Extra startup flags, e.g. `--features=token-exchange`.
    pub fn with_args<S: Into<String>>(self, args: impl IntoIterator<Item = S>) -> Self {
        self.with_option(KeycloakOption::Args(
            args.into_iter().map(Into::into).collect(),
        ))
    }

    /// Append raw parts to the startup command.
    pub fn with_command<S: Into<String>>(self, parts: impl IntoIterator<Item = S>) -> Self {
        self.with_option(KeycloakOption::Command(
            parts.into_iter().map(Into::into).collect(),
        ))
    }

    /// Replace the default readiness condition.
    pub fn with_wait_for(self, checks: Vec<ReadinessCheck>) -> Self {
        self.with_option(KeycloakOption::WaitFor(checks))
    }

    /// Apply all options to the configured defaults.
    pub fn launch_request(&self) -> std::result::Result<LaunchRequest, ConfigError> {
        let mut request = LaunchRequest::new(&self.config);
        for option in &self.options {
            option.apply(&mut request)?;
        }
        request.finalize();
        Ok(request)
    }

    /// Start the container and wait until it is ready.
    pub async fn start(self) -> Result<KeycloakContainer> {
        let request = self.launch_request()?;
        let image_reference = self.config.image_reference();

        let image = KeycloakImage::from_request(&request)?;
        let mut container_request = ContainerRequest::from(image);
        if let Some(timeout) = request.startup_timeout {
            container_request = container_request.with_startup_timeout(timeout);
        }

        tracing::debug!("Starting {} with command {:?}", image_reference, request.cmd);
        let container = container_request
            .start()
            .await
            .map_err(|e| ContainerError::StartFailed {
                image: image_reference.clone(),
                reason: e.to_string(),
            })?;
        tracing::debug!("Started {} as {}", image_reference, container.id());

        Ok(KeycloakContainer::new(container, &request)
            .with_admin_timeout(self.config.admin_timeout))
    }
}
