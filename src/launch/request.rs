use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::KeycloakConfig;

use super::args::merge_startup_args;
use super::{
    ADMIN_PASSWORD_ENV, ADMIN_USERNAME_ENV, CONTEXT_PATH_ENV, DEFAULT_CONTEXT_PATH, HTTP_PORT,
    HTTPS_PORT, READY_LOG_LINE, TLS_ENV,
};

/// A host file the runtime copies into the container before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCopy {
    /// Resolved (absolute) path on the host.
    pub host_path: PathBuf,
    /// Destination path inside the container.
    pub container_path: String,
    /// Permission bits requested for the copy.
    pub mode: u32,
}

/// One condition the container must satisfy before it counts as ready.
///
/// A readiness condition is a list of checks that must all pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessCheck {
    /// An HTTP(S) GET against `path` on the container `port` answers 2xx.
    Http {
        /// Request path, e.g. `/auth`.
        path: String,
        /// Port inside the container.
        port: u16,
        /// Use HTTPS.
        tls: bool,
        /// Skip certificate verification.
        allow_insecure: bool,
    },
    /// A line containing this text appears on stdout.
    LogLine(String),
    /// Wait a fixed amount of time.
    Delay(Duration),
}

/// Everything the container runtime needs to launch Keycloak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Image repository.
    pub image_name: String,
    /// Image tag.
    pub image_tag: String,
    /// Container environment.
    pub env: BTreeMap<String, String>,
    /// Container ports to expose.
    pub exposed_ports: Vec<u16>,
    /// Startup command passed to the image entrypoint.
    pub cmd: Vec<String>,
    /// Files copied into the container.
    pub files: Vec<FileCopy>,
    /// Explicit readiness condition; filled with the default when finalized.
    pub wait_for: Option<Vec<ReadinessCheck>>,
    /// How long the runtime waits for readiness.
    pub startup_timeout: Option<Duration>,
}

impl LaunchRequest {
    /// Request with the config's image and admin credentials, exposing HTTP.
    pub fn new(config: &KeycloakConfig) -> Self {
        let mut env = BTreeMap::new();
        env.insert(
            ADMIN_USERNAME_ENV.to_string(),
            config.admin_username.clone(),
        );
        env.insert(
            ADMIN_PASSWORD_ENV.to_string(),
            config.admin_password().to_string(),
        );

        Self {
            image_name: config.image_name.clone(),
            image_tag: config.image_tag.clone(),
            env,
            exposed_ports: vec![HTTP_PORT],
            cmd: Vec::new(),
            files: Vec::new(),
            wait_for: None,
            startup_timeout: config.startup_timeout,
        }
    }

    /// Value of a container environment variable, if set.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Context path Keycloak serves under, `/` unless configured.
    ///
    /// Used for the readiness probe; the container handle keeps the
    /// configured value as-is.
    pub fn context_path(&self) -> &str {
        self.env_value(CONTEXT_PATH_ENV)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_CONTEXT_PATH)
    }

    /// Whether a TLS option switched Keycloak to HTTPS.
    pub fn tls_enabled(&self) -> bool {
        self.env_value(TLS_ENV).is_some_and(|v| !v.is_empty())
    }

    /// Container port clients talk to: HTTPS with TLS, HTTP otherwise.
    pub fn active_port(&self) -> u16 {
        if self.tls_enabled() {
            HTTPS_PORT
        } else {
            HTTP_PORT
        }
    }

    /// Merge option flags into the startup command.
    pub fn append_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        merge_startup_args(&mut self.cmd, args);
    }

    /// Readiness used when none was configured: the context path answers on the
    /// active port and Keycloak has logged that it is running.
    pub fn default_readiness(&self) -> Vec<ReadinessCheck> {
        let tls = self.tls_enabled();
        vec![
            ReadinessCheck::Http {
                path: self.context_path().to_string(),
                port: self.active_port(),
                tls,
                allow_insecure: tls,
            },
            ReadinessCheck::LogLine(READY_LOG_LINE.to_string()),
        ]
    }

    /// Lead the command with the start verb and settle the readiness condition.
    pub(crate) fn finalize(&mut self) {
        merge_startup_args(&mut self.cmd, std::iter::empty::<String>());
        if self.wait_for.is_none() {
            self.wait_for = Some(self.default_readiness());
        }
    }

    /// Readiness condition, default included.
    pub fn readiness(&self) -> Vec<ReadinessCheck> {
        self.wait_for
            .clone()
            .unwrap_or_else(|| self.default_readiness())
    }
}
