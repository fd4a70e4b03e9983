//! testcontainers [`Image`] built from a [`LaunchRequest`].

use std::borrow::Cow;
use std::collections::BTreeMap;

use testcontainers::core::wait::HttpWaitStrategy;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::{CopyToContainer, Image};

use crate::container::error::{ContainerError, Result};
use crate::launch::{LaunchRequest, ReadinessCheck};

/// A Keycloak image with everything a [`LaunchRequest`] configured.
pub struct KeycloakImage {
    name: String,
    tag: String,
    env: BTreeMap<String, String>,
    cmd: Vec<String>,
    ports: Vec<ContainerPort>,
    copies: Vec<CopyToContainer>,
    readiness: Vec<ReadinessCheck>,
    /// Client for HTTPS probes that skip certificate verification.
    insecure_probe_client: Option<reqwest::Client>,
}

impl KeycloakImage {
    /// Build the image from a finalized request.
    pub fn from_request(request: &LaunchRequest) -> Result<Self> {
        let readiness = request.readiness();

        let needs_insecure_client = readiness.iter().any(|check| {
            matches!(
                check,
                ReadinessCheck::Http {
                    allow_insecure: true,
                    ..
                }
            )
        });
        let insecure_probe_client = if needs_insecure_client {
            Some(
                reqwest::Client::builder()
                    .danger_accept_invalid_certs(true)
                    .build()
                    .map_err(ContainerError::ProbeClient)?,
            )
        } else {
            None
        };

        // The runtime applies its own permissions to copied files.
        let copies = request
            .files
            .iter()
            .map(|file| CopyToContainer::new(file.host_path.clone(), file.container_path.clone()))
            .collect();

        Ok(Self {
            name: request.image_name.clone(),
            tag: request.image_tag.clone(),
            env: request.env.clone(),
            cmd: request.cmd.clone(),
            ports: request
                .exposed_ports
                .iter()
                .map(|port| ContainerPort::Tcp(*port))
                .collect(),
            copies,
            readiness,
            insecure_probe_client,
        })
    }

    fn wait_for(&self, check: &ReadinessCheck) -> WaitFor {
        match check {
            ReadinessCheck::Http {
                path,
                port,
                tls,
                allow_insecure,
            } => {
                let mut strategy = HttpWaitStrategy::new(path.clone())
                    .with_port(ContainerPort::Tcp(*port))
                    .with_response_matcher(|response| response.status().is_success());
                if *tls {
                    strategy = strategy.with_tls();
                }
                if *allow_insecure && let Some(client) = &self.insecure_probe_client {
                    strategy = strategy.with_client(client.clone());
                }
                WaitFor::http(strategy)
            }
            ReadinessCheck::LogLine(line) => WaitFor::message_on_stdout(line.as_str()),
            ReadinessCheck::Delay(length) => WaitFor::Duration { length: *length },
        }
    }
}

impl Image for KeycloakImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn ready_conditions(&self) -> Vec<WaitFor> {
        self.readiness
            .iter()
            .map(|check| self.wait_for(check))
            .collect()
    }

    fn env_vars(
        &self,
    ) -> impl IntoIterator<Item = (impl Into<Cow<'_, str>>, impl Into<Cow<'_, str>>)> {
        &self.env
    }

    fn copy_to_sources(&self) -> impl IntoIterator<Item = &CopyToContainer> {
        &self.copies
    }

    fn cmd(&self) -> impl IntoIterator<Item = impl Into<Cow<'_, str>>> {
        &self.cmd
    }

    fn expose_ports(&self) -> &[ContainerPort] {
        &self.ports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeycloakConfig;

    #[test]
    fn image_mirrors_request() {
        let mut request = LaunchRequest::new(&KeycloakConfig::default());
        request.finalize();
        let image = KeycloakImage::from_request(&request).unwrap();

        assert_eq!(image.name(), "quay.io/keycloak/keycloak");
        assert_eq!(image.tag(), "24.0");
        assert_eq!(image.expose_ports(), &[ContainerPort::Tcp(8080)]);
        assert_eq!(image.ready_conditions().len(), 2);
        assert!(image.insecure_probe_client.is_none());

        let cmd: Vec<String> = image
            .cmd()
            .into_iter()
            .map(|part| {
                let part: Cow<'_, str> = part.into();
                part.into_owned()
            })
            .collect();
        assert_eq!(cmd, vec!["start-dev".to_string()]);
    }

    #[test]
    fn tls_readiness_builds_insecure_client() {
        let mut request = LaunchRequest::new(&KeycloakConfig::default());
        request
            .env
            .insert("KEYCLOAK_TLS".to_string(), "true".to_string());
        request.exposed_ports = vec![8443];
        request.finalize();

        let image = KeycloakImage::from_request(&request).unwrap();
        assert!(image.insecure_probe_client.is_some());
        assert_eq!(image.expose_ports(), &[ContainerPort::Tcp(8443)]);
    }
}
