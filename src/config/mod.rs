//! Launch defaults for the Keycloak container.
//!
//! Callers either take [`KeycloakConfig::default`] or
//! [`KeycloakConfig::resolve`] one from the environment.

mod helpers;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;
use helpers::optional_env;

/// Image used when nothing else is configured.
pub const DEFAULT_IMAGE_NAME: &str = "quay.io/keycloak/keycloak";
/// Tag used together with [`DEFAULT_IMAGE_NAME`].
pub const DEFAULT_IMAGE_TAG: &str = "24.0";
/// Fallback admin username, also used when an empty username is given.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Fallback admin password, also used when an empty password is given.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

const IMAGE_ENV: &str = "TESTCONTAINERS_KEYCLOAK_IMAGE";
const ADMIN_USERNAME_ENV: &str = "TESTCONTAINERS_KEYCLOAK_ADMIN_USERNAME";
const ADMIN_PASSWORD_ENV: &str = "TESTCONTAINERS_KEYCLOAK_ADMIN_PASSWORD";
const STARTUP_TIMEOUT_ENV: &str = "TESTCONTAINERS_KEYCLOAK_STARTUP_TIMEOUT_SECS";
const ADMIN_TIMEOUT_ENV: &str = "TESTCONTAINERS_KEYCLOAK_ADMIN_TIMEOUT_SECS";

/// Defaults a [`Keycloak`](crate::Keycloak) launch starts from.
#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    /// Image repository, e.g. `quay.io/keycloak/keycloak`.
    pub image_name: String,
    /// Image tag, e.g. `24.0`.
    pub image_tag: String,
    /// Admin username written to the container environment.
    pub admin_username: String,
    /// Admin password written to the container environment.
    pub admin_password: SecretString,
    /// How long the runtime waits for the readiness condition.
    /// `None` keeps the runtime's own default.
    pub startup_timeout: Option<Duration>,
    /// Request timeout for the default admin client transport.
    /// `None` keeps the transport's own default.
    pub admin_timeout: Option<Duration>,
}

impl Default for KeycloakConfig {
    fn default() -> Self {
        Self {
            image_name: DEFAULT_IMAGE_NAME.to_string(),
            image_tag: DEFAULT_IMAGE_TAG.to_string(),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
            startup_timeout: None,
            admin_timeout: None,
        }
    }
}

impl KeycloakConfig {
    /// Build a config from the defaults, overridden by `TESTCONTAINERS_KEYCLOAK_*`
    /// environment variables.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::resolve_with(optional_env)
    }

    /// Like [`resolve`](Self::resolve), reading variables through `lookup`.
    /// Empty values count as unset.
    pub(crate) fn resolve_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let var = |key: &str| -> Result<Option<String>, ConfigError> {
            Ok(lookup(key)?.filter(|value| !value.is_empty()))
        };
        let mut config = Self::default();

        if let Some(reference) = var(IMAGE_ENV)? {
            config = config.with_image(&reference);
        }
        if let Some(username) = var(ADMIN_USERNAME_ENV)? {
            config.admin_username = username;
        }
        if let Some(password) = var(ADMIN_PASSWORD_ENV)? {
            config.admin_password = SecretString::from(password);
        }
        config.startup_timeout = parse_secs(STARTUP_TIMEOUT_ENV, var(STARTUP_TIMEOUT_ENV)?)?;
        config.admin_timeout = parse_secs(ADMIN_TIMEOUT_ENV, var(ADMIN_TIMEOUT_ENV)?)?;

        Ok(config)
    }

    /// Replace the image with a `name[:tag]` reference.
    ///
    /// A reference without a tag selects `latest`.
    pub fn with_image(mut self, reference: &str) -> Self {
        let (name, tag) = split_image_reference(reference);
        self.image_name = name.to_string();
        self.image_tag = tag.to_string();
        self
    }

    /// Full image reference, `name:tag`.
    pub fn image_reference(&self) -> String {
        format!("{}:{}", self.image_name, self.image_tag)
    }

    /// Get the admin password (exposes the secret).
    pub fn admin_password(&self) -> &str {
        self.admin_password.expose_secret()
    }
}

fn parse_secs(key: &str, value: Option<String>) -> Result<Option<Duration>, ConfigError> {
    value
        .map(|s| s.parse::<u64>())
        .transpose()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("must be a whole number of seconds: {e}"),
        })
        .map(|secs| secs.map(Duration::from_secs))
}

/// Split `registry:5000/repo/name:tag` into name and tag.
///
/// Only a colon after the last slash separates the tag, so registry ports
/// stay part of the name.
pub(crate) fn split_image_reference(reference: &str) -> (&str, &str) {
    let name_start = reference.rfind('/').map_or(0, |i| i + 1);
    match reference[name_start..].rfind(':') {
        Some(i) => {
            let split = name_start + i;
            (&reference[..split], &reference[split + 1..])
        }
        None => (reference, "latest"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve_from(vars: &[(&str, &str)]) -> Result<KeycloakConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        KeycloakConfig::resolve_with(|key| Ok(vars.get(key).cloned()))
    }

    #[test]
    fn default_config_uses_quay_image() {
        let config = KeycloakConfig::default();
        assert_eq!(config.image_reference(), "quay.io/keycloak/keycloak:24.0");
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password(), "admin");
        assert!(config.startup_timeout.is_none());
    }

    #[test]
    fn image_reference_with_tag() {
        assert_eq!(
            split_image_reference("keycloak/keycloak:24.0"),
            ("keycloak/keycloak", "24.0")
        );
    }

    #[test]
    fn image_reference_without_tag_is_latest() {
        assert_eq!(
            split_image_reference("quay.io/keycloak/keycloak"),
            ("quay.io/keycloak/keycloak", "latest")
        );
    }

    #[test]
    fn registry_port_is_not_a_tag() {
        assert_eq!(
            split_image_reference("localhost:5000/keycloak"),
            ("localhost:5000/keycloak", "latest")
        );
        assert_eq!(
            split_image_reference("localhost:5000/keycloak:25.0"),
            ("localhost:5000/keycloak", "25.0")
        );
    }

    #[test]
    fn with_image_replaces_name_and_tag() {
        let config = KeycloakConfig::default().with_image("keycloak/keycloak:23.0");
        assert_eq!(config.image_name, "keycloak/keycloak");
        assert_eq!(config.image_tag, "23.0");
    }

    #[test]
    fn password_is_redacted_in_debug() {
        let config = KeycloakConfig::default();
        let debug = format!("{config:?}");
        assert!(!debug.contains("admin_password: \"admin\""));
    }

    #[test]
    fn resolve_without_overrides_matches_default() {
        let config = resolve_from(&[]).unwrap();
        assert_eq!(config.image_reference(), "quay.io/keycloak/keycloak:24.0");
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password(), "admin");
        assert!(config.startup_timeout.is_none());
        assert!(config.admin_timeout.is_none());
    }

    #[test]
    fn resolve_applies_every_override() {
        let config = resolve_from(&[
            ("TESTCONTAINERS_KEYCLOAK_IMAGE", "keycloak/keycloak:25.0"),
            ("TESTCONTAINERS_KEYCLOAK_ADMIN_USERNAME", "root"),
            ("TESTCONTAINERS_KEYCLOAK_ADMIN_PASSWORD", "hunter2"),
            ("TESTCONTAINERS_KEYCLOAK_STARTUP_TIMEOUT_SECS", "180"),
            ("TESTCONTAINERS_KEYCLOAK_ADMIN_TIMEOUT_SECS", "15"),
        ])
        .unwrap();

        assert_eq!(config.image_name, "keycloak/keycloak");
        assert_eq!(config.image_tag, "25.0");
        assert_eq!(config.admin_username, "root");
        assert_eq!(config.admin_password(), "hunter2");
        assert_eq!(config.startup_timeout, Some(Duration::from_secs(180)));
        assert_eq!(config.admin_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn resolve_treats_empty_values_as_unset() {
        let config = resolve_from(&[
            ("TESTCONTAINERS_KEYCLOAK_IMAGE", ""),
            ("TESTCONTAINERS_KEYCLOAK_ADMIN_USERNAME", ""),
            ("TESTCONTAINERS_KEYCLOAK_ADMIN_PASSWORD", ""),
            ("TESTCONTAINERS_KEYCLOAK_STARTUP_TIMEOUT_SECS", ""),
        ])
        .unwrap();

        assert_eq!(config.image_reference(), "quay.io/keycloak/keycloak:24.0");
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password(), "admin");
        assert!(config.startup_timeout.is_none());
    }

    #[test]
    fn resolve_rejects_non_numeric_timeout() {
        let err = resolve_from(&[("TESTCONTAINERS_KEYCLOAK_ADMIN_TIMEOUT_SECS", "abc")])
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => {
                assert_eq!(key, "TESTCONTAINERS_KEYCLOAK_ADMIN_TIMEOUT_SECS");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn resolve_propagates_lookup_errors() {
        let err = KeycloakConfig::resolve_with(|key| {
            Err(ConfigError::NotUnicode {
                key: key.to_string(),
            })
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotUnicode { key } if key == "TESTCONTAINERS_KEYCLOAK_IMAGE"
        ));
    }
}
