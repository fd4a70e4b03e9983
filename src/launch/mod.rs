//! Translating launch options into container launch parameters.
//!
//! A [`LaunchRequest`] starts from a [`KeycloakConfig`](crate::KeycloakConfig)
//! and is edited by each [`KeycloakOption`] in turn. Options that contribute
//! startup flags go through [`merge_startup_args`], which keeps `start-dev`
//! as the first and only verb of the command.

mod args;
mod options;
mod request;

pub use args::merge_startup_args;
pub use options::KeycloakOption;
pub use request::{FileCopy, LaunchRequest, ReadinessCheck};

/// Startup verb every command begins with.
pub const START_COMMAND: &str = "start-dev";
/// Plain HTTP listener inside the container.
pub const HTTP_PORT: u16 = 8080;
/// HTTPS listener inside the container.
pub const HTTPS_PORT: u16 = 8443;
/// Context path when none is configured.
pub const DEFAULT_CONTEXT_PATH: &str = "/";
/// Log line Keycloak prints once it accepts requests.
pub const READY_LOG_LINE: &str = "Running the server";

/// Directory Keycloak imports realm exports from with `--import-realm`.
pub const REALM_IMPORT_DIR: &str = "/opt/keycloak/data/import/";
/// Directory Keycloak loads provider archives from.
pub const PROVIDERS_DIR: &str = "/opt/keycloak/providers/";
/// Directory the TLS certificate and key are copied to.
pub const TLS_DIR: &str = "/opt/keycloak/conf";
pub(crate) const TLS_CERT_PATH: &str = "/opt/keycloak/conf/tls.crt";
pub(crate) const TLS_KEY_PATH: &str = "/opt/keycloak/conf/tls.key";

pub(crate) const ADMIN_USERNAME_ENV: &str = "KEYCLOAK_ADMIN";
pub(crate) const ADMIN_PASSWORD_ENV: &str = "KEYCLOAK_ADMIN_PASSWORD";
pub(crate) const CONTEXT_PATH_ENV: &str = "KEYCLOAK_CONTEXT_PATH";
pub(crate) const TLS_ENV: &str = "KEYCLOAK_TLS";

pub(crate) const COPY_FILE_MODE: u32 = 0o755;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tls_paths_live_in_tls_dir() {
        assert!(TLS_CERT_PATH.starts_with(TLS_DIR));
        assert!(TLS_KEY_PATH.starts_with(TLS_DIR));
    }
}
