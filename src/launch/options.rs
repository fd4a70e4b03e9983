//! Launch options and how each one edits a [`LaunchRequest`].

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::config::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
use crate::error::ConfigError;

use super::request::{FileCopy, LaunchRequest, ReadinessCheck};
use super::{
    ADMIN_PASSWORD_ENV, ADMIN_USERNAME_ENV, CONTEXT_PATH_ENV, COPY_FILE_MODE,
    DEFAULT_CONTEXT_PATH, HTTPS_PORT, PROVIDERS_DIR, REALM_IMPORT_DIR, TLS_CERT_PATH, TLS_ENV,
    TLS_KEY_PATH,
};

/// One customization of the Keycloak launch.
///
/// Options are applied in order. Flag-contributing options go through
/// [`merge_startup_args`](super::merge_startup_args), so they never clobber
/// each other.
#[derive(Debug, Clone)]
pub enum KeycloakOption {
    /// Admin username; empty falls back to `admin`.
    AdminUsername(String),
    /// Admin password; empty falls back to `admin`.
    AdminPassword(SecretString),
    /// HTTP relative path; empty falls back to `/`.
    ContextPath(String),
    /// Realm export copied into the import directory, imported at startup.
    RealmImportFile(PathBuf),
    /// Provider archives (JARs) copied into the providers directory.
    Providers(Vec<PathBuf>),
    /// Serve HTTPS only, with the given certificate and private key.
    Tls {
        /// PEM certificate on the host.
        certificate: PathBuf,
        /// PEM private key on the host.
        key: PathBuf,
    },
    /// Extra startup flags, merged after the start verb.
    Args(Vec<String>),
    /// Parts appended to the startup command as-is, without the merge.
    Command(Vec<String>),
    /// Replace the default readiness condition.
    WaitFor(Vec<ReadinessCheck>),
}

impl KeycloakOption {
    /// Apply this option to `request`.
    ///
    /// Fails if a host file cannot be resolved; the request may then be
    /// partially edited and should be discarded.
    pub fn apply(&self, request: &mut LaunchRequest) -> Result<(), ConfigError> {
        match self {
            Self::AdminUsername(username) => {
                let username = non_empty_or(username, DEFAULT_ADMIN_USERNAME);
                request
                    .env
                    .insert(ADMIN_USERNAME_ENV.to_string(), username.to_string());
            }
            Self::AdminPassword(password) => {
                let password = non_empty_or(password.expose_secret(), DEFAULT_ADMIN_PASSWORD);
                request
                    .env
                    .insert(ADMIN_PASSWORD_ENV.to_string(), password.to_string());
            }
            Self::ContextPath(path) => {
                let path = non_empty_or(path, DEFAULT_CONTEXT_PATH);
                request
                    .env
                    .insert(CONTEXT_PATH_ENV.to_string(), path.to_string());
                request.append_args([format!("--http-relative-path={path}")]);
            }
            Self::RealmImportFile(path) => {
                let (host_path, file_name) = resolve_host_file(path)?;
                request.files.push(FileCopy {
                    host_path,
                    container_path: format!("{REALM_IMPORT_DIR}{file_name}"),
                    mode: COPY_FILE_MODE,
                });
                request.append_args(["--import-realm"]);
            }
            Self::Providers(paths) => {
                for path in paths {
                    let (host_path, file_name) = resolve_host_file(path)?;
                    request.files.push(FileCopy {
                        host_path,
                        container_path: format!("{PROVIDERS_DIR}{file_name}"),
                        mode: COPY_FILE_MODE,
                    });
                }
            }
            Self::Tls { certificate, key } => {
                let (certificate, _) = resolve_host_file(certificate)?;
                let (key, _) = resolve_host_file(key)?;

                request.exposed_ports = vec![HTTPS_PORT];
                request.files.push(FileCopy {
                    host_path: certificate,
                    container_path: TLS_CERT_PATH.to_string(),
                    mode: COPY_FILE_MODE,
                });
                request.files.push(FileCopy {
                    host_path: key,
                    container_path: TLS_KEY_PATH.to_string(),
                    mode: COPY_FILE_MODE,
                });
                request.env.insert(TLS_ENV.to_string(), "true".to_string());
                request.append_args([
                    format!("--https-certificate-file={TLS_CERT_PATH}"),
                    format!("--https-certificate-key-file={TLS_KEY_PATH}"),
                ]);
            }
            Self::Args(args) => request.append_args(args.iter().cloned()),
            Self::Command(parts) => request.cmd.extend(parts.iter().cloned()),
            Self::WaitFor(checks) => request.wait_for = Some(checks.clone()),
        }
        Ok(())
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

/// Resolve `path` against the working directory, returning the absolute path
/// and the file name it is copied under.
fn resolve_host_file(path: &Path) -> Result<(PathBuf, String), ConfigError> {
    let resolved = std::fs::canonicalize(path).map_err(|source| ConfigError::HostPath {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ConfigError::NoFileName {
            path: path.to_path_buf(),
        })?;
    Ok((resolved, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeycloakConfig;

    fn request() -> LaunchRequest {
        LaunchRequest::new(&KeycloakConfig::default())
    }

    #[test]
    fn empty_username_falls_back_to_admin() {
        let mut req = request();
        KeycloakOption::AdminUsername("alice".to_string())
            .apply(&mut req)
            .unwrap();
        KeycloakOption::AdminUsername(String::new())
            .apply(&mut req)
            .unwrap();
        assert_eq!(req.env_value(ADMIN_USERNAME_ENV), Some("admin"));
    }

    #[test]
    fn password_is_written_to_env() {
        let mut req = request();
        KeycloakOption::AdminPassword(SecretString::from("s3cret"))
            .apply(&mut req)
            .unwrap();
        assert_eq!(req.env_value(ADMIN_PASSWORD_ENV), Some("s3cret"));
        assert!(req.cmd.is_empty());
    }

    #[test]
    fn context_path_records_env_and_flag() {
        let mut req = request();
        KeycloakOption::ContextPath("/auth".to_string())
            .apply(&mut req)
            .unwrap();
        assert_eq!(req.env_value(CONTEXT_PATH_ENV), Some("/auth"));
        assert_eq!(req.cmd, vec!["start-dev", "--http-relative-path=/auth"]);
    }

    #[test]
    fn missing_realm_file_is_an_error() {
        let mut req = request();
        let err = KeycloakOption::RealmImportFile(PathBuf::from("does/not/exist.json"))
            .apply(&mut req)
            .unwrap_err();
        assert!(matches!(err, ConfigError::HostPath { .. }));
        assert!(req.files.is_empty());
        assert!(req.cmd.is_empty());
    }

    #[test]
    fn command_appends_without_verb() {
        let mut req = request();
        KeycloakOption::Command(vec!["--health-enabled=false".to_string()])
            .apply(&mut req)
            .unwrap();
        assert_eq!(req.cmd, vec!["--health-enabled=false"]);
    }

    #[test]
    fn wait_for_replaces_readiness() {
        let mut req = request();
        KeycloakOption::WaitFor(vec![ReadinessCheck::LogLine("Listening on".to_string())])
            .apply(&mut req)
            .unwrap();
        assert_eq!(
            req.readiness(),
            vec![ReadinessCheck::LogLine("Listening on".to_string())]
        );
    }
}
