//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::admin::AdminError;
use crate::container::ContainerError;

/// Errors raised while turning configuration into a launch request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A host file given to an option could not be resolved.
    #[error("cannot resolve host file '{}': {source}", path.display())]
    HostPath {
        /// Path as given by the caller.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A host path resolved, but has no file name to copy it under.
    #[error("host path '{}' has no file name", path.display())]
    NoFileName {
        /// Path as given by the caller.
        path: PathBuf,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// What was wrong with it.
        message: String,
    },

    /// An environment override is not valid unicode.
    #[error("{key} is not valid unicode")]
    NotUnicode {
        /// Variable name.
        key: String,
    },
}

/// Any error the high-level Keycloak helpers can return.
#[derive(Debug, Error)]
pub enum KeycloakError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Admin(#[from] AdminError),
}

/// Result type for the high-level Keycloak helpers.
pub type Result<T> = std::result::Result<T, KeycloakError>;
