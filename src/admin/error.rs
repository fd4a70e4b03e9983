//! Error types for the admin client.

use thiserror::Error;

/// Result type for admin API calls.
pub type Result<T> = std::result::Result<T, AdminError>;

/// Errors returned by [`AdminClient`](super::AdminClient).
#[derive(Debug, Error)]
pub enum AdminError {
    /// The request could not be sent or its body could not be read.
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Request URL.
        url: String,
        /// Underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON.
    ///
    /// Rejected logins end up here: Keycloak answers them with an error
    /// document instead of a token.
    #[error("Unexpected response from {url} (HTTP {status}): {source}")]
    Decode {
        /// Request URL.
        url: String,
        /// HTTP status of the response.
        status: u16,
        /// JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The realm has no client with the requested client ID.
    #[error("Client '{client_id}' not found in realm '{realm}'")]
    ClientNotFound {
        /// Realm that was searched.
        realm: String,
        /// Client ID that was looked up.
        client_id: String,
    },
}

impl AdminError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ClientNotFound { .. })
    }
}
