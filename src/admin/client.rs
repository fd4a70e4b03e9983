use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::admin::error::{AdminError, Result};
use crate::admin::model::{Client, Token};

/// Client ID Keycloak ships for admin logins.
pub const ADMIN_CLIENT_ID: &str = "admin-cli";
/// Realm the admin user lives in.
pub const MASTER_REALM: &str = "master";

/// Minimal Keycloak admin API client.
///
/// Holds credentials, not tokens: every call logs in again with the password
/// grant, so a client never goes stale between tests.
pub struct AdminClient {
    server_url: String,
    realm: String,
    username: String,
    password: SecretString,
    client_id: String,
    http: reqwest::Client,
}

impl AdminClient {
    /// Connect with the default transport.
    pub async fn new(
        server_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Result<Self> {
        Self::connect(server_url, username, password, None).await
    }

    /// Connect over `transport`, or the default transport when `None`.
    ///
    /// Logs in once to check the server and credentials; a failed login fails
    /// construction.
    pub async fn connect(
        server_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<SecretString>,
        transport: Option<reqwest::Client>,
    ) -> Result<Self> {
        let client = Self {
            server_url: server_url.into(),
            realm: MASTER_REALM.to_string(),
            username: username.into(),
            password: password.into(),
            client_id: ADMIN_CLIENT_ID.to_string(),
            http: transport.unwrap_or_default(),
        };

        client.token().await?;
        tracing::debug!("Admin client connected to {}", client.server_url);

        Ok(client)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Realm the client authenticates against.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// OAuth client ID used for the password grant.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Look up a client of `realm` by its client ID.
    ///
    /// Returns [`AdminError::ClientNotFound`] when the realm's client list has
    /// no entry with that client ID.
    pub async fn get_client(&self, realm: &str, client_id: &str) -> Result<Client> {
        let token = self.token().await?;

        let url = self.endpoint(&format!("/admin/realms/{realm}/clients"));
        tracing::trace!("Listing clients of realm '{}'", realm);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token.access_token())
            .send()
            .await
            .map_err(|source| AdminError::Transport {
                url: url.clone(),
                source,
            })?;
        let clients: Vec<Client> = decode(&url, response).await?;

        clients
            .into_iter()
            .find(|client| client.client_id.as_deref() == Some(client_id))
            .ok_or_else(|| AdminError::ClientNotFound {
                realm: realm.to_string(),
                client_id: client_id.to_string(),
            })
    }

    /// Fetch a fresh token with the resource-owner password grant.
    async fn token(&self) -> Result<Token> {
        let url = self.endpoint(&format!(
            "/realms/{}/protocol/openid-connect/token",
            self.realm
        ));
        tracing::trace!("Requesting admin token for '{}'", self.username);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "password"),
                ("client_id", self.client_id.as_str()),
                ("username", self.username.as_str()),
                ("password", self.password.expose_secret()),
            ])
            .send()
            .await
            .map_err(|source| AdminError::Transport {
                url: url.clone(),
                source,
            })?;

        decode(&url, response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), path)
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| AdminError::Transport {
            url: url.to_string(),
            source,
        })?;

    serde_json::from_slice(&body).map_err(|source| AdminError::Decode {
        url: url.to_string(),
        status: status.as_u16(),
        source,
    })
}
