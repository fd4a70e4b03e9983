//! Keycloak REST representations.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub struct Token {
    #[serde(deserialize_with = "secret")]
    pub access_token: SecretString,
    #[serde(default, deserialize_with = "optional_secret")]
    pub id_token: Option<SecretString>,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_expires_in: i64,
    #[serde(default, deserialize_with = "optional_secret")]
    pub refresh_token: Option<SecretString>,
    #[serde(default)]
    pub token_type: String,
    #[serde(default, rename = "not-before-policy")]
    pub not_before_policy: i64,
    #[serde(default)]
    pub session_state: Option<String>,
    #[serde(default)]
    pub scope: String,
}

impl Token {
    /// Get the access token (exposes the secret).
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

fn secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.map(SecretString::from))
}

/// A Keycloak client (`ClientRepresentation`).
///
/// Every field is optional; absent fields are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_flow_binding_overrides: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_services_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_authenticator_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_client_scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_access_grants_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontchannel_logout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_scope_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_flow_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_re_registration_timeout: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_client_scopes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_client: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_nodes: Option<HashMap<String, i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_accounts_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_flow_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surrogate_auth_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_origins: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_decodes_keycloak_response() {
        let json = r#"{
            "access_token": "eyJhbGciOi",
            "expires_in": 60,
            "refresh_expires_in": 1800,
            "refresh_token": "eyJyZWZyZXNo",
            "token_type": "Bearer",
            "not-before-policy": 0,
            "session_state": "5d1f0b3c",
            "scope": "profile email"
        }"#;

        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token(), "eyJhbGciOi");
        assert_eq!(token.expires_in, 60);
        assert_eq!(token.refresh_expires_in, 1800);
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.session_state.as_deref(), Some("5d1f0b3c"));
        assert!(token.id_token.is_none());
        assert!(token.refresh_token.is_some());
    }

    #[test]
    fn error_document_is_not_a_token() {
        let json = r#"{"error":"invalid_grant","error_description":"Invalid user credentials"}"#;
        assert!(serde_json::from_str::<Token>(json).is_err());
    }

    #[test]
    fn token_debug_hides_secrets() {
        let token: Token = serde_json::from_str(r#"{"access_token":"topsecret"}"#).unwrap();
        assert!(!format!("{token:?}").contains("topsecret"));
    }

    #[test]
    fn client_uses_camel_case_fields() {
        let json = r#"{
            "id": "8f0c",
            "clientId": "test-app",
            "enabled": true,
            "frontchannelLogout": false,
            "redirectUris": ["http://localhost:8080/*"],
            "nodeReRegistrationTimeout": -1,
            "attributes": {"pkce.code.challenge.method": "S256"}
        }"#;

        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.client_id.as_deref(), Some("test-app"));
        assert_eq!(client.frontchannel_logout, Some(false));
        assert_eq!(client.node_re_registration_timeout, Some(-1));
        assert_eq!(
            client.redirect_uris,
            Some(vec!["http://localhost:8080/*".to_string()])
        );
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let client = Client {
            client_id: Some("test-app".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&client).unwrap(),
            serde_json::json!({"clientId": "test-app"})
        );
    }
}
