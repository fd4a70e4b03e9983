//! Keycloak for integration tests.
//!
//! Launches a Keycloak container through [testcontainers], configured with
//! admin credentials, a context path, realm imports, provider archives and
//! TLS, and talks to its admin REST API.
//!
//! ```rust,no_run
//! use testcontainers_keycloak::Keycloak;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let keycloak = Keycloak::default()
//!     .with_context_path("/auth")
//!     .with_realm_import_file("tests/testdata/realm-export.json")
//!     .with_admin_username("admin")
//!     .with_admin_password("admin")
//!     .start()
//!     .await?;
//!
//! // e.g. http://localhost:32768/auth
//! let url = keycloak.auth_server_url().await?;
//! println!("Keycloak available at: {}", url);
//!
//! let admin = keycloak.admin_client().await?;
//! let client = admin.get_client("Test", "test-app").await?;
//! assert_eq!(client.client_id.as_deref(), Some("test-app"));
//!
//! keycloak.terminate().await?;
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod config;
pub mod container;
pub mod error;
pub mod keycloak;
pub mod launch;

pub use admin::{AdminClient, AdminError};
pub use config::KeycloakConfig;
pub use container::{ContainerError, KeycloakContainer, RunningContainer};
pub use error::{ConfigError, KeycloakError};
pub use keycloak::Keycloak;
pub use launch::{KeycloakOption, LaunchRequest, ReadinessCheck};
