//! Running Keycloak under testcontainers.
//!
//! ```text
//! LaunchRequest ──▶ KeycloakImage ──▶ runtime start ──▶ ContainerAsync
//!                                    (copy files,          │
//!                                     wait for ready)      ▼
//!                                               KeycloakContainer
//!                                                 ├─ auth_server_url()
//!                                                 └─ admin_client()
//! ```
//!
//! [`KeycloakContainer`] only needs the [`RunningContainer`] seam, so URL
//! derivation and admin-client wiring work the same against testcontainers'
//! [`ContainerAsync`](testcontainers::ContainerAsync) and a test double.

pub mod error;
pub mod handle;
pub mod image;
pub mod runtime;

pub use error::{ContainerError, Result};
pub use handle::KeycloakContainer;
pub use image::KeycloakImage;
pub use runtime::RunningContainer;
