//! Keycloak admin REST API client.
//!
//! Only what integration tests typically need: log in as the admin user and
//! look up a realm's clients. Nothing is cached; each call authenticates.

mod client;
mod error;
mod model;

pub use client::{ADMIN_CLIENT_ID, AdminClient, MASTER_REALM};
pub use error::{AdminError, Result};
pub use model::{Client, Token};
