//! Shared runtime state for tax-server.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum. The configuration
//! store is the only mutable resource and lives behind the `ConfigStore`
//! trait object.

use std::fmt;
use std::sync::Arc;

use tax_core::ConfigStore;

/// Basic-auth credentials guarding the admin routes.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Cloneable (Arc) handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ConfigStore>,
    pub admin: AdminCredentials,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        admin: AdminCredentials,
    ) -> Self {
        Self { store, admin }
    }
}
