//! Command-line and environment configuration for the server binary.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;

use crate::state::AdminCredentials;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive income tax calculator served over HTTP.
///
/// Every flag can also be supplied through the environment variable named
/// next to it; `.env.local` is loaded first when present.
#[derive(Debug, Clone, Parser)]
#[command(name = "tax-server", version, about, long_about = None)]
pub struct Cli {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database: a sqlx URL, a file path or `:memory:`.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:tax.db?mode=rwc")]
    pub database_url: String,

    /// Username required by the admin routes.
    #[arg(long, env = "ADMIN_USERNAME")]
    pub admin_username: String,

    /// Password required by the admin routes.
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,
}

impl Cli {
    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials {
            username: self.admin_username.clone(),
            password: self.admin_password.clone(),
        }
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
