//! tax-server library target.
//!
//! Exposes the router, state and wire types so integration tests can drive
//! the HTTP surface without binding a socket. `main.rs` depends on this.

pub mod api_types;
pub mod config;
pub mod csv_loader;
pub mod error;
pub mod routes;
pub mod state;
