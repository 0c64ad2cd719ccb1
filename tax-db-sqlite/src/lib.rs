//! SQLite-backed [`tax_core::ConfigStore`].

mod bootstrap;
mod decimal;
pub mod repository;

pub use bootstrap::open_store;
pub use repository::SqliteConfigStore;
