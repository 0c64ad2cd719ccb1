pub mod calculations;
pub mod db;
pub mod models;

pub use db::repository::{ConfigStore, RepositoryError};
pub use models::*;
