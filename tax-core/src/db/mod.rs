pub mod repository;

pub use repository::{ConfigStore, RepositoryError};
