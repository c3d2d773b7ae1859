pub mod db;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod models;
pub mod repos;

pub use error::{RepoError, RepoResult};
pub use repos::Repos;
