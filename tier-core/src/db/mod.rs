pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{DbConfig, RepositoryFactory, RepositoryRegistry};
pub use memory::{MemoryRepositoryFactory, MemoryTierRepository};
pub use repository::{RepositoryError, TierRepository, check_submission};
