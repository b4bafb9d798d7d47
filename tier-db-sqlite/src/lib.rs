//! SQLite storage for confirmed onboarding submissions.

mod factory;
mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteTierRepository;
