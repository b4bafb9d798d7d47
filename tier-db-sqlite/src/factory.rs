use async_trait::async_trait;

use tier_core::db::{DbConfig, RepositoryError, RepositoryFactory, TierRepository};

use crate::repository::SqliteTierRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`tier_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use tier_core::db::RepositoryRegistry;
/// use tier_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::with_builtin();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database named by `config.connection_string` and bring its
    /// schema up to date.
    ///
    /// Accepted values: a file path (`tiers.db`, created if missing), a
    /// sqlx URL (`sqlite:tiers.db`), or `:memory:`.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn TierRepository>, RepositoryError> {
        let repo = SqliteTierRepository::new(&config.connection_string).await?;
        repo.run_migrations().await?;
        Ok(Box::new(repo))
    }
}
