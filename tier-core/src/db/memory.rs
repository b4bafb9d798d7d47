//! Process-local [`TierRepository`] backend.
//!
//! Nothing survives the process. Used by tests and by `--backend memory`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::repository::check_submission;
use super::{DbConfig, RepositoryError, RepositoryFactory, TierRepository};
use crate::models::{OnboardingPayload, PricingTier, SubmissionReceipt};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    tiers: Vec<PricingTier>,
}

#[derive(Debug, Default)]
pub struct MemoryTierRepository {
    store: Mutex<Store>,
}

impl MemoryTierRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, RepositoryError> {
        self.store
            .lock()
            .map_err(|e| RepositoryError::Database(format!("store lock poisoned: {e}")))
    }
}

#[async_trait]
impl TierRepository for MemoryTierRepository {
    async fn submit(
        &self,
        payload: &OnboardingPayload,
    ) -> Result<SubmissionReceipt, RepositoryError> {
        check_submission(payload)?;
        let mut store = self.lock()?;
        store.next_id += 1;
        let receipt = SubmissionReceipt {
            id: store.next_id,
            submitted_at: Utc::now(),
        };
        store
            .tiers
            .push(PricingTier::from_payload(receipt.id, receipt.submitted_at, payload));
        Ok(receipt)
    }

    async fn get_tier(
        &self,
        id: i64,
    ) -> Result<PricingTier, RepositoryError> {
        self.lock()?
            .tiers
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_tiers(&self) -> Result<Vec<PricingTier>, RepositoryError> {
        Ok(self.lock()?.tiers.clone())
    }

    async fn delete_tier(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let mut store = self.lock()?;
        let before = store.tiers.len();
        store.tiers.retain(|t| t.id != id);
        if store.tiers.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend. Every `create` call
/// returns a fresh, empty store; the connection string is ignored.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn TierRepository>, RepositoryError> {
        Ok(Box::new(MemoryTierRepository::new()))
    }
}
