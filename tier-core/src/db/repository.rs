use async_trait::async_trait;
use thiserror::Error;

use crate::models::{InputMethod, OnboardingPayload, PricingTier, SubmissionReceipt, TierField};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Store that receives confirmed onboarding payloads and serves the
/// pricing-tier listing built from them.
#[async_trait]
pub trait TierRepository: Send + Sync {
    /// Persist one confirmed payload.
    async fn submit(
        &self,
        payload: &OnboardingPayload,
    ) -> Result<SubmissionReceipt, RepositoryError>;

    async fn get_tier(
        &self,
        id: i64,
    ) -> Result<PricingTier, RepositoryError>;

    /// All stored tiers, oldest first.
    async fn list_tiers(&self) -> Result<Vec<PricingTier>, RepositoryError>;

    async fn delete_tier(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError>;
}

/// Checks a payload the way a storage backend should before accepting it.
///
/// The wizard only requires manual fields to be non-empty. Backends also
/// refuse whitespace-only values, and upload payloads without a file.
pub fn check_submission(payload: &OnboardingPayload) -> Result<(), RepositoryError> {
    let tier = &payload.tier_data;
    match payload.input_method {
        InputMethod::Upload if tier.uploaded_file.is_none() => Err(RepositoryError::Rejected(
            "upload submission has no file attached".to_string(),
        )),
        InputMethod::Upload => Ok(()),
        InputMethod::Manual => {
            let blank: Vec<&str> = TierField::REQUIRED
                .iter()
                .filter(|f| tier.field(**f).trim().is_empty())
                .map(|f| f.label())
                .collect();
            if blank.is_empty() {
                Ok(())
            } else {
                Err(RepositoryError::Rejected(format!(
                    "blank required fields: {}",
                    blank.join(", ")
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataType, TierData, UploadedFile};

    fn payload(
        input_method: InputMethod,
        tier_data: TierData,
    ) -> OnboardingPayload {
        OnboardingPayload {
            data_type: DataType::Pricing,
            input_method,
            tier_data,
        }
    }

    fn filled() -> TierData {
        TierData {
            tier_name: "Pro".to_string(),
            price: "59".to_string(),
            customer_count: "10".to_string(),
            churn_rate: "2".to_string(),
            conversion_rate: "8".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn complete_manual_payload_passes() {
        assert_eq!(check_submission(&payload(InputMethod::Manual, filled())), Ok(()));
    }

    #[test]
    fn whitespace_only_fields_are_rejected_by_name() {
        let tier = TierData {
            tier_name: "  ".to_string(),
            churn_rate: "\t".to_string(),
            ..filled()
        };
        match check_submission(&payload(InputMethod::Manual, tier)) {
            Err(RepositoryError::Rejected(msg)) => {
                assert!(msg.contains("Tier Name"), "{msg}");
                assert!(msg.contains("Churn Rate"), "{msg}");
                assert!(!msg.contains("Price"), "{msg}");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn upload_needs_file_but_not_text() {
        assert!(matches!(
            check_submission(&payload(InputMethod::Upload, TierData::default())),
            Err(RepositoryError::Rejected(_))
        ));
        let with_file = TierData {
            uploaded_file: Some(UploadedFile::new("tiers.csv")),
            ..Default::default()
        };
        assert_eq!(check_submission(&payload(InputMethod::Upload, with_file)), Ok(()));
    }
}
