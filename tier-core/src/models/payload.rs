use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DataType, InputMethod, TierData};

/// Record handed to the tier repository when the user confirms the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingPayload {
    pub data_type: DataType,
    pub input_method: InputMethod,
    pub tier_data: TierData,
}

/// Acknowledgement returned by a repository for an accepted payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: i64,
    pub submitted_at: DateTime<Utc>,
}
