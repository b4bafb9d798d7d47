use serde::{Deserialize, Serialize};

use super::{Currency, UploadedFile};

/// Text fields of a [`TierData`] draft that the data-entry form edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierField {
    TierName,
    Price,
    Features,
    CustomerCount,
    ChurnRate,
    ConversionRate,
}

impl TierField {
    /// Fields that must be non-empty for a manual entry to be submittable.
    pub const REQUIRED: [TierField; 5] = [
        Self::TierName,
        Self::Price,
        Self::CustomerCount,
        Self::ChurnRate,
        Self::ConversionRate,
    ];

    pub fn all() -> &'static [TierField] {
        &[
            Self::TierName,
            Self::Price,
            Self::Features,
            Self::CustomerCount,
            Self::ChurnRate,
            Self::ConversionRate,
        ]
    }

    /// Short key used on the command line (`set price 29`).
    pub fn key(&self) -> &'static str {
        match self {
            Self::TierName => "name",
            Self::Price => "price",
            Self::Features => "features",
            Self::CustomerCount => "customers",
            Self::ChurnRate => "churn",
            Self::ConversionRate => "conversion",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TierName => "Tier Name",
            Self::Price => "Price (per month)",
            Self::Features => "Feature List",
            Self::CustomerCount => "Customer Count",
            Self::ChurnRate => "Churn Rate (%)",
            Self::ConversionRate => "Conversion Rate (%)",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Features)
    }
}

/// The tier description accumulated by the onboarding wizard.
///
/// Numeric-looking fields stay as the text the user typed. Interpretation
/// is left to whoever consumes the submitted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierData {
    pub tier_name: String,
    pub price: String,
    pub currency: Currency,
    /// One feature per line.
    pub features: String,
    pub customer_count: String,
    pub churn_rate: String,
    pub conversion_rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_file: Option<UploadedFile>,
}

impl TierData {
    pub fn field(
        &self,
        field: TierField,
    ) -> &str {
        match field {
            TierField::TierName => &self.tier_name,
            TierField::Price => &self.price,
            TierField::Features => &self.features,
            TierField::CustomerCount => &self.customer_count,
            TierField::ChurnRate => &self.churn_rate,
            TierField::ConversionRate => &self.conversion_rate,
        }
    }

    pub fn field_mut(
        &mut self,
        field: TierField,
    ) -> &mut String {
        match field {
            TierField::TierName => &mut self.tier_name,
            TierField::Price => &mut self.price,
            TierField::Features => &mut self.features,
            TierField::CustomerCount => &mut self.customer_count,
            TierField::ChurnRate => &mut self.churn_rate,
            TierField::ConversionRate => &mut self.conversion_rate,
        }
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_required(&self) -> Vec<TierField> {
        TierField::REQUIRED
            .into_iter()
            .filter(|f| self.field(*f).is_empty())
            .collect()
    }

    /// Every non-blank line of the feature text, in order.
    pub fn feature_list(&self) -> Vec<&str> {
        self.features
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}
