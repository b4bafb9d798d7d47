mod currency;
mod data_type;
mod input_method;
mod payload;
mod pricing_tier;
mod tier_data;
mod uploaded_file;

pub use currency::Currency;
pub use data_type::DataType;
pub use input_method::InputMethod;
pub use payload::{OnboardingPayload, SubmissionReceipt};
pub use pricing_tier::PricingTier;
pub use tier_data::{TierData, TierField};
pub use uploaded_file::UploadedFile;
