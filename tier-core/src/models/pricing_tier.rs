use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Currency, DataType, InputMethod, OnboardingPayload};
use crate::utils::{opt_decimal_display, parse_optional_decimal, round_half_up};

/// A submitted tier as shown in the pricing-tier listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub id: i64,
    pub data_type: DataType,
    pub input_method: InputMethod,
    pub tier_name: String,
    pub price: String,
    pub currency: Currency,
    pub features: Vec<String>,
    pub customer_count: String,
    pub churn_rate: String,
    pub conversion_rate: String,
    pub uploaded_file_name: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl PricingTier {
    pub fn from_payload(
        id: i64,
        submitted_at: DateTime<Utc>,
        payload: &OnboardingPayload,
    ) -> Self {
        let tier = &payload.tier_data;
        Self {
            id,
            data_type: payload.data_type,
            input_method: payload.input_method,
            tier_name: tier.tier_name.clone(),
            price: tier.price.clone(),
            currency: tier.currency,
            features: tier.feature_list().into_iter().map(str::to_string).collect(),
            customer_count: tier.customer_count.clone(),
            churn_rate: tier.churn_rate.clone(),
            conversion_rate: tier.conversion_rate.clone(),
            uploaded_file_name: tier.uploaded_file.as_ref().map(|f| f.name.clone()),
            submitted_at,
        }
    }

    /// Tier name, or the uploaded file name for uploads submitted without one.
    pub fn display_name(&self) -> &str {
        if !self.tier_name.trim().is_empty() {
            return &self.tier_name;
        }
        self.uploaded_file_name.as_deref().unwrap_or("(unnamed)")
    }

    /// Monthly price, or `None` when the stored text is not a number.
    pub fn monthly_price(&self) -> Option<Decimal> {
        parse_optional_decimal(&self.price)
    }

    pub fn customers(&self) -> Option<Decimal> {
        parse_optional_decimal(&self.customer_count)
    }

    /// Monthly recurring revenue: price times customer count, to the cent.
    pub fn estimated_mrr(&self) -> Option<Decimal> {
        Some(round_half_up(self.monthly_price()? * self.customers()?))
    }
}

impl fmt::Display for PricingTier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "#{} {} ({})", self.id, self.display_name(), self.data_type)?;
        writeln!(
            f,
            "  Price:       {}{} {}",
            self.currency.symbol(),
            self.price,
            self.currency
        )?;
        writeln!(f, "  Customers:   {}", self.customer_count)?;
        writeln!(f, "  Churn:       {}%", self.churn_rate)?;
        writeln!(f, "  Conversion:  {}%", self.conversion_rate)?;
        writeln!(
            f,
            "  Est. MRR:    {}",
            opt_decimal_display(&self.estimated_mrr())
        )?;
        if let Some(name) = &self.uploaded_file_name {
            writeln!(f, "  Source file: {name}")?;
        }
        if !self.features.is_empty() {
            writeln!(f, "  Features:    {}", self.features.join(", "))?;
        }
        write!(
            f,
            "  Submitted:   {}",
            self.submitted_at.format("%Y-%m-%d %H:%M UTC")
        )
    }
}
