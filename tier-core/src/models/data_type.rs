use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of business data the user is adding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Pricing,
    Customer,
    Competitive,
}

impl DataType {
    pub fn all() -> &'static [DataType] {
        &[Self::Pricing, Self::Customer, Self::Competitive]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pricing => "pricing",
            Self::Customer => "customer",
            Self::Competitive => "competitive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pricing" => Some(Self::Pricing),
            "customer" => Some(Self::Customer),
            "competitive" => Some(Self::Competitive),
            _ => None,
        }
    }

    /// Card title shown by the data-type selector.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Pricing => "Pricing Structures",
            Self::Customer => "Customer Behavior",
            Self::Competitive => "Competitive Data",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Pricing => "Add your current pricing tiers, plans, and subscription models.",
            Self::Customer => {
                "Upload customer usage patterns, conversion rates, and engagement metrics."
            }
            Self::Competitive => "Input competitor pricing, features, and market positioning data.",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.title())
    }
}
