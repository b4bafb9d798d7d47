use std::fmt;

use serde::{Deserialize, Serialize};

/// How the tier data is supplied in the data-entry step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    Upload,
    Manual,
}

impl InputMethod {
    pub fn all() -> &'static [InputMethod] {
        &[Self::Upload, Self::Manual]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Manual => "manual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upload" => Some(Self::Upload),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Upload => "Upload File",
            Self::Manual => "Manual Entry",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Upload => "Upload your data in CSV or JSON format for quick and easy analysis",
            Self::Manual => "Type in your data directly into structured forms with guided input",
        }
    }
}

impl fmt::Display for InputMethod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.title())
    }
}
