use std::fmt;

use super::WizardState;
use crate::models::{DataType, InputMethod, TierData};

/// Most features the review summary lists. The draft keeps the rest.
pub const MAX_REVIEW_FEATURES: usize = 5;

/// Read-only projection of the wizard state for the review step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary<'a> {
    data_type: Option<DataType>,
    input_method: Option<InputMethod>,
    tier: &'a TierData,
    features: Vec<&'a str>,
}

impl<'a> ReviewSummary<'a> {
    pub fn from_state(state: &'a WizardState) -> Self {
        let tier = state.draft();
        let mut features = tier.feature_list();
        features.truncate(MAX_REVIEW_FEATURES);
        Self {
            data_type: state.data_type(),
            input_method: state.input_method(),
            tier,
            features,
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    pub fn input_method(&self) -> Option<InputMethod> {
        self.input_method
    }

    pub fn tier(&self) -> &'a TierData {
        self.tier
    }

    /// Features shown in the summary.
    pub fn features(&self) -> &[&'a str] {
        &self.features
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// `value` followed by `suffix`, or a bare `-` when empty.
fn with_suffix(
    value: &str,
    suffix: &str,
) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        format!("{value}{suffix}")
    }
}

impl fmt::Display for ReviewSummary<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let tier = self.tier;
        writeln!(f, "Tier Summary")?;
        writeln!(
            f,
            "Data type:     {}",
            self.data_type.map_or("-", |d| d.title())
        )?;
        writeln!(f, "Tier name:     {}", or_dash(&tier.tier_name))?;
        writeln!(f, "Customers:     {}", or_dash(&tier.customer_count))?;
        writeln!(f, "Churn rate:    {}", with_suffix(&tier.churn_rate, "%"))?;
        writeln!(f, "Conversion:    {}", with_suffix(&tier.conversion_rate, "%"))?;
        let price = if tier.price.is_empty() {
            "-".to_string()
        } else {
            format!("{}{}", tier.currency.symbol(), tier.price)
        };
        writeln!(f, "Price:         {price}")?;
        write!(f, "Currency:      {}", tier.currency)?;
        if !self.features.is_empty() {
            let badges: Vec<String> = self.features.iter().map(|s| format!("[{s}]")).collect();
            write!(f, "\nFeatures:      {}", badges.join(" "))?;
        }
        if let Some(file) = &tier.uploaded_file {
            write!(f, "\nUploaded file: {file}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::UploadedFile;
    use crate::wizard::WizardController;

    fn reviewed(draft: TierData) -> WizardController {
        let mut wizard = WizardController::new();
        wizard.select_data_type(DataType::Pricing).unwrap();
        wizard.select_input_method(InputMethod::Upload).unwrap();
        wizard
            .submit_draft(TierData {
                uploaded_file: Some(UploadedFile::new("tiers.csv")),
                ..draft
            })
            .unwrap();
        wizard
    }

    #[test]
    fn features_drop_blank_lines_and_cap_at_five() {
        let wizard = reviewed(TierData {
            features: "A\nB\n\nC\nD\nE\nF".to_string(),
            ..Default::default()
        });
        let summary = wizard.review().unwrap();

        assert_eq!(summary.features(), &["A", "B", "C", "D", "E"]);
        assert_eq!(summary.tier().features, "A\nB\n\nC\nD\nE\nF");
        assert!(wizard.state().draft().features.contains('F'));
    }

    #[test]
    fn display_lists_fields_and_file() {
        let wizard = reviewed(TierData {
            tier_name: "Basic".to_string(),
            price: "29".to_string(),
            features: "5 Projects\nEmail Support".to_string(),
            customer_count: "150".to_string(),
            churn_rate: "3.2".to_string(),
            conversion_rate: "12.5".to_string(),
            ..Default::default()
        });

        let text = wizard.review().unwrap().to_string();

        assert_eq!(
            text,
            "Tier Summary\n\
             Data type:     Pricing Structures\n\
             Tier name:     Basic\n\
             Customers:     150\n\
             Churn rate:    3.2%\n\
             Conversion:    12.5%\n\
             Price:         $29\n\
             Currency:      USD\n\
             Features:      [5 Projects] [Email Support]\n\
             Uploaded file: tiers.csv"
        );
    }

    #[test]
    fn display_uses_dash_for_empty_fields() {
        let wizard = reviewed(TierData::default());
        let text = wizard.review().unwrap().to_string();
        assert!(text.contains("Tier name:     -"));
        assert!(text.contains("Churn rate:    -\n"));
        assert!(text.contains("Conversion:    -\n"));
        assert!(text.contains("Price:         -\n"));
        assert!(!text.contains("-%"));
        assert!(!text.contains("Features:"));
    }
}
