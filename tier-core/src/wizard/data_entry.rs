//! Step 3: collecting the tier record.

use std::fmt;

use super::{WizardController, WizardError, WizardState};
use crate::models::{Currency, InputMethod, TierData, TierField, UploadedFile};

/// Something the data-entry step still needs before it can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Field(TierField),
    File,
}

impl fmt::Display for Requirement {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field.label()),
            Self::File => f.write_str("attached file"),
        }
    }
}

/// Submission rules for a draft under the given input method.
///
/// * Upload: a file must be attached. Its content is not inspected.
/// * Manual: every required text field must be non-empty. Currency always
///   counts as present and the feature list is optional. Values are not
///   parsed or range-checked.
pub fn unmet_requirements(
    method: InputMethod,
    draft: &TierData,
) -> Vec<Requirement> {
    match method {
        InputMethod::Upload if draft.uploaded_file.is_none() => vec![Requirement::File],
        InputMethod::Upload => Vec::new(),
        InputMethod::Manual => draft
            .missing_required()
            .into_iter()
            .map(Requirement::Field)
            .collect(),
    }
}

/// Working copy of the draft while the user is on the data-entry step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntryForm {
    method: InputMethod,
    data: TierData,
}

impl DataEntryForm {
    /// Starts a form from the current draft.
    ///
    /// A manual-entry form never carries an attachment, so submitting one
    /// clears any file left over from an earlier upload attempt.
    pub fn new(
        method: InputMethod,
        draft: &TierData,
    ) -> Self {
        let mut data = draft.clone();
        if method == InputMethod::Manual {
            data.uploaded_file = None;
        }
        Self { method, data }
    }

    /// Form for the wizard's current draft, or `None` before an input
    /// method has been chosen.
    pub fn for_state(state: &WizardState) -> Option<Self> {
        state
            .input_method()
            .map(|method| Self::new(method, state.draft()))
    }

    pub fn method(&self) -> InputMethod {
        self.method
    }

    pub fn data(&self) -> &TierData {
        &self.data
    }

    pub fn set(
        &mut self,
        field: TierField,
        value: impl Into<String>,
    ) {
        *self.data.field_mut(field) = value.into();
    }

    pub fn set_currency(
        &mut self,
        currency: Currency,
    ) {
        self.data.currency = currency;
    }

    /// Attaches `file`, replacing any previous attachment. Only one file is
    /// held at a time. Ignored (returns `false`) for manual entry.
    pub fn attach(
        &mut self,
        file: UploadedFile,
    ) -> bool {
        if self.method != InputMethod::Upload {
            return false;
        }
        self.data.uploaded_file = Some(file);
        true
    }

    pub fn detach(&mut self) -> Option<UploadedFile> {
        self.data.uploaded_file.take()
    }

    pub fn attachment(&self) -> Option<&UploadedFile> {
        self.data.uploaded_file.as_ref()
    }

    pub fn missing(&self) -> Vec<Requirement> {
        unmet_requirements(self.method, &self.data)
    }

    /// Whether the finish affordance is enabled.
    pub fn is_valid(&self) -> bool {
        self.missing().is_empty()
    }

    /// Hands the working copy to the wizard, which validates it again and
    /// advances to review.
    pub fn submit(
        &self,
        wizard: &mut WizardController,
    ) -> Result<(), WizardError> {
        wizard.submit_draft(self.data.clone())
    }
}
