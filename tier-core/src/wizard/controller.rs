use tracing::{debug, info, warn};

use super::{ReviewSummary, Step, WizardError, data_entry::unmet_requirements};
use crate::db::TierRepository;
use crate::models::{DataType, InputMethod, OnboardingPayload, SubmissionReceipt, TierData};

/// Everything the wizard has accumulated so far.
///
/// Only [`WizardController`] writes to it; everything else gets a shared
/// reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    current_step: Step,
    data_type: Option<DataType>,
    input_method: Option<InputMethod>,
    draft: TierData,
}

impl WizardState {
    fn new() -> Self {
        Self {
            current_step: Step::FIRST,
            data_type: None,
            input_method: None,
            draft: TierData::default(),
        }
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    pub fn input_method(&self) -> Option<InputMethod> {
        self.input_method
    }

    pub fn draft(&self) -> &TierData {
        &self.draft
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the host application should go once the wizard exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    PricingTiers,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::PricingTiers => "/pricing-tiers",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Result of leaving the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardExit {
    pub route: Route,
    /// Set when the draft was accepted by the repository.
    pub receipt: Option<SubmissionReceipt>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Active,
    Confirmed,
    Cancelled,
}

/// Owns [`WizardState`] and performs every transition of the onboarding flow.
///
/// | from              | action                | to                |
/// |-------------------|-----------------------|-------------------|
/// | SelectDataType    | `select_data_type`    | ChooseInputMethod |
/// | ChooseInputMethod | `retreat`             | SelectDataType    |
/// | ChooseInputMethod | `select_input_method` | DataEntry         |
/// | DataEntry         | `retreat`             | ChooseInputMethod |
/// | DataEntry         | `submit_draft`        | ReviewConfirm     |
/// | ReviewConfirm     | `edit_requested`      | DataEntry         |
/// | ReviewConfirm     | `confirm`             | exit              |
/// | any               | `cancel`              | exit              |
#[derive(Debug, Default)]
pub struct WizardController {
    state: WizardState,
    lifecycle: Lifecycle,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_finished(&self) -> bool {
        self.lifecycle() != Lifecycle::Active
    }

    /// Moves one step forward, stopping at the review step.
    pub fn advance(&mut self) -> Step {
        if !self.is_finished() {
            self.move_to(self.state.current_step.next());
        }
        self.state.current_step
    }

    /// Moves one step back, stopping at the first step.
    pub fn retreat(&mut self) -> Step {
        if !self.is_finished() {
            self.move_to(self.state.current_step.previous());
        }
        self.state.current_step
    }

    /// Commits the data type and advances in one transition.
    pub fn select_data_type(
        &mut self,
        data_type: DataType,
    ) -> Result<(), WizardError> {
        self.expect_step(Step::SelectDataType)?;
        self.state.data_type = Some(data_type);
        self.advance();
        Ok(())
    }

    /// Commits the input method and advances in one transition.
    pub fn select_input_method(
        &mut self,
        method: InputMethod,
    ) -> Result<(), WizardError> {
        self.expect_step(Step::ChooseInputMethod)?;
        self.state.input_method = Some(method);
        self.advance();
        Ok(())
    }

    /// Replaces the draft and advances to review.
    ///
    /// The draft must satisfy the data-entry rules for the chosen input
    /// method; otherwise nothing changes.
    pub fn submit_draft(
        &mut self,
        draft: TierData,
    ) -> Result<(), WizardError> {
        self.expect_step(Step::DataEntry)?;
        let method = self
            .state
            .input_method
            .ok_or(WizardError::MissingSelection(Step::ChooseInputMethod))?;

        let missing = unmet_requirements(method, &draft);
        if !missing.is_empty() {
            return Err(WizardError::IncompleteDraft(missing));
        }

        self.state.draft = draft;
        self.advance();
        Ok(())
    }

    /// Jumps from review straight back to data entry. Earlier selections are kept.
    pub fn edit_requested(&mut self) -> Result<(), WizardError> {
        self.expect_step(Step::ReviewConfirm)?;
        self.move_to(Step::DataEntry);
        Ok(())
    }

    /// The record that [`confirm`](Self::confirm) would dispatch.
    pub fn payload(&self) -> Result<OnboardingPayload, WizardError> {
        Ok(OnboardingPayload {
            data_type: self
                .state
                .data_type
                .ok_or(WizardError::MissingSelection(Step::SelectDataType))?,
            input_method: self
                .state
                .input_method
                .ok_or(WizardError::MissingSelection(Step::ChooseInputMethod))?,
            tier_data: self.state.draft.clone(),
        })
    }

    /// Summary for the review step, or `None` on any other step.
    pub fn review(&self) -> Option<ReviewSummary<'_>> {
        (self.state.current_step == Step::ReviewConfirm && !self.is_finished())
            .then(|| ReviewSummary::from_state(&self.state))
    }

    /// Hands the draft to `repository` and, once it is accepted, exits the
    /// wizard towards the pricing-tier listing.
    ///
    /// On failure the wizard stays on the review step with the draft intact.
    pub async fn confirm(
        &mut self,
        repository: &dyn TierRepository,
    ) -> Result<WizardExit, WizardError> {
        self.expect_step(Step::ReviewConfirm)?;
        let payload = self.payload()?;

        match repository.submit(&payload).await {
            Ok(receipt) => {
                info!(
                    id = receipt.id,
                    tier = %payload.tier_data.tier_name,
                    data_type = payload.data_type.as_str(),
                    "onboarding confirmed"
                );
                self.lifecycle = Lifecycle::Confirmed;
                Ok(WizardExit {
                    route: Route::PricingTiers,
                    receipt: Some(receipt),
                })
            }
            Err(error) => {
                warn!(%error, "tier submission failed");
                Err(error.into())
            }
        }
    }

    /// Leaves the wizard without submitting. The draft is discarded.
    pub fn cancel(&mut self) -> Result<WizardExit, WizardError> {
        if self.is_finished() {
            return Err(WizardError::Finished);
        }
        info!(step = self.state.current_step.number(), "onboarding cancelled");
        self.state = WizardState::new();
        self.lifecycle = Lifecycle::Cancelled;
        Ok(WizardExit {
            route: Route::Dashboard,
            receipt: None,
        })
    }

    fn expect_step(
        &self,
        expected: Step,
    ) -> Result<(), WizardError> {
        if self.is_finished() {
            return Err(WizardError::Finished);
        }
        let actual = self.state.current_step;
        if actual != expected {
            return Err(WizardError::WrongStep { expected, actual });
        }
        Ok(())
    }

    fn move_to(
        &mut self,
        step: Step,
    ) {
        if step != self.state.current_step {
            debug!(from = self.state.current_step.number(), to = step.number(), "wizard step");
        }
        self.state.current_step = step;
    }
}
