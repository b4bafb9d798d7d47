//! Single-choice steps: data type (step 1) and input method (step 2).
//!
//! Clicking an option only stages it. [`Selector::commit`] writes the staged
//! value into the wizard and advances in one controller call, so the wizard
//! never moves on without the value or records the value without moving on.

use std::fmt;

use super::{Step, WizardController, WizardError, WizardState};
use crate::models::{DataType, InputMethod};

/// An enumerated value offered by a selector step.
pub trait Choice: Copy + Eq + fmt::Debug + 'static {
    /// Step on which this choice is made.
    const STEP: Step;

    fn options() -> &'static [Self];

    fn title(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Value already committed to the wizard, if any.
    fn committed(state: &WizardState) -> Option<Self>;

    /// Commit into the wizard and advance.
    fn apply(
        self,
        wizard: &mut WizardController,
    ) -> Result<(), WizardError>;
}

impl Choice for DataType {
    const STEP: Step = Step::SelectDataType;

    fn options() -> &'static [Self] {
        DataType::all()
    }

    fn title(&self) -> &'static str {
        DataType::title(self)
    }

    fn description(&self) -> &'static str {
        DataType::description(self)
    }

    fn committed(state: &WizardState) -> Option<Self> {
        state.data_type()
    }

    fn apply(
        self,
        wizard: &mut WizardController,
    ) -> Result<(), WizardError> {
        wizard.select_data_type(self)
    }
}

impl Choice for InputMethod {
    const STEP: Step = Step::ChooseInputMethod;

    fn options() -> &'static [Self] {
        InputMethod::all()
    }

    fn title(&self) -> &'static str {
        InputMethod::title(self)
    }

    fn description(&self) -> &'static str {
        InputMethod::description(self)
    }

    fn committed(state: &WizardState) -> Option<Self> {
        state.input_method()
    }

    fn apply(
        self,
        wizard: &mut WizardController,
    ) -> Result<(), WizardError> {
        wizard.select_input_method(self)
    }
}

/// Locally staged selection for one selector step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector<T: Choice> {
    staged: Option<T>,
}

impl<T: Choice> Selector<T> {
    pub fn new(initial: Option<T>) -> Self {
        Self { staged: initial }
    }

    /// Selector seeded with whatever the wizard already holds, as when the
    /// user navigates back onto the step.
    pub fn for_state(state: &WizardState) -> Self {
        Self::new(T::committed(state))
    }

    pub fn options(&self) -> &'static [T] {
        T::options()
    }

    pub fn stage(
        &mut self,
        value: T,
    ) {
        self.staged = Some(value);
    }

    pub fn staged(&self) -> Option<T> {
        self.staged
    }

    pub fn is_staged(
        &self,
        value: T,
    ) -> bool {
        self.staged == Some(value)
    }

    /// Whether the continue affordance is enabled.
    pub fn can_commit(&self) -> bool {
        self.staged.is_some()
    }

    /// Commits the staged value and advances the wizard.
    pub fn commit(
        &self,
        wizard: &mut WizardController,
    ) -> Result<T, WizardError> {
        let value = self.staged.ok_or(WizardError::NothingStaged(T::STEP))?;
        value.apply(wizard)?;
        Ok(value)
    }
}

impl<T: Choice> Default for Selector<T> {
    fn default() -> Self {
        Self::new(None)
    }
}
