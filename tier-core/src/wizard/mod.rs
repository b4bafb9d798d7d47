//! The four-step onboarding wizard.
//!
//! [`WizardController`] owns the accumulated [`WizardState`] and is its only
//! writer. Step-local state lives in the step types: [`Selector`] for the
//! two single-choice steps and [`DataEntryForm`] for data entry. They stage
//! input locally and call back into the controller to commit.
//! [`ReviewSummary`] is a read-only projection for the last step.

mod controller;
mod data_entry;
mod error;
mod review;
mod selector;
mod step;

pub use controller::{Lifecycle, Route, WizardController, WizardExit, WizardState};
pub use data_entry::{DataEntryForm, Requirement, unmet_requirements};
pub use error::WizardError;
pub use review::{MAX_REVIEW_FEATURES, ReviewSummary};
pub use selector::{Choice, Selector};
pub use step::{Step, StepStatus, step_indicator};
