use thiserror::Error;

use super::{Requirement, Step};
use crate::db::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The action belongs to a step other than the current one.
    #[error("action belongs to step {expected}, but the wizard is on step {actual}")]
    WrongStep { expected: Step, actual: Step },

    /// A selector was asked to continue with nothing staged.
    #[error("no option staged on step {0}")]
    NothingStaged(Step),

    /// A choice made on an earlier step is missing.
    #[error("step {0} has not been completed")]
    MissingSelection(Step),

    #[error("draft is incomplete: missing {}", list_requirements(.0))]
    IncompleteDraft(Vec<Requirement>),

    /// The wizard was already confirmed or cancelled.
    #[error("onboarding has already finished")]
    Finished,

    #[error("submission failed: {0}")]
    Submission(#[from] RepositoryError),
}

fn list_requirements(missing: &[Requirement]) -> String {
    missing
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
