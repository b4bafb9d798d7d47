use std::fmt;

/// Position in the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    SelectDataType,
    ChooseInputMethod,
    DataEntry,
    ReviewConfirm,
}

impl Step {
    pub const FIRST: Step = Step::SelectDataType;
    pub const LAST: Step = Step::ReviewConfirm;

    pub fn all() -> &'static [Step] {
        &[
            Self::SelectDataType,
            Self::ChooseInputMethod,
            Self::DataEntry,
            Self::ReviewConfirm,
        ]
    }

    /// 1-based step number.
    pub fn number(&self) -> u8 {
        match self {
            Self::SelectDataType => 1,
            Self::ChooseInputMethod => 2,
            Self::DataEntry => 3,
            Self::ReviewConfirm => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.number() == n)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::SelectDataType => "Select Data Type",
            Self::ChooseInputMethod => "Choose Input Method",
            Self::DataEntry => "Data Entry / Upload",
            Self::ReviewConfirm => "Review & Confirm",
        }
    }

    /// Following step; the last step maps to itself.
    pub fn next(&self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    /// Preceding step; the first step maps to itself.
    pub fn previous(&self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(Self::FIRST)
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Progress of one step relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// Progress header entries for the steps that carry one (1 to 3).
///
/// Returns `None` on the review step, where the header is hidden.
pub fn step_indicator(current: Step) -> Option<Vec<(Step, StepStatus)>> {
    if current == Step::ReviewConfirm {
        return None;
    }
    let entries = Step::all()
        .iter()
        .copied()
        .filter(|s| *s != Step::ReviewConfirm)
        .map(|s| {
            let status = match s.cmp(&current) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Current,
                std::cmp::Ordering::Greater => StepStatus::Upcoming,
            };
            (s, status)
        })
        .collect();
    Some(entries)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn next_and_previous_are_clamped() {
        assert_eq!(Step::LAST.next(), Step::ReviewConfirm);
        assert_eq!(Step::FIRST.previous(), Step::SelectDataType);
        assert_eq!(Step::DataEntry.next(), Step::ReviewConfirm);
        assert_eq!(Step::DataEntry.previous(), Step::ChooseInputMethod);
    }

    #[test]
    fn from_number_rejects_out_of_range() {
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(5), None);
        assert_eq!(Step::from_number(3), Some(Step::DataEntry));
    }

    #[test]
    fn indicator_marks_progress() {
        assert_eq!(
            step_indicator(Step::ChooseInputMethod),
            Some(vec![
                (Step::SelectDataType, StepStatus::Completed),
                (Step::ChooseInputMethod, StepStatus::Current),
                (Step::DataEntry, StepStatus::Upcoming),
            ])
        );
    }

    #[test]
    fn indicator_hidden_on_review() {
        assert_eq!(step_indicator(Step::ReviewConfirm), None);
    }
}
