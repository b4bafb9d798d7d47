//! End-to-end walks through the onboarding wizard against repository doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tier_core::db::MemoryTierRepository;
use tier_core::wizard::{
    DataEntryForm, Lifecycle, Route, Selector, Step, WizardController, WizardError,
};
use tier_core::{
    Currency, DataType, InputMethod, OnboardingPayload, PricingTier, RepositoryError,
    SubmissionReceipt, TierData, TierField, TierRepository, UploadedFile,
};

/// Records every payload it receives and optionally fails the first N submits.
#[derive(Default)]
struct RecordingRepository {
    received: Mutex<Vec<OnboardingPayload>>,
    failures_left: Mutex<u32>,
}

impl RecordingRepository {
    fn failing(times: u32) -> Self {
        Self {
            failures_left: Mutex::new(times),
            ..Default::default()
        }
    }

    fn received(&self) -> Vec<OnboardingPayload> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl TierRepository for RecordingRepository {
    async fn submit(
        &self,
        payload: &OnboardingPayload,
    ) -> Result<SubmissionReceipt, RepositoryError> {
        {
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(RepositoryError::Connection("backend unavailable".to_string()));
            }
        }
        let mut received = self.received.lock().unwrap();
        received.push(payload.clone());
        Ok(SubmissionReceipt {
            id: received.len() as i64,
            submitted_at: chrono::Utc::now(),
        })
    }

    async fn get_tier(
        &self,
        _id: i64,
    ) -> Result<PricingTier, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    async fn list_tiers(&self) -> Result<Vec<PricingTier>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn delete_tier(
        &self,
        _id: i64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

fn basic_tier() -> TierData {
    TierData {
        tier_name: "Basic".to_string(),
        price: "29".to_string(),
        currency: Currency::Usd,
        features: "5 Projects\nEmail Support".to_string(),
        customer_count: "150".to_string(),
        churn_rate: "3.2".to_string(),
        conversion_rate: "12.5".to_string(),
        uploaded_file: None,
    }
}

/// Drives steps 1 to 3 through the step-local types, as a host would.
fn fill_manual(
    wizard: &mut WizardController,
    data_type: DataType,
    tier: &TierData,
) {
    let mut types = Selector::<DataType>::for_state(wizard.state());
    types.stage(data_type);
    types.commit(wizard).unwrap();

    let mut methods = Selector::<InputMethod>::for_state(wizard.state());
    methods.stage(InputMethod::Manual);
    methods.commit(wizard).unwrap();

    let mut form = DataEntryForm::for_state(wizard.state()).unwrap();
    for field in TierField::all() {
        form.set(*field, tier.field(*field));
    }
    form.set_currency(tier.currency);
    assert!(form.is_valid());
    form.submit(wizard).unwrap();
}

#[tokio::test]
async fn manual_pricing_flow_dispatches_exact_record_once() {
    let repo = RecordingRepository::default();
    let mut wizard = WizardController::new();

    fill_manual(&mut wizard, DataType::Pricing, &basic_tier());
    assert_eq!(wizard.current_step(), Step::ReviewConfirm);

    let exit = wizard.confirm(&repo).await.unwrap();

    assert_eq!(exit.route, Route::PricingTiers);
    assert_eq!(
        repo.received(),
        vec![OnboardingPayload {
            data_type: DataType::Pricing,
            input_method: InputMethod::Manual,
            tier_data: basic_tier(),
        }]
    );
    assert_eq!(wizard.lifecycle(), Lifecycle::Confirmed);
}

#[tokio::test]
async fn payload_serializes_to_camel_case_record() {
    let mut wizard = WizardController::new();
    fill_manual(&mut wizard, DataType::Pricing, &basic_tier());

    let json = serde_json::to_value(wizard.payload().unwrap()).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "dataType": "pricing",
            "inputMethod": "manual",
            "tierData": {
                "tierName": "Basic",
                "price": "29",
                "currency": "USD",
                "features": "5 Projects\nEmail Support",
                "customerCount": "150",
                "churnRate": "3.2",
                "conversionRate": "12.5"
            }
        })
    );
}

#[tokio::test]
async fn failed_submission_keeps_draft_for_retry() {
    let repo = RecordingRepository::failing(1);
    let mut wizard = WizardController::new();
    fill_manual(&mut wizard, DataType::Customer, &basic_tier());

    let err = wizard.confirm(&repo).await.unwrap_err();
    assert_eq!(
        err,
        WizardError::Submission(RepositoryError::Connection(
            "backend unavailable".to_string()
        ))
    );
    assert_eq!(wizard.current_step(), Step::ReviewConfirm);
    assert_eq!(wizard.lifecycle(), Lifecycle::Active);
    assert!(repo.received().is_empty());

    let exit = wizard.confirm(&repo).await.unwrap();
    assert_eq!(exit.receipt.map(|r| r.id), Some(1));
    assert_eq!(repo.received().len(), 1);
}

#[tokio::test]
async fn upload_flow_carries_file_reference() {
    let repo = MemoryTierRepository::new();
    let mut wizard = WizardController::new();
    wizard.select_data_type(DataType::Competitive).unwrap();
    wizard.select_input_method(InputMethod::Upload).unwrap();

    let mut form = DataEntryForm::for_state(wizard.state()).unwrap();
    assert!(!form.is_valid());
    form.attach(UploadedFile::new("/data/competitors.json").with_size(2048));
    form.submit(&mut wizard).unwrap();

    wizard.confirm(&repo).await.unwrap();

    let tiers = repo.list_tiers().await.unwrap();
    assert_eq!(tiers.len(), 1);
    assert_eq!(tiers[0].input_method, InputMethod::Upload);
    assert_eq!(tiers[0].uploaded_file_name.as_deref(), Some("competitors.json"));
}

#[test]
fn switching_from_upload_to_manual_drops_attachment() {
    let mut wizard = WizardController::new();
    wizard.select_data_type(DataType::Pricing).unwrap();
    wizard.select_input_method(InputMethod::Upload).unwrap();
    wizard
        .submit_draft(TierData {
            uploaded_file: Some(UploadedFile::new("old.csv")),
            ..Default::default()
        })
        .unwrap();

    wizard.edit_requested().unwrap();
    wizard.retreat();
    wizard.select_input_method(InputMethod::Manual).unwrap();

    let mut form = DataEntryForm::for_state(wizard.state()).unwrap();
    for field in TierField::REQUIRED {
        form.set(field, "1");
    }
    form.submit(&mut wizard).unwrap();

    assert_eq!(wizard.state().draft().uploaded_file, None);
}

#[test]
fn edit_jump_preserves_selections_regardless_of_history() {
    let mut wizard = WizardController::new();
    fill_manual(&mut wizard, DataType::Customer, &basic_tier());

    for _ in 0..3 {
        wizard.edit_requested().unwrap();
        assert_eq!(wizard.current_step(), Step::DataEntry);
        assert_eq!(wizard.state().data_type(), Some(DataType::Customer));
        assert_eq!(wizard.state().input_method(), Some(InputMethod::Manual));

        let form = DataEntryForm::for_state(wizard.state()).unwrap();
        assert_eq!(form.data(), &basic_tier());
        form.submit(&mut wizard).unwrap();
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Advance,
    Retreat,
    SelectType,
    SelectMethod,
    SubmitDraft,
    Edit,
}

const ACTIONS: [Action; 6] = [
    Action::Advance,
    Action::Retreat,
    Action::SelectType,
    Action::SelectMethod,
    Action::SubmitDraft,
    Action::Edit,
];

fn apply(
    wizard: &mut WizardController,
    action: Action,
) {
    let _ = match action {
        Action::Advance => {
            wizard.advance();
            Ok(())
        }
        Action::Retreat => {
            wizard.retreat();
            Ok(())
        }
        Action::SelectType => wizard.select_data_type(DataType::Pricing),
        Action::SelectMethod => wizard.select_input_method(InputMethod::Manual),
        Action::SubmitDraft => wizard.submit_draft(basic_tier()),
        Action::Edit => wizard.edit_requested(),
    };
}

/// Every action sequence of length 5 keeps the step in range, and a
/// committed selection is always accompanied by having left its step.
#[test]
fn step_stays_in_range_for_all_short_sequences() {
    let len = 5;
    let total = ACTIONS.len().pow(len);
    for mut code in 0..total {
        let mut wizard = WizardController::new();
        for _ in 0..len {
            let action = ACTIONS[code % ACTIONS.len()];
            code /= ACTIONS.len();

            let before = wizard.state().clone();
            apply(&mut wizard, action);
            let after = wizard.state();

            let n = after.current_step().number();
            assert!((1..=4).contains(&n), "step {n} out of range after {action:?}");

            if matches!(action, Action::SelectType) && before.current_step() == Step::SelectDataType {
                assert_eq!(after.data_type(), Some(DataType::Pricing));
                assert_eq!(after.current_step(), Step::ChooseInputMethod);
            }
            if before.current_step() != Step::SelectDataType {
                assert_eq!(after.data_type(), before.data_type());
            }
        }
    }
}
