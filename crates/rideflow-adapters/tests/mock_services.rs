use std::sync::Arc;

use rideflow_adapters::{MockServiceConfig, MockServices};
use rideflow_core::{field_values, ActionService, AsyncActionError, FlowController, FlowPosition, FlowSession,
                    StepOutcome};
use rideflow_domain::{actions, FlowCatalog};

fn session(flow: &str) -> FlowSession {
    let catalog = FlowCatalog::standard().expect("catalog");
    let services: Arc<dyn ActionService> = Arc::new(MockServices::new(MockServiceConfig::instant()));
    FlowSession::new(FlowController::new(catalog.get(flow).expect("flow")), services)
}

#[tokio::test]
async fn withdraw_through_mock_bank() {
    let mut s = session("withdraw-to-bank");
    assert!(s.submit_and_wait(&field_values! { "accountNumber" => "0123456789" }).await.is_advanced());
    assert_eq!(s.controller().field_values()["availableBanks"], "Access Bank,GTBank,Zenith Bank");

    assert!(s.submit_and_wait(&field_values! { "bank" => "Access Bank" }).await.is_advanced());
    assert_eq!(s.controller().field_values()["accountName"], "Access Bank User");

    assert!(s.submit_and_wait(&field_values! { "amount" => "1500.50" }).await.is_advanced());
    let outcome = s.submit_and_wait(&field_values! { "pin" => "1234" }).await;
    assert_eq!(outcome, StepOutcome::Advanced { from: 3,
                                                to: FlowPosition::Complete });

    let receipt = s.controller().projection();
    assert_eq!(receipt.value_of("Amount"), Some("₦1,500.50"));
    assert_eq!(receipt.value_of("Bank"), Some("Access Bank"));
}

#[tokio::test]
async fn unknown_account_stops_on_first_step() {
    let mut s = session("withdraw-to-bank");
    let outcome = s.submit_and_wait(&field_values! { "accountNumber" => "0000000000" }).await;
    assert_eq!(outcome,
               StepOutcome::ActionRejected(AsyncActionError::Failed { action: actions::LOOKUP_BANKS.into(),
                                                                      reason: "No banks found for this account number."
                                                                              .into() }));
    assert_eq!(s.controller().position(), FlowPosition::AtStep(0));
}

#[tokio::test]
async fn change_pin_rejects_wrong_current_pin() {
    let mut s = session("change-pin");
    let outcome = s.submit_and_wait(&field_values! { "oldPin" => "9999" }).await;
    match outcome {
        StepOutcome::ActionRejected(AsyncActionError::Failed { reason, .. }) => {
            assert_eq!(reason, "Incorrect PIN. You have 2 attempt(s) left")
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(s.submit_and_wait(&field_values! { "oldPin" => "1234" }).await.is_advanced());
}

#[tokio::test]
async fn otp_resend_is_gated_by_cooldown() {
    let mut s = session("two-factor-setup");
    assert!(s.submit_and_wait(&field_values! { "phone" => "08012345678" }).await.is_advanced());
    match s.resend_and_wait().await {
        StepOutcome::ActionRejected(err) => assert_eq!(err.reason(), "cooldown"),
        other => panic!("expected cooldown, got {other:?}"),
    }
    let outcome = s.submit_and_wait(&field_values! { "code" => "123456" }).await;
    assert!(outcome.is_advanced());
    assert_eq!(s.controller().projection().title, "2FA enabled");
}

#[tokio::test]
async fn reset_payment_pin_needs_the_right_code() {
    let mut s = session("reset-payment-pin");
    let outcome = s.submit_and_wait(&field_values! { "code" => "654321" }).await;
    assert_eq!(outcome,
               StepOutcome::ActionRejected(AsyncActionError::Failed { action: actions::VERIFY_CODE.into(),
                                                                      reason: "Invalid OTP".into() }));
    assert_eq!(s.controller().position(), FlowPosition::AtStep(0));

    assert!(s.submit_and_wait(&field_values! { "code" => "123456" }).await.is_advanced());
    let outcome = s.submit_and_wait(&field_values! { "newPin" => "4321", "confirmPin" => "4321" }).await;
    assert_eq!(outcome, StepOutcome::Advanced { from: 1,
                                                to: FlowPosition::Complete });
}

#[tokio::test]
async fn unsupported_action_fails_cleanly() {
    let services = MockServices::new(MockServiceConfig::instant());
    let result = services.invoke("teleport", &field_values! {}).await;
    assert_eq!(result.failure_reason(), Some("unsupported action: teleport"));
}
