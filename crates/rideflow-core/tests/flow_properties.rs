use std::sync::Arc;

use chrono::Duration;
use rideflow_core::{field_values, AsyncActionError, AsyncActionResult, EngineSettings, FieldSpec, FlowController,
                    FlowDefinition, FlowPosition, ManualClock, ResolveOutcome, StepDefinition, StepOutcome,
                    SummaryProjector};
use serde_json::json;

fn change_phone() -> Arc<FlowDefinition> {
    Arc::new(FlowDefinition::builder("change-phone").step(StepDefinition::new("phone").field(FieldSpec::new("phone").required()
                                                                                                                      .exact_digits(11))
                                                                                      .requires_action("send-otp"))
                                                    .step(StepDefinition::new("code").field(FieldSpec::new("code").required()
                                                                                                                   .exact_digits(6))
                                                                                     .requires_action("verify-code")
                                                                                     .resends("send-otp"))
                                                    .project_with(SummaryProjector::new("Phone number updated").line("Phone", "phone"))
                                                    .build()
                                                    .expect("definition"))
}

fn three_plain_steps() -> Arc<FlowDefinition> {
    Arc::new(FlowDefinition::builder("schedule").step(StepDefinition::new("sender").field(FieldSpec::new("sender").required()))
                                                .step(StepDefinition::new("receiver").field(FieldSpec::new("receiver").required()))
                                                .step(StepDefinition::new("package").field(FieldSpec::new("description").required()))
                                                .project_with(SummaryProjector::new("Scheduled"))
                                                .build()
                                                .expect("definition"))
}

fn booking() -> Arc<FlowDefinition> {
    Arc::new(FlowDefinition::builder("booking").step(StepDefinition::new("details").field(FieldSpec::new("carType").required())
                                                                                   .field(FieldSpec::new("departureTime").required())
                                                                                   .field(FieldSpec::new("bookingType").required()
                                                                                                                       .one_of(["self",
                                                                                                                                "group",
                                                                                                                                "drop"]))
                                                                                   .field(FieldSpec::new("pickupLocation").required()
                                                                                                                          .when("bookingType",
                                                                                                                                "drop")))
                                               .project_with(SummaryProjector::new("Booked"))
                                               .build()
                                               .expect("definition"))
}

#[test]
fn all_valid_submit_advances_exactly_one_step() {
    let mut c = FlowController::new(three_plain_steps());
    let outcome = c.submit_step(&field_values! { "sender" => "Ada" });
    assert_eq!(outcome, StepOutcome::Advanced { from: 0,
                                                to: FlowPosition::AtStep(1) });
    assert_eq!(c.current_step().map(|s| s.key()), Some("receiver"));
}

#[test]
fn error_set_equals_violating_fields() {
    let mut c = FlowController::new(change_phone());
    let outcome = c.submit_step(&field_values! { "phone" => "0801" });
    let errors = outcome.errors().expect("invalid");
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["phone"]);
    assert_eq!(errors["phone"], "must be 11 digits");
    assert_eq!(c.position(), FlowPosition::AtStep(0));
}

#[test]
fn phone_and_password_example() {
    let definition = Arc::new(FlowDefinition::builder("login").step(StepDefinition::new("credentials").field(FieldSpec::new("phone").exact_digits(11))
                                                                                                          .field(FieldSpec::new("password").exact_digits(6)))
                                                              .project_with(SummaryProjector::new("Welcome"))
                                                              .build()
                                                              .expect("definition"));
    let mut c = FlowController::new(definition);
    let outcome = c.submit_step(&field_values! { "phone" => "123", "password" => "12345" });
    let errors = outcome.errors().expect("invalid");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors["phone"], "must be 11 digits");
    assert_eq!(errors["password"], "must be 6 digits");

    let outcome = c.submit_step(&field_values! { "phone" => "08012345678", "password" => "123456" });
    assert!(outcome.is_advanced());
    assert!(c.is_complete());
}

#[test]
fn drop_booking_requires_pickup_location() {
    let mut c = FlowController::new(booking());
    let mut values = field_values! { "carType" => "Sedan", "departureTime" => "08:00", "bookingType" => "drop" };
    let outcome = c.submit_step(&values);
    assert_eq!(outcome.errors().map(|e| e.keys().cloned().collect::<Vec<_>>()),
               Some(vec!["pickupLocation".to_string()]));

    values.insert("pickupLocation".into(), "Yaba".into());
    assert!(c.submit_step(&values).is_advanced());
}

#[test]
fn self_booking_ignores_pickup_location() {
    let mut c = FlowController::new(booking());
    let outcome = c.submit_step(&field_values! { "carType" => "Sedan", "departureTime" => "08:00", "bookingType" => "self" });
    assert!(outcome.is_advanced());
}

#[test]
fn repeated_submit_while_pending_is_idempotent() {
    let mut c = FlowController::new(change_phone());
    let values = field_values! { "phone" => "08012345678" };
    let first = c.submit_step(&values);
    let (action, ticket) = first.awaiting().expect("awaiting");
    assert_eq!(action, "send-otp");
    assert!(c.take_dispatch().is_some());

    let second = c.submit_step(&values);
    assert_eq!(second, first);
    assert!(c.take_dispatch().is_none());
    assert_eq!(c.invocation_count("send-otp"), 1);
    assert_eq!(c.pending_action().map(|p| p.ticket), Some(ticket));
}

#[test]
fn different_values_while_pending_are_rejected_and_not_merged() {
    let mut c = FlowController::new(change_phone());
    c.submit_step(&field_values! { "phone" => "08012345678" });
    let outcome = c.submit_step(&field_values! { "phone" => "08099999999" });
    assert_eq!(outcome,
               StepOutcome::ActionRejected(AsyncActionError::AlreadyPending { action: "send-otp".into() }));
    assert_eq!(c.field_values()["phone"], "08012345678");
}

#[test]
fn retreat_then_advance_restores_position_and_reruns_action() {
    let mut c = FlowController::new(change_phone());
    let values = field_values! { "phone" => "08012345678" };
    let (_, ticket) = c.submit_step(&values).awaiting().map(|(a, t)| (a.to_string(), t)).expect("awaiting");
    c.resolve_action(ticket, AsyncActionResult::Succeeded(json!({ "sent": true })));
    assert!(c.advance().is_advanced());
    assert_eq!(c.position(), FlowPosition::AtStep(1));

    assert_eq!(c.retreat(), 0);
    assert_eq!(c.field_values()["phone"], "08012345678");
    assert!(c.action_log().is_empty());

    // el código enviado quedó invalidado; re-enviar el mismo teléfono cae en cooldown
    match c.submit_step(&values) {
        StepOutcome::ActionRejected(AsyncActionError::Cooldown { action, .. }) => assert_eq!(action, "send-otp"),
        other => panic!("expected cooldown, got {other:?}"),
    }
}

#[test]
fn retreat_round_trip_without_actions() {
    let mut c = FlowController::new(three_plain_steps());
    c.submit_step(&field_values! { "sender" => "Ada" });
    c.submit_step(&field_values! { "receiver" => "Bola" });
    assert_eq!(c.position(), FlowPosition::AtStep(2));
    assert_eq!(c.retreat(), 1);
    assert_eq!(c.advance(), StepOutcome::Advanced { from: 1,
                                                    to: FlowPosition::AtStep(2) });
}

#[test]
fn cooldown_rejects_then_expires() {
    let clock = ManualClock::default();
    let settings = EngineSettings::default().with_clock(Arc::new(clock.clone()));
    let mut c = FlowController::with_settings(change_phone(), &settings);
    let (_, ticket) = c.submit_step(&field_values! { "phone" => "08012345678" })
                       .awaiting()
                       .map(|(a, t)| (a.to_string(), t))
                       .expect("awaiting");
    c.resolve_action(ticket, AsyncActionResult::Succeeded(json!({})));
    c.advance();

    clock.advance(Duration::seconds(30));
    match c.resend() {
        StepOutcome::ActionRejected(err) => {
            assert_eq!(err.reason(), "cooldown");
            assert_eq!(err, AsyncActionError::Cooldown { action: "send-otp".into(), remaining_secs: 30 });
        }
        other => panic!("expected cooldown, got {other:?}"),
    }

    clock.advance(Duration::seconds(30));
    assert!(c.resend().awaiting().is_some());
    assert_eq!(c.invocation_count("send-otp"), 2);
}

#[test]
fn configured_cooldown_is_honoured() {
    let clock = ManualClock::default();
    let settings = EngineSettings::default().with_resend_cooldown(Duration::seconds(5))
                                            .with_clock(Arc::new(clock.clone()));
    let mut c = FlowController::with_settings(change_phone(), &settings);
    let (_, ticket) = c.submit_step(&field_values! { "phone" => "08012345678" })
                       .awaiting()
                       .map(|(a, t)| (a.to_string(), t))
                       .expect("awaiting");
    c.resolve_action(ticket, AsyncActionResult::Succeeded(json!({})));
    assert!(c.cooldown_remaining("send-otp").is_some());
    clock.advance(Duration::seconds(5));
    assert!(c.cooldown_remaining("send-otp").is_none());
}

#[test]
fn gating_actions_without_resend_repeat_after_retreat() {
    let definition = Arc::new(FlowDefinition::builder("withdraw").step(StepDefinition::new("bank").field(FieldSpec::new("bank").required())
                                                                                                   .requires_action("resolve-account-name"))
                                                                 .step(StepDefinition::new("amount").field(FieldSpec::new("amount").required()))
                                                                 .project_with(SummaryProjector::new("Withdrawn"))
                                                                 .build()
                                                                 .expect("definition"));
    let mut c = FlowController::new(definition);
    let (_, ticket) = c.submit_step(&field_values! { "bank" => "GTBank" })
                       .awaiting()
                       .map(|(a, t)| (a.to_string(), t))
                       .expect("awaiting");
    c.resolve_action(ticket, AsyncActionResult::Succeeded(json!({})));
    assert!(c.advance().is_advanced());
    assert!(c.cooldown_remaining("resolve-account-name").is_none());

    c.retreat();
    let outcome = c.submit_step(&field_values! { "bank" => "Zenith Bank" });
    assert_eq!(outcome.awaiting().map(|(a, _)| a.to_string()), Some("resolve-account-name".to_string()));
}

#[test]
fn code_sent_before_entry_blocks_resend_until_cooldown_expires() {
    let clock = ManualClock::default();
    let settings = EngineSettings::default().with_clock(Arc::new(clock.clone()));
    let definition = Arc::new(FlowDefinition::builder("verify-otp").step(StepDefinition::new("code").field(FieldSpec::new("code").required()
                                                                                                                             .exact_digits(6))
                                                                                                       .requires_action("verify-code")
                                                                                                       .resends("send-otp")
                                                                                                       .cooldown_on_entry("send-otp"))
                                                                   .project_with(SummaryProjector::new("Verified"))
                                                                   .build()
                                                                   .expect("definition"));
    let mut c = FlowController::with_settings(definition, &settings);
    assert_eq!(c.resend(),
               StepOutcome::ActionRejected(AsyncActionError::Cooldown { action: "send-otp".into(),
                                                                        remaining_secs: 60 }));
    clock.advance(Duration::seconds(60));
    assert!(c.resend().awaiting().is_some());
    assert_eq!(c.invocation_count("send-otp"), 1);
}

#[test]
fn entering_a_later_step_seeds_its_cooldown() {
    let clock = ManualClock::default();
    let settings = EngineSettings::default().with_clock(Arc::new(clock.clone()));
    let definition = Arc::new(FlowDefinition::builder("reset-pin").step(StepDefinition::new("intro").field(FieldSpec::new("phone").required()))
                                                                  .step(StepDefinition::new("code").field(FieldSpec::new("code").required())
                                                                                                   .requires_action("verify-code")
                                                                                                   .resends("send-otp")
                                                                                                   .cooldown_on_entry("send-otp"))
                                                                  .project_with(SummaryProjector::new("Reset"))
                                                                  .build()
                                                                  .expect("definition"));
    let mut c = FlowController::with_settings(definition, &settings);
    clock.advance(Duration::seconds(45));
    assert!(c.submit_step(&field_values! { "phone" => "08012345678" }).is_advanced());
    assert_eq!(c.cooldown_remaining("send-otp"), Some(Duration::seconds(60)));
}

#[test]
fn resend_without_action_is_rejected() {
    let mut c = FlowController::new(three_plain_steps());
    assert_eq!(c.resend(), StepOutcome::ActionRejected(AsyncActionError::NothingToResend));
}

#[test]
fn cancel_mid_pending_discards_result() {
    let mut c = FlowController::new(change_phone());
    let (_, ticket) = c.submit_step(&field_values! { "phone" => "08012345678" })
                       .awaiting()
                       .map(|(a, t)| (a.to_string(), t))
                       .expect("awaiting");
    let cancelled = c.cancel();
    assert_eq!(cancelled.discarded, Some(ticket));
    assert_eq!(cancelled.position, FlowPosition::AtStep(0));
    let codes: Vec<_> = cancelled.events.iter().map(|e| e.kind.code()).collect();
    assert_eq!(codes, vec!["I", "S", "A", "D", "X"]);

    // una instancia nueva del mismo flujo nunca acepta el ticket viejo
    let mut fresh = FlowController::new(change_phone());
    assert_eq!(fresh.resolve_action(ticket, AsyncActionResult::Succeeded(json!({}))),
               ResolveOutcome::Discarded);
    assert_eq!(fresh.position(), FlowPosition::AtStep(0));
    assert!(fresh.action_log().is_empty());
    assert_eq!(fresh.event_variants(), vec!["I"]);
}

#[test]
fn late_result_after_retreat_is_discarded() {
    let mut c = FlowController::new(change_phone());
    let (_, ticket) = c.submit_step(&field_values! { "phone" => "08012345678" })
                       .awaiting()
                       .map(|(a, t)| (a.to_string(), t))
                       .expect("awaiting");
    c.resolve_action(ticket, AsyncActionResult::Succeeded(json!({})));
    c.advance();
    let (_, code_ticket) = c.submit_step(&field_values! { "code" => "123456" })
                            .awaiting()
                            .map(|(a, t)| (a.to_string(), t))
                            .expect("awaiting");
    c.retreat();
    assert_eq!(c.resolve_action(code_ticket, AsyncActionResult::Succeeded(json!({}))),
               ResolveOutcome::Discarded);
    assert_eq!(c.position(), FlowPosition::AtStep(0));
    assert!(c.pending_action().is_none());
}

#[test]
fn pending_result_keeps_action_outstanding() {
    let mut c = FlowController::new(change_phone());
    let (_, ticket) = c.submit_step(&field_values! { "phone" => "08012345678" })
                       .awaiting()
                       .map(|(a, t)| (a.to_string(), t))
                       .expect("awaiting");
    assert_eq!(c.resolve_action(ticket, AsyncActionResult::Pending), ResolveOutcome::StillPending);
    assert!(c.pending_action().is_some());
    assert!(c.advance().awaiting().is_some());
}

#[test]
fn completed_event_carries_values_fingerprint() {
    let mut a = FlowController::new(three_plain_steps());
    let mut b = FlowController::new(three_plain_steps());
    for c in [&mut a, &mut b] {
        c.submit_step(&field_values! { "sender" => "Ada" });
        c.submit_step(&field_values! { "receiver" => "Bola" });
        c.submit_step(&field_values! { "description" => "Books" });
    }
    let fingerprint = |c: &FlowController| {
        c.events()
         .into_iter()
         .find_map(|e| match e.kind {
             rideflow_core::FlowEventKind::FlowCompleted { values_fingerprint } => Some(values_fingerprint),
             _ => None,
         })
         .expect("completed")
    };
    assert_eq!(fingerprint(&a), fingerprint(&b));
}
