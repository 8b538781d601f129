//! Ejecución de flujos guionados (JSON) contra los servicios simulados.
//!
//! ```json
//! [
//!   { "op": "submit", "values": { "accountNumber": "0123456789" } },
//!   { "op": "resend" },
//!   { "op": "retreat" }
//! ]
//! ```
use std::sync::Arc;

use log::info;
use rideflow_adapters::MockServices;
use rideflow_core::{ActionService, CoreEngineError, FieldValues, FlowController, FlowPosition, FlowSession,
                    ReceiptProjection, StepOutcome};
use rideflow_domain::FlowCatalog;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptCommand {
    Submit { values: FieldValues },
    Advance,
    Retreat,
    Resend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptEntry {
    pub command: String,
    pub step: Option<String>,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptReport {
    pub flow: String,
    pub entries: Vec<ScriptEntry>,
    pub completed: bool,
    pub receipt: Option<ReceiptProjection>,
    pub events: Vec<String>,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>, AppError> {
    Ok(serde_json::from_str(text)?)
}

/// Texto corto para mostrar un `StepOutcome`.
pub fn describe_outcome(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Invalid(errors) => {
            let fields: Vec<String> = errors.iter().map(|(k, v)| format!("{k} ({v})")).collect();
            format!("invalid: {}", fields.join(", "))
        }
        StepOutcome::Advanced { to: FlowPosition::Complete, .. } => "completed".to_string(),
        StepOutcome::Advanced { from, to: FlowPosition::AtStep(to) } => format!("advanced {from} -> {to}"),
        StepOutcome::AwaitingAsync { action, .. } => format!("awaiting {action}"),
        StepOutcome::ActionRejected(err) => format!("rejected ({}): {err}", err.reason()),
    }
}

/// Corre `commands` sobre una instancia nueva de `flow`.
pub async fn run_script(catalog: &FlowCatalog,
                        flow: &str,
                        commands: &[ScriptCommand],
                        config: &AppConfig)
                        -> Result<ScriptReport, AppError> {
    let definition = catalog.get(flow)?;
    let services: Arc<dyn ActionService> = Arc::new(MockServices::new(config.mock_services()));
    let controller = FlowController::with_settings(definition, &config.engine_settings());
    let mut session = FlowSession::new(controller, services);
    let mut entries = Vec::with_capacity(commands.len());

    for command in commands {
        let step = session.controller().current_step().map(|s| s.key().to_string());
        if step.is_none() {
            return Err(CoreEngineError::FlowCompleted.into());
        }
        let (name, outcome) = match command {
            ScriptCommand::Submit { values } => ("submit", describe_outcome(&session.submit_and_wait(values).await)),
            ScriptCommand::Advance => ("advance", describe_outcome(&session.advance())),
            ScriptCommand::Resend => ("resend", describe_outcome(&session.resend_and_wait().await)),
            ScriptCommand::Retreat => {
                let to = session.controller_mut().try_retreat()?;
                ("retreat", format!("retreated to {to}"))
            }
        };
        info!("script:{name} flow={flow} step={} -> {outcome}", step.as_deref().unwrap_or("-"));
        entries.push(ScriptEntry { command: name.to_string(),
                                   step,
                                   outcome });
    }

    let controller = session.controller();
    Ok(ScriptReport { flow: flow.to_string(),
                      entries,
                      completed: controller.is_complete(),
                      receipt: controller.try_projection().ok(),
                      events: controller.event_variants().into_iter().map(str::to_string).collect() })
}

/// Guion de demostración: retiro a banco completo.
pub fn demo_script() -> Vec<ScriptCommand> {
    fn submit(pairs: &[(&str, &str)]) -> ScriptCommand {
        ScriptCommand::Submit { values: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect() }
    }
    vec![submit(&[("accountNumber", "12345")]),
         submit(&[("accountNumber", "0123456789")]),
         submit(&[("bank", "GTBank")]),
         submit(&[("amount", "5000")]),
         submit(&[("pin", "1234")])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_commands() {
        let commands = parse_script(r#"[{"op":"submit","values":{"phone":"08012345678"}},{"op":"retreat"}]"#).expect("script");
        assert_eq!(commands.len(), 2);
        assert!(matches!(&commands[0], ScriptCommand::Submit { values } if values["phone"] == "08012345678"));
        assert_eq!(commands[1], ScriptCommand::Retreat);
    }

    #[test]
    fn rejects_unknown_ops() {
        assert!(matches!(parse_script(r#"[{"op":"teleport"}]"#), Err(AppError::Script(_))));
    }
}
