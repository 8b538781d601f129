use std::process::ExitCode;

use rideflow::script::{demo_script, parse_script, run_script, ScriptReport};
use rideflow::{AppConfig, AppError};
use rideflow_domain::FlowCatalog;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "rideflow list | describe <flow> | run <flow> <script.json> | demo";

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("RIDEFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Usage(msg)) => {
            eprintln!("[rideflow] {msg}\n{USAGE}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("[rideflow] {e}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: &[String]) -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let catalog = FlowCatalog::standard()?;
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list"] => {
            for name in catalog.names() {
                let definition = catalog.get(name)?;
                println!("{name:<22} {} step(s)", definition.len());
            }
            Ok(())
        }
        ["describe", flow] => {
            let definition = catalog.get(flow)?;
            println!("{} ({})", definition.name(), definition.definition_hash());
            for (i, step) in definition.steps().iter().enumerate() {
                let fields: Vec<&str> = step.field_names().collect();
                let action = step.action().map(|a| format!(" -> {a}")).unwrap_or_default();
                println!("  {i}. {} [{}]{action}", step.title(), fields.join(", "));
            }
            Ok(())
        }
        ["run", flow, path] => {
            let text = std::fs::read_to_string(path)?;
            let commands = parse_script(&text)?;
            let report = run_script(&catalog, flow, &commands, &config).await?;
            print_report(&report)
        }
        ["demo"] => {
            let report = run_script(&catalog, "withdraw-to-bank", &demo_script(), &config).await?;
            print_report(&report)
        }
        [] => Err(AppError::Usage("missing command".to_string())),
        other => Err(AppError::Usage(format!("unknown command: {}", other.join(" ")))),
    }
}

fn print_report(report: &ScriptReport) -> Result<(), AppError> {
    for entry in &report.entries {
        println!("[{}] {:<8} {}", entry.step.as_deref().unwrap_or("-"), entry.command, entry.outcome);
    }
    match &report.receipt {
        Some(receipt) => println!("{}", serde_json::to_string_pretty(receipt)?),
        None => println!("flow '{}' not completed", report.flow),
    }
    println!("events: {}", report.events.join(""));
    Ok(())
}
