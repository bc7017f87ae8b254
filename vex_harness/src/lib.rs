pub mod cli;
pub mod participants;
pub mod scenarios;
pub mod settings;
pub mod telemetry;

use anyhow::{anyhow, Context};
use tracing::info;

use crate::{
    cli::{Cli, Command},
    participants::Participants,
    scenarios::{
        find_scenario, run_scenario, ScenarioContext, ScenarioReport, ScenarioStatus,
        StepOutcome, SCENARIOS,
    },
    settings::HarnessSettings,
};

/// Execute one CLI invocation. Errors are setup failures only: whatever happens
/// inside a scenario ends up in its report.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::List { name } = &cli.command {
        return list(name.as_deref());
    }

    let settings = HarnessSettings::from_options(&cli.global)?;

    let Some(scenario) = cli.command.scenario() else {
        println!("{}", serde_json::to_string_pretty(&settings.config)?);
        return Ok(());
    };

    let info = scenario.info();
    let participants = Participants::for_roles(&settings, info.roles)
        .with_context(|| format!("setting up participants for {}", info.name))?;
    info!(
        network = %settings.config.network_id,
        node = %settings.config.node_url,
        owner = %participants.owner.id,
        user = %participants.user_id,
        "participants ready"
    );

    let ctx = ScenarioContext::new(&settings.config, &participants);
    let report = run_scenario(&scenario, &ctx).await;

    if cli.global.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn list(name: Option<&str>) -> anyhow::Result<()> {
    let Some(name) = name else {
        for info in SCENARIOS {
            println!("{:<16} {}", info.name, info.description);
        }
        return Ok(());
    };

    let info = find_scenario(name).ok_or_else(|| anyhow!("unknown scenario '{name}'"))?;
    let roles: Vec<String> = info.roles.iter().map(ToString::to_string).collect();
    println!("{}: {}", info.name, info.description);
    println!("signers: {}", roles.join(", "));
    Ok(())
}

fn print_report(report: &ScenarioReport) {
    for step in &report.steps {
        match &step.outcome {
            StepOutcome::Ok { response } => println!("  ok      {}: {response}", step.operation),
            StepOutcome::Failed { error } => println!("  failed  {}: {error}", step.operation),
        }
    }
    match &report.status {
        ScenarioStatus::Completed => println!("{}: completed", report.scenario),
        ScenarioStatus::Aborted { operation, .. } => {
            println!("{}: aborted at '{operation}'", report.scenario)
        }
    }
}
