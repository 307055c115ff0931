use std::time::Duration;

use anyhow::bail;
use colored::Colorize;
use tracing::{error, info};
use uiv_fixture::{FlowOptions, LaunchOptions, Report, Scenario, Session, scenarios};

use crate::cli::Cli;

/// Run the selected scenarios sequentially, each in a fresh browser so
/// storage state from one seed cannot bleed into the next. The exit is
/// non-zero when any scenario errors or reports a failed check.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let launch = LaunchOptions {
        headful: cli.headful,
    };
    let options = FlowOptions {
        base_url: cli.base_url.clone(),
        shots_dir: cli.shots_dir.clone(),
        timeout: Duration::from_millis(cli.timeout_ms),
    };

    let mut reports: Vec<Report> = Vec::new();
    let mut errored = 0usize;

    for scenario in cli.command.scenarios() {
        info!(target = "uiv", scenario = scenario.name(), "starting scenario");
        let (report, outcome) = run_one(scenario, &launch, options.clone()).await?;
        if let Err(err) = outcome {
            error!(target = "uiv", scenario = scenario.name(), error = %err, "scenario failed");
            errored += 1;
        }
        reports.push(report);
    }

    println!();
    let mut failed_checks = 0usize;
    for report in &reports {
        let line = report.summary();
        if report.is_success() {
            println!("{} {line}", "OK".green().bold());
        } else {
            println!("{} {line}", "NOT OK".red().bold());
        }
        failed_checks += report.failures();
    }

    if errored > 0 || failed_checks > 0 {
        bail!("{errored} scenario(s) errored, {failed_checks} check(s) failed");
    }
    Ok(())
}

/// One scenario in one browser. The session is closed on every exit
/// path; launch errors are the only thing that can skip the scenario.
async fn run_one(
    scenario: Scenario,
    launch: &LaunchOptions,
    options: FlowOptions,
) -> anyhow::Result<(Report, uiv_fixture::Result<()>)> {
    let session = Session::launch(launch).await?;
    let (report, outcome) = scenarios::run(scenario, &session, options).await;
    session.close().await?;
    Ok((report, outcome))
}
