use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use expectations_core::{RunId, RunOutcome, RunStatus, Suite};
use expectations_datafusion::{DataFusionSource, SourceConfig};
use expectations_engine::{aggregate_runs, run_suites, suite_from_spec, ENGINE_RUNNER};
use std::path::Path;
use tracing::info;

use crate::{output, report, tool};

pub struct RunArgs {
    pub suites: String,
    pub csv: Vec<String>,
    pub parquet: Vec<String>,
    pub project_dir: String,
    pub dbt_only: bool,
    pub engine_only: bool,
    pub reports_dir: String,
    pub results_dir: String,
    pub format: String,
}

/// Runs the requested phases, aggregates their results, and writes reports.
///
/// Exits with status 1 when the aggregate fails; a failing data quality run
/// must fail the invoking pipeline.
pub fn execute(args: &RunArgs) -> Result<()> {
    let generated_at = Utc::now();
    let run_id = RunId::from_datetime(&generated_at);
    let text = args.format != "json";
    info!("Starting run {}", run_id);

    let mut runs = Vec::new();

    if !args.engine_only {
        if text {
            output::print_banner("Phase 1: dbt Tests");
        }
        let run = tool::run_dbt_tests(Path::new(&args.project_dir), generated_at);
        if text {
            output::print_run_summary(&run);
        }
        runs.push(run);
    }

    if !args.dbt_only {
        if text {
            output::print_banner("Phase 2: Expectation Suites");
        }
        let suites = load_suites(&args.suites)?;
        let source = connect_source(&args.csv, &args.parquet)?;
        let run = run_suites(ENGINE_RUNNER, generated_at, &suites, &source);
        if text {
            output::print_run_summary(&run);
        }
        runs.push(run);
    }

    let aggregate = aggregate_runs(&runs, run_id.clone());
    let outcome = RunOutcome {
        run_id,
        generated_at,
        runs,
        aggregate,
    };
    let paths = report::write_reports(
        &outcome,
        Path::new(&args.reports_dir),
        Path::new(&args.results_dir),
    )?;

    if text {
        output::print_aggregate(&outcome.aggregate);
        output::print_success(&format!("HTML report: {}", paths.report.display()));
        output::print_info(&format!("Latest link: {}", paths.latest.display()));
        output::print_info(&format!("JSON results: {}", paths.results.display()));
    } else {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    if outcome.aggregate.status == RunStatus::Failed {
        std::process::exit(1);
    }
    Ok(())
}

fn load_suites(dir: &str) -> Result<Vec<Suite>> {
    let specs = expectations_parser::load_dir(Path::new(dir))
        .with_context(|| format!("Failed to load suite definitions from: {dir}"))?;
    info!("Loaded {} suite definition(s)", specs.len());
    Ok(specs.iter().map(suite_from_spec).collect())
}

fn connect_source(csv: &[String], parquet: &[String]) -> Result<DataFusionSource> {
    let mut config = SourceConfig::new();
    for registration in csv {
        let (name, path) = split_registration(registration)?;
        config = config.with_csv(name, path);
    }
    for registration in parquet {
        let (name, path) = split_registration(registration)?;
        config = config.with_parquet(name, path);
    }
    DataFusionSource::connect(&config).map_err(|e| anyhow!("Failed to open data source: {e}"))
}

fn split_registration(arg: &str) -> Result<(&str, &str)> {
    arg.split_once('=')
        .ok_or_else(|| anyhow!("Invalid table registration (expected NAME=PATH): {arg}"))
}
