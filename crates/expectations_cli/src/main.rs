mod commands;
mod output;
mod report;
mod tool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dqr")]
#[command(version, about = "Data Quality Runner CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run dbt tests and expectation suites, then write unified reports
    Run {
        /// Directory of suite definition files (YAML or TOML)
        #[arg(long, default_value = "suites")]
        suites: String,

        /// Register a CSV file as a queryable table: NAME=PATH (repeatable)
        #[arg(long = "csv", value_name = "NAME=PATH")]
        csv: Vec<String>,

        /// Register a Parquet file as a queryable table: NAME=PATH (repeatable)
        #[arg(long = "parquet", value_name = "NAME=PATH")]
        parquet: Vec<String>,

        /// dbt project directory
        #[arg(long, default_value = ".")]
        project_dir: String,

        /// Run only the dbt phase
        #[arg(long, conflicts_with = "engine_only")]
        dbt_only: bool,

        /// Run only the expectation suites
        #[arg(long)]
        engine_only: bool,

        /// Directory for HTML reports
        #[arg(long, default_value = "reports")]
        reports_dir: String,

        /// Directory for JSON results
        #[arg(long, default_value = "results")]
        results_dir: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Regenerate the HTML report from a saved results file
    Report {
        /// Path to a results_<run_id>.json file (defaults to the newest)
        results: Option<String>,

        /// Directory searched for the newest results file
        #[arg(long, default_value = "results")]
        results_dir: String,

        /// Directory for HTML reports
        #[arg(long, default_value = "reports")]
        reports_dir: String,
    },
}

// The DataFusion source owns its own runtime, so main stays synchronous;
// entering a tokio runtime here would make its block_on calls panic.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Run {
            suites,
            csv,
            parquet,
            project_dir,
            dbt_only,
            engine_only,
            reports_dir,
            results_dir,
            format,
        } => commands::run::execute(&commands::run::RunArgs {
            suites,
            csv,
            parquet,
            project_dir,
            dbt_only,
            engine_only,
            reports_dir,
            results_dir,
            format,
        }),

        Commands::Report {
            results,
            results_dir,
            reports_dir,
        } => commands::report::execute(results.as_deref(), &results_dir, &reports_dir),
    }
}
