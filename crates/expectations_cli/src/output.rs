use colored::*;
use expectations_core::{Aggregate, RecordStatus, RunResult, RunStatus};

pub fn print_banner(title: &str) {
    println!("\n{}", "═".repeat(60));
    println!("  {}", title.bold());
    println!("{}", "═".repeat(60));
}

pub fn print_run_summary(run: &RunResult) {
    let summary = &run.summary;
    println!(
        "\n  {} results: {} passed, {} failed, {} warned, {} errored",
        run.runner, summary.passed, summary.failed, summary.warned, summary.errored
    );

    for record in run.records() {
        let marker = match record.status {
            RecordStatus::Passed => "✓".green().bold(),
            RecordStatus::Failed => "✗".red().bold(),
            RecordStatus::Warned => "!".yellow().bold(),
            RecordStatus::Errored | RecordStatus::Skipped => "✗".red().bold(),
        };
        println!("    {} {} — {}", marker, record.name, record.observed);
    }
}

pub fn print_aggregate(aggregate: &Aggregate) {
    print_banner("Overall Results");

    match aggregate.status {
        RunStatus::Passed => println!(
            "\n{} {}",
            "✓".green().bold(),
            format!("Run {} PASSED", aggregate.run_id).green().bold()
        ),
        RunStatus::Failed => println!(
            "\n{} {}",
            "✗".red().bold(),
            format!("Run {} FAILED", aggregate.run_id).red().bold()
        ),
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total tests: {}", aggregate.total);
    println!("  Passed:      {}", aggregate.passed);
    println!("  Failed:      {}", aggregate.failed);

    if !aggregate.rollup.is_empty() {
        println!("\n{}", "By category:".bold());
        for (category, counts) in aggregate.rollup.iter() {
            println!(
                "  {:<24} {}/{} passed ({}%)",
                category,
                counts.passed,
                counts.total(),
                counts.pass_rate()
            );
        }
    }
    println!("{}", "═".repeat(60));
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
