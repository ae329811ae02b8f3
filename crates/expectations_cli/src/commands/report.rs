use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{output, report};

/// Regenerates the HTML report from a saved results file.
///
/// When no file is given, the lexicographically newest `results_*.json` in
/// `results_dir` is used; run ids sort chronologically.
pub fn execute(results_path: Option<&str>, results_dir: &str, reports_dir: &str) -> Result<()> {
    let path = match results_path {
        Some(path) => PathBuf::from(path),
        None => newest_results_file(Path::new(results_dir))?,
    };
    info!("Regenerating report from: {}", path.display());

    let outcome = report::load_results(&path)?;
    let reports_dir = Path::new(reports_dir);
    std::fs::create_dir_all(reports_dir)
        .with_context(|| format!("Failed to create reports directory: {}", reports_dir.display()))?;

    let html = report::render_html(&outcome);
    let report_path = reports_dir.join(format!("test_report_{}.html", outcome.run_id));
    let latest_path = reports_dir.join("test_report_latest.html");
    std::fs::write(&report_path, &html)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    std::fs::write(&latest_path, &html)
        .with_context(|| format!("Failed to write report: {}", latest_path.display()))?;

    output::print_aggregate(&outcome.aggregate);
    output::print_success(&format!("HTML report: {}", report_path.display()));
    output::print_info(&format!("Latest link: {}", latest_path.display()));

    Ok(())
}

fn newest_results_file(results_dir: &Path) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(results_dir)
        .with_context(|| format!("Failed to read results directory: {}", results_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("results_") && n.ends_with(".json"))
        })
        .collect();
    candidates.sort();
    candidates
        .pop()
        .ok_or_else(|| anyhow!("No results_*.json found in: {}", results_dir.display()))
}
