//! Report generation: self-contained HTML plus machine-readable JSON.
//!
//! The renderer only formats what the aggregate already carries; it never
//! re-derives counts from the records.

use anyhow::{Context, Result};
use expectations_core::{RunOutcome, SuiteStatus};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Where one invocation's report artifacts were written.
#[derive(Debug)]
pub struct ReportPaths {
    pub report: PathBuf,
    pub latest: PathBuf,
    pub results: PathBuf,
}

/// Writes the HTML report (timestamped plus a stable `latest` copy) and the
/// JSON results file for `outcome`.
pub fn write_reports(
    outcome: &RunOutcome,
    reports_dir: &Path,
    results_dir: &Path,
) -> Result<ReportPaths> {
    std::fs::create_dir_all(reports_dir)
        .with_context(|| format!("Failed to create reports directory: {}", reports_dir.display()))?;
    std::fs::create_dir_all(results_dir)
        .with_context(|| format!("Failed to create results directory: {}", results_dir.display()))?;

    let html = render_html(outcome);
    let report = reports_dir.join(format!("test_report_{}.html", outcome.run_id));
    let latest = reports_dir.join("test_report_latest.html");
    std::fs::write(&report, &html)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;
    std::fs::write(&latest, &html)
        .with_context(|| format!("Failed to write report: {}", latest.display()))?;

    let results = results_dir.join(format!("results_{}.json", outcome.run_id));
    let json = serde_json::to_string_pretty(outcome)?;
    std::fs::write(&results, json)
        .with_context(|| format!("Failed to write results: {}", results.display()))?;

    Ok(ReportPaths {
        report,
        latest,
        results,
    })
}

/// Renders the full HTML report for one run outcome.
pub fn render_html(outcome: &RunOutcome) -> String {
    let aggregate = &outcome.aggregate;
    let status_color = match aggregate.failed {
        0 => "#27ae60",
        _ => "#e74c3c",
    };
    let pass_rate = if aggregate.total == 0 {
        100.0
    } else {
        (aggregate.passed as f64 / aggregate.total as f64 * 1000.0).round() / 10.0
    };

    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Data Quality Report — {run_id}</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f7fa; color: #2d3748; line-height: 1.6; }}
  .container {{ max-width: 1200px; margin: 0 auto; padding: 20px; }}
  .header {{ background: linear-gradient(135deg, #1a365d, #2c5282); color: white; padding: 30px; border-radius: 12px; margin-bottom: 24px; }}
  .header h1 {{ font-size: 24px; margin-bottom: 8px; }}
  .header .timestamp {{ opacity: 0.6; font-size: 12px; margin-top: 8px; }}
  .summary-cards {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; margin-bottom: 24px; }}
  .card {{ background: white; border-radius: 10px; padding: 20px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); text-align: center; }}
  .card .number {{ font-size: 36px; font-weight: 700; }}
  .card .label {{ font-size: 13px; color: #718096; margin-top: 4px; }}
  .card.overall {{ border-top: 4px solid {status_color}; }}
  .card.passed {{ border-top: 4px solid #27ae60; }}
  .card.passed .number {{ color: #27ae60; }}
  .card.failed {{ border-top: 4px solid #e74c3c; }}
  .card.failed .number {{ color: #e74c3c; }}
  .card.total {{ border-top: 4px solid #3182ce; }}
  .card.total .number {{ color: #3182ce; }}
  .section {{ background: white; border-radius: 10px; padding: 24px; margin-bottom: 20px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }}
  .section h2 {{ font-size: 18px; margin-bottom: 16px; color: #1a365d; border-bottom: 2px solid #e2e8f0; padding-bottom: 8px; }}
  .section h3 {{ font-size: 15px; margin: 16px 0 10px 0; color: #2c5282; }}
  table {{ width: 100%; border-collapse: collapse; font-size: 13px; }}
  th {{ background: #edf2f7; color: #4a5568; padding: 10px 12px; text-align: left; font-weight: 600; }}
  td {{ padding: 8px 12px; border-bottom: 1px solid #e2e8f0; }}
  .badge {{ display: inline-block; padding: 2px 10px; border-radius: 12px; font-size: 11px; font-weight: 600; text-transform: uppercase; }}
  .badge.passed {{ background: #c6f6d5; color: #22543d; }}
  .badge.failed {{ background: #fed7d7; color: #822727; }}
  .badge.warned {{ background: #fefcbf; color: #744210; }}
  .badge.errored {{ background: #fed7d7; color: #822727; }}
  .badge.skipped {{ background: #e2e8f0; color: #4a5568; }}
  .category-badge {{ display: inline-block; padding: 2px 8px; border-radius: 4px; font-size: 11px; background: #ebf4ff; color: #2b6cb0; }}
  .progress-bar {{ height: 8px; background: #e2e8f0; border-radius: 4px; overflow: hidden; margin-top: 10px; }}
  .progress-fill {{ height: 100%; border-radius: 4px; background: #48bb78; }}
  .footer {{ text-align: center; padding: 20px; color: #a0aec0; font-size: 12px; }}
  .overall-badge {{ display: inline-block; padding: 6px 20px; border-radius: 6px; font-size: 16px; font-weight: 700; color: white; background: {status_color}; }}
</style>
</head>
<body>
<div class="container">
  <div class="header">
    <h1>Data Quality Report</h1>
    <div class="timestamp">Generated: {generated}</div>
  </div>

  <div class="summary-cards">
    <div class="card overall">
      <div class="overall-badge">{status}</div>
      <div class="label">Overall Result</div>
    </div>
    <div class="card total">
      <div class="number">{total}</div>
      <div class="label">Total Tests</div>
    </div>
    <div class="card passed">
      <div class="number">{passed}</div>
      <div class="label">Passed</div>
    </div>
    <div class="card failed">
      <div class="number">{failed}</div>
      <div class="label">Failed</div>
    </div>
  </div>

  <div class="section">
    <h2>Pass Rate</h2>
    <div style="display:flex; justify-content:space-between; font-size:13px; color:#718096;">
      <span>{passed} of {total} tests passed</span>
      <span>{pass_rate}%</span>
    </div>
    <div class="progress-bar">
      <div class="progress-fill" style="width:{pass_rate}%"></div>
    </div>
  </div>
"#,
        run_id = escape(outcome.run_id.as_str()),
        generated = outcome.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        status = aggregate.status,
        total = aggregate.total,
        passed = aggregate.passed,
        failed = aggregate.failed,
    );

    for run in &outcome.runs {
        let _ = write!(
            html,
            "\n  <div class=\"section\">\n    <h2>Runner: {}</h2>\n",
            escape(&run.runner)
        );

        if !run.tests.is_empty() {
            html.push_str(
                "    <table>\n      <thead><tr><th>Test Name</th><th>Category</th>\
                 <th>Status</th><th>Details</th><th>Time (s)</th></tr></thead>\n      <tbody>\n",
            );
            for record in &run.tests {
                let time = record
                    .execution_time
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                let _ = write!(
                    html,
                    "        <tr>\n          <td>{}</td>\n          \
                     <td><span class=\"category-badge\">{}</span></td>\n          \
                     <td><span class=\"badge {}\">{}</span></td>\n          \
                     <td>{}</td>\n          <td>{}</td>\n        </tr>\n",
                    escape(&record.name),
                    escape(&record.category.to_string()),
                    record.status,
                    record.status,
                    escape(truncate(&record.observed, 100)),
                    time,
                );
            }
            html.push_str("      </tbody></table>\n");
        }

        for suite in &run.suites {
            let icon = match suite.status {
                SuiteStatus::Passed => "✅",
                SuiteStatus::Failed => "❌",
            };
            let _ = write!(
                html,
                "    <h3>{icon} {} ({}/{} passed)</h3>\n",
                escape(&suite.name),
                suite.passed,
                suite.total,
            );
            html.push_str(
                "    <table>\n      <thead><tr><th>Expectation</th><th>Category</th>\
                 <th>Status</th><th>Observed</th></tr></thead>\n      <tbody>\n",
            );
            for record in &suite.records {
                let _ = write!(
                    html,
                    "        <tr>\n          <td>{}</td>\n          \
                     <td><span class=\"category-badge\">{}</span></td>\n          \
                     <td><span class=\"badge {}\">{}</span></td>\n          \
                     <td>{}</td>\n        </tr>\n",
                    escape(&record.name),
                    escape(&record.category.to_string()),
                    record.status,
                    record.status,
                    escape(truncate(&record.observed, 150)),
                );
            }
            html.push_str("      </tbody></table>\n");
        }

        if run.tests.is_empty() && run.suites.is_empty() {
            html.push_str("    <p>No results available.</p>\n");
        }
        html.push_str("  </div>\n");
    }

    html.push_str(
        "\n  <div class=\"section\">\n    <h2>Results by Category</h2>\n    <table>\n      \
         <thead><tr><th>Category</th><th>Passed</th><th>Failed</th><th>Total</th>\
         <th>Pass Rate</th></tr></thead>\n      <tbody>\n",
    );
    for (category, counts) in aggregate.rollup.iter() {
        let _ = write!(
            html,
            "        <tr>\n          <td><span class=\"category-badge\">{}</span></td>\n          \
             <td>{}</td>\n          <td>{}</td>\n          <td>{}</td>\n          \
             <td>{}%</td>\n        </tr>\n",
            escape(category),
            counts.passed,
            counts.failed,
            counts.total(),
            counts.pass_rate(),
        );
    }
    html.push_str("      </tbody></table>\n  </div>\n");

    let _ = write!(
        html,
        "\n  <div class=\"footer\">\n    Run {} &bull; generated {}\n  </div>\n</div>\n</body>\n</html>\n",
        escape(outcome.run_id.as_str()),
        outcome.generated_at.format("%Y-%m-%d %H:%M:%S"),
    );
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Loads a previously written results file.
pub fn load_results(path: &Path) -> Result<RunOutcome> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file: {}", path.display()))?;
    let outcome: RunOutcome = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse results file: {}", path.display()))?;
    Ok(outcome)
}
