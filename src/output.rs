//! Rendering of run reports for the command line

use colored::Colorize;
use serde_json::{Value, json};

use crate::version::runner::RunReport;
use crate::version::strategy::OVERRIDE_STRATEGY_NAME;
use crate::version::types::{CheckResult, CheckStatus};

/// Presentation options, passed explicitly to the renderers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Include discovery metadata
    pub verbose: bool,
    /// Hide errors and skipped packages
    pub quiet: bool,
    pub json: bool,
    /// Only show packages with a newer upstream version
    pub newer_only: bool,
    /// Show fully-qualified package names
    pub full_name: bool,
}

/// Rendered human-readable output, split by destination stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

/// Renders `<name> : <current> ==> <latest>` lines
pub fn render_human(report: &RunReport, options: &OutputOptions) -> Rendered {
    let mut rendered = Rendered::default();

    for result in &report.results {
        let name = result.package.display_name(options.full_name);
        match result.status {
            CheckStatus::Error => {
                if !options.quiet {
                    rendered.stderr.push(format!(
                        "{} {}: {}",
                        "Error:".red(),
                        name.blue(),
                        result.messages.join(", ")
                    ));
                }
            }
            CheckStatus::Skipped => {
                if !options.quiet {
                    let reason = match result.messages.first() {
                        Some(message) => format!(" - {}", message),
                        None => String::new(),
                    };
                    rendered
                        .stdout
                        .push(format!("{} : skipped{}", name.red(), reason));
                }
            }
            _ => {
                if options.newer_only && !result.outdated() {
                    continue;
                }

                let mut label = name.blue().to_string();
                if options.verbose && is_guessed(result) {
                    label.push_str(" (guessed)");
                }
                let current = if result.newer_than_upstream() {
                    result.current.red().to_string()
                } else {
                    result.current.clone()
                };
                let latest = result.latest.clone().unwrap_or_default();
                let latest = if result.outdated() {
                    latest.green().to_string()
                } else {
                    latest
                };
                rendered
                    .stdout
                    .push(format!("{} : {} ==> {}", label, current, latest));
            }
        }
    }

    rendered
}

/// Renders the report as a JSON array
pub fn render_json(report: &RunReport, options: &OutputOptions) -> Value {
    let entries: Vec<Value> = report
        .results
        .iter()
        .filter(|result| match result.status {
            CheckStatus::Error | CheckStatus::Skipped => true,
            _ => !options.newer_only || result.outdated(),
        })
        .map(|result| json_entry(result, options))
        .collect();

    Value::Array(entries)
}

fn json_entry(result: &CheckResult, options: &OutputOptions) -> Value {
    let name = result.package.display_name(options.full_name);
    match result.status {
        CheckStatus::Error | CheckStatus::Skipped => {
            let mut entry = json!({
                "package": name,
                "status": result.status,
            });
            if !result.messages.is_empty() {
                entry["messages"] = json!(result.messages);
            }
            entry
        }
        _ => {
            let mut entry = json!({
                "package": name,
                "status": result.status,
                "version": {
                    "current": result.current,
                    "latest": result.latest,
                    "outdated": result.outdated(),
                    "newer_than_upstream": result.newer_than_upstream(),
                },
            });
            if options.verbose
                && let Some(meta) = &result.meta
            {
                entry["meta"] = json!(meta);
            }
            entry
        }
    }
}

/// A version is "guessed" when it came from a generic strategy rather than
/// a rule written for the package
fn is_guessed(result: &CheckResult) -> bool {
    result
        .meta
        .as_ref()
        .is_some_and(|meta| meta.strategy != OVERRIDE_STRATEGY_NAME)
}
