//! Output formatting

use clap::ValueEnum;
use console::{style, Term};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;
use crate::keys::{KeyStep, KeysReport, StepOutcome};

/// Output format for key sequence runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes run results to stdout and notices to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Prints a report in the requested format
    pub fn report(&self, report: &KeysReport, format: OutputFormat, trace: bool) -> CliResult<()> {
        match format {
            OutputFormat::Json => self.out.write_line(&serde_json::to_string_pretty(report)?)?,
            OutputFormat::Text => {
                if trace {
                    for (index, step) in report.steps.iter().enumerate() {
                        self.out.write_line(&format_step(index + 1, step, self.use_color))?;
                    }
                }
                self.out.write_line(&report.result.display)?;
            }
        }
        Ok(())
    }

    /// Prints a one-line summary of rejected and ignored keys to stderr
    pub fn summary(&self, report: &KeysReport) -> CliResult<()> {
        if self.quiet {
            return Ok(());
        }
        if let Some(line) = summary_line(report) {
            let prefix = if self.use_color {
                style("!").yellow().bold().to_string()
            } else {
                "WARN".to_string()
            };
            self.err.write_line(&format!("{prefix} {line}"))?;
        }
        Ok(())
    }
}

/// Formats one trace line: index, key, outcome, display and any error
#[must_use]
pub fn format_step(index: usize, step: &KeyStep, use_color: bool) -> String {
    let label = format!("{:<8}", step.outcome.label());
    let label = if use_color {
        match step.outcome {
            StepOutcome::Accepted => style(label).green().to_string(),
            StepOutcome::Rejected => style(label).red().bold().to_string(),
            StepOutcome::Ignored => style(label).dim().to_string(),
        }
    } else {
        label
    };
    let mut line = format!("{index:>3}  {:<6} {label} {}", format!("{:?}", step.key), step.display);
    if let Some(error) = &step.error {
        line.push_str(&format!("  ({error})"));
    }
    line
}

/// Describes rejected and ignored keys, `None` for a clean run
#[must_use]
pub fn summary_line(report: &KeysReport) -> Option<String> {
    match (report.rejected(), report.ignored()) {
        (0, 0) => None,
        (rejected, ignored) => Some(format!("{rejected} key(s) rejected, {ignored} ignored")),
    }
}
