//! Non-interactive runs: a key sequence in, a step-by-step report out

use serde::Serialize;
use tally::core::{CalcError, Evaluator, Event, Mode, Snapshot};
use tracing::{debug, info};

/// What happened to a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    /// The event was applied
    Accepted,
    /// The evaluator refused the event; state unchanged
    Rejected,
    /// The key is not part of the calculator
    Ignored,
}

impl StepOutcome {
    /// Short label for text output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "ok",
            Self::Rejected => "rejected",
            Self::Ignored => "ignored",
        }
    }
}

/// One key of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyStep {
    /// The key pressed
    pub key: char,
    /// How the calculator took it
    pub outcome: StepOutcome,
    /// Display text after the key
    pub display: String,
    /// Mode after the key
    pub mode: Mode,
    /// Rejection reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    cause: Option<CalcError>,
}

/// Full record of a key sequence run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeysReport {
    /// The sequence as given
    pub sequence: String,
    /// Per-key results, in order
    pub steps: Vec<KeyStep>,
    /// Final machine state
    pub result: Snapshot,
}

impl KeysReport {
    /// Presses every key of `sequence` on a fresh evaluator
    #[must_use]
    pub fn run(sequence: &str) -> Self {
        info!(keys = sequence.chars().count(), "running key sequence");
        let mut eval = Evaluator::new();
        let steps = sequence.chars().map(|key| press(&mut eval, key)).collect();
        Self {
            sequence: sequence.to_string(),
            steps,
            result: eval.snapshot(),
        }
    }

    /// Number of rejected keys
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.count(StepOutcome::Rejected)
    }

    /// Number of ignored keys
    #[must_use]
    pub fn ignored(&self) -> usize {
        self.count(StepOutcome::Ignored)
    }

    /// First key that was rejected or not recognized
    #[must_use]
    pub fn first_problem(&self) -> Option<CalcError> {
        self.steps.iter().find_map(|step| match step.outcome {
            StepOutcome::Accepted => None,
            StepOutcome::Rejected => step.cause.clone(),
            StepOutcome::Ignored => Some(CalcError::UnrecognizedKey(step.key)),
        })
    }

    fn count(&self, outcome: StepOutcome) -> usize {
        self.steps.iter().filter(|s| s.outcome == outcome).count()
    }
}

fn press(eval: &mut Evaluator, key: char) -> KeyStep {
    let (outcome, cause) = match Event::from_char(key) {
        Some(event) => match eval.handle(event).error {
            None => (StepOutcome::Accepted, None),
            Some(error) => (StepOutcome::Rejected, Some(error)),
        },
        None => {
            debug!(?key, "ignoring key");
            (StepOutcome::Ignored, None)
        }
    };
    KeyStep {
        key,
        outcome,
        display: eval.display().to_string(),
        mode: eval.mode(),
        error: cause.as_ref().map(ToString::to_string),
        cause,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tally::core::Number;

    #[test]
    fn test_run_simple_sequence() {
        let report = KeysReport::run("5+3=");
        assert_eq!(report.steps.len(), 4);
        assert_eq!(report.result.display, "8");
        assert_eq!(report.result.mode, Mode::Result);
        assert_eq!(report.result.accumulator, Some(Number::Integer(8)));
        assert_eq!(report.rejected(), 0);
        assert_eq!(report.first_problem(), None);
    }

    #[test]
    fn test_run_records_each_step() {
        let report = KeysReport::run("2+3*");
        let displays: Vec<&str> = report.steps.iter().map(|s| s.display.as_str()).collect();
        assert_eq!(displays, vec!["2", "2+", "2+3", "5*"]);
        assert_eq!(report.steps[3].mode, Mode::Multiply);
    }

    #[test]
    fn test_run_rejected_step() {
        let report = KeysReport::run("5/0=");
        let last = report.steps.last().unwrap();
        assert_eq!(last.outcome, StepOutcome::Rejected);
        assert_eq!(last.error.as_deref(), Some("Division by zero"));
        assert_eq!(report.rejected(), 1);
        assert_eq!(report.first_problem(), Some(CalcError::DivisionByZero));
        assert_eq!(report.result.display, "5/0");
    }

    #[test]
    fn test_run_ignored_step() {
        let report = KeysReport::run("1x2");
        assert_eq!(report.steps[1].outcome, StepOutcome::Ignored);
        assert_eq!(report.ignored(), 1);
        assert_eq!(report.result.display, "12");
        assert_eq!(report.first_problem(), Some(CalcError::UnrecognizedKey('x')));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(StepOutcome::Accepted.label(), "ok");
        assert_eq!(StepOutcome::Rejected.label(), "rejected");
        assert_eq!(StepOutcome::Ignored.label(), "ignored");
    }

    #[test]
    fn test_report_json_shape() {
        let report = KeysReport::run("7/2=");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sequence"], "7/2=");
        assert_eq!(json["result"]["display"], "3.5");
        assert_eq!(json["steps"][0]["outcome"], "accepted");
        assert_eq!(json["steps"][0]["key"], "7");
        assert!(json["steps"][0].get("error").is_none());
    }
}
