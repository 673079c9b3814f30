//! Check outcomes and run summaries.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Terminal classification of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every assertion held.
    Pass,
    /// An assertion failed or the check could not talk to the API.
    Fail,
    /// Prerequisite data was missing; not a failure.
    Skip,
}

impl Outcome {
    /// Upper-case label used in text reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Result of running one named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name, as listed in the registry.
    pub name: String,
    /// Pass, fail, or skip.
    pub outcome: Outcome,
    /// Diagnostic explaining the outcome.
    pub message: String,
    /// Informational observations that never affect the outcome.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl CheckResult {
    /// Build a result with no notes.
    #[must_use]
    pub fn new(name: impl Into<String>, outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    /// Attach informational notes.
    #[must_use]
    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// Aggregate outcome counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Checks that passed.
    pub passed: usize,
    /// Checks that failed.
    pub failed: usize,
    /// Checks that were skipped.
    pub skipped: usize,
}

impl Summary {
    /// Count outcomes across results.
    #[must_use]
    pub fn from_results(results: &[CheckResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r.outcome {
                Outcome::Pass => acc.passed += 1,
                Outcome::Fail => acc.failed += 1,
                Outcome::Skip => acc.skipped += 1,
            }
            acc
        })
    }

    /// Total number of checks.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// A run succeeds when nothing failed. Skips do not count against it.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checks: {} passed, {} failed, {} skipped",
            self.total(),
            self.passed,
            self.failed,
            self.skipped
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let results = vec![
            CheckResult::new("a", Outcome::Pass, "ok"),
            CheckResult::new("b", Outcome::Skip, "no orders found"),
            CheckResult::new("c", Outcome::Fail, "mismatch"),
            CheckResult::new("d", Outcome::Pass, "ok"),
        ];
        let summary = Summary::from_results(&results);
        assert_eq!(
            summary,
            Summary {
                passed: 2,
                failed: 1,
                skipped: 1
            }
        );
        assert!(!summary.is_success());
        assert_eq!(summary.to_string(), "4 checks: 2 passed, 1 failed, 1 skipped");
    }

    #[test]
    fn test_skips_do_not_fail_run() {
        let results = vec![CheckResult::new("a", Outcome::Skip, "no orders found")];
        assert!(Summary::from_results(&results).is_success());
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Outcome::Skip).unwrap(), "\"skip\"");
    }

    #[test]
    fn test_notes_omitted_when_empty() {
        let json = serde_json::to_value(CheckResult::new("a", Outcome::Pass, "ok")).unwrap();
        assert!(json.get("notes").is_none());
    }
}
