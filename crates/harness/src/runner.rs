//! Sequential check runner.

use admin_conformance_core::{CheckResult, Outcome, Summary};
use serde::Serialize;
use tracing::{Instrument, error, info, info_span, warn};

use crate::checks::CheckKind;
use crate::fixtures::{CleanupHook, FixtureBuilder, FixtureRecord};
use crate::session::Session;

/// Everything a run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// One result per check, in invocation order.
    pub results: Vec<CheckResult>,
    /// Fixtures created across all checks.
    pub fixtures: Vec<FixtureRecord>,
}

impl RunReport {
    /// Outcome counts.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results)
    }

    /// Whether no check failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.summary().is_success()
    }
}

/// Runs checks one after another against a single session.
///
/// A failing or erroring check never stops the remaining ones.
pub struct Runner<'a> {
    session: &'a Session,
    checks: Vec<CheckKind>,
    cleanup: Option<&'a dyn CleanupHook>,
}

impl<'a> Runner<'a> {
    /// Create a runner. Duplicate checks are dropped, first occurrence wins.
    #[must_use]
    pub fn new(session: &'a Session, checks: impl IntoIterator<Item = CheckKind>) -> Self {
        let mut ordered: Vec<CheckKind> = Vec::new();
        for check in checks {
            if !ordered.contains(&check) {
                ordered.push(check);
            }
        }
        Self {
            session,
            checks: ordered,
            cleanup: None,
        }
    }

    /// Install a hook that receives the fixture ledger after the run.
    #[must_use]
    pub fn with_cleanup(mut self, hook: &'a dyn CleanupHook) -> Self {
        self.cleanup = Some(hook);
        self
    }

    /// Checks this runner will execute, in order.
    #[must_use]
    pub fn checks(&self) -> &[CheckKind] {
        &self.checks
    }

    /// Run every check and collect the report.
    pub async fn run(self) -> RunReport {
        let mut report = RunReport::default();

        for check in &self.checks {
            let span = info_span!("check", name = check.name());
            let mut fixtures = FixtureBuilder::new(self.session);
            let result = run_one(*check, self.session, &mut fixtures)
                .instrument(span)
                .await;

            report.fixtures.extend(fixtures.into_records());
            report.results.push(result);
        }

        if let Some(hook) = self.cleanup
            && !report.fixtures.is_empty()
        {
            hook.cleanup(self.session, &report.fixtures).await;
        }

        let summary = report.summary();
        info!(
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            "Run complete"
        );
        report
    }
}

async fn run_one(
    check: CheckKind,
    session: &Session,
    fixtures: &mut FixtureBuilder<'_>,
) -> CheckResult {
    info!("Running check");
    let result = match check.run(session, fixtures).await {
        Ok(verdict) => verdict.into_result(check),
        Err(err) => CheckResult::new(check.name(), Outcome::Fail, err.to_string()),
    };

    match result.outcome {
        Outcome::Pass => info!(message = %result.message, "Check passed"),
        Outcome::Skip => warn!(message = %result.message, "Check skipped"),
        Outcome::Fail => error!(message = %result.message, "Check failed"),
    }
    result
}
