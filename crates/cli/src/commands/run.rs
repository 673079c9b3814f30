//! Run conformance checks and print the report.

use std::process::ExitCode;

use admin_conformance_harness::{
    CheckKind, CleanupHook, ConfigOverrides, FixtureRecord, HarnessConfig, ReportFormat,
    RunReport, Runner, Session, write_report,
};
use futures::future::BoxFuture;
use tracing::{info, warn};

use super::{CommandError, EXIT_CHECK_FAILED, EXIT_SUCCESS, connect};

/// Cleanup hook that only reports what was left behind.
///
/// The admin API offers no delete endpoints the harness relies on, so
/// fixtures stay in place and are listed for manual removal.
struct LogLeftovers;

impl CleanupHook for LogLeftovers {
    fn cleanup<'a>(
        &'a self,
        _session: &'a Session,
        fixtures: &'a [FixtureRecord],
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            warn!(count = fixtures.len(), "Fixtures left in place");
            for fixture in fixtures {
                info!(kind = %fixture.kind, id = %fixture.id, label = %fixture.label, "Leftover fixture");
            }
        })
    }
}

/// Run the selected checks, or all of them when none are selected.
///
/// # Errors
///
/// Returns an error if configuration is invalid, login fails, or the report
/// cannot be written. Check failures are not errors; they set exit code 1.
pub async fn run(
    overrides: &ConfigOverrides,
    checks: Vec<CheckKind>,
    format: ReportFormat,
) -> Result<ExitCode, CommandError> {
    let config = HarnessConfig::from_env(overrides)?;
    info!(base_url = %config.base_url, email = %config.credentials.email, "Starting conformance run");

    let session = connect(&config).await?;

    let checks = if checks.is_empty() {
        CheckKind::ALL.to_vec()
    } else {
        checks
    };

    let hook = LogLeftovers;
    let report = Runner::new(&session, checks).with_cleanup(&hook).run().await;

    write_report(&mut std::io::stdout().lock(), &report, format)?;

    Ok(ExitCode::from(exit_status(&report)))
}

/// Exit status for a completed run: 0 unless a check failed.
#[must_use]
pub fn exit_status(report: &RunReport) -> u8 {
    if report.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_CHECK_FAILED
    }
}

#[cfg(test)]
mod tests {
    use admin_conformance_core::{CheckResult, Outcome};

    use super::*;

    fn report(outcomes: &[Outcome]) -> RunReport {
        RunReport {
            results: outcomes
                .iter()
                .map(|o| CheckResult::new("check", *o, "message"))
                .collect(),
            fixtures: Vec::new(),
        }
    }

    #[test]
    fn test_pass_and_skip_exit_zero() {
        assert_eq!(exit_status(&report(&[])), 0);
        assert_eq!(exit_status(&report(&[Outcome::Pass, Outcome::Skip])), 0);
        assert_eq!(exit_status(&report(&[Outcome::Skip])), 0);
    }

    #[test]
    fn test_any_failure_exits_one() {
        assert_eq!(exit_status(&report(&[Outcome::Pass, Outcome::Fail])), 1);
        assert_eq!(exit_status(&report(&[Outcome::Fail, Outcome::Skip])), 1);
    }
}
