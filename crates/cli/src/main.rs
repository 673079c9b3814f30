//! Admin API conformance runner.
//!
//! # Usage
//!
//! ```bash
//! # Run every check against the configured backend
//! conformance run
//!
//! # Run one check and emit JSON for a pipeline
//! conformance run --check tenant-scoped-customer-search --format json
//!
//! # Point at another deployment
//! conformance --base-url https://staging.example.com/api run
//!
//! # List known checks
//! conformance list
//!
//! # Verify credentials only
//! conformance login
//! ```
//!
//! # Exit codes
//!
//! - `0` - every selected check passed or was skipped
//! - `1` - at least one check failed
//! - `2` - the run could not start (configuration, client, or login error)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use admin_conformance_harness::{CheckKind, ConfigOverrides, ReportFormat};
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{CommandError, EXIT_FATAL};

#[derive(Parser)]
#[command(name = "conformance")]
#[command(author, version, about = "Conformance checks for the e-commerce admin API")]
struct Cli {
    /// API base URL, overrides `CONFORMANCE_BASE_URL`
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Admin email, overrides `CONFORMANCE_ADMIN_EMAIL`
    #[arg(long, global = true)]
    email: Option<String>,

    /// Per-request timeout in seconds, overrides `CONFORMANCE_TIMEOUT_SECS`
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run conformance checks (all of them unless --check is given)
    Run {
        /// Check to run; repeat to select several, order is kept
        #[arg(short, long = "check", value_name = "NAME")]
        checks: Vec<CheckKind>,

        /// Report format (`text`, `json`)
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },
    /// List the known checks
    List,
    /// Log in and report whether the credentials work
    Login,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            email: self.email.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|d| !d.is_empty())?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "admin_conformance_harness=info,conformance=info".into());

    let use_json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let json_layer = use_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!use_json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CommandError> {
    let overrides = cli.overrides();
    match cli.command {
        Commands::Run { checks, format } => commands::run::run(&overrides, checks, format).await,
        Commands::List => commands::list::list(),
        Commands::Login => commands::login::login(&overrides).await,
    }
}
