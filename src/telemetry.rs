//! Global tracing/logging setup.

use std::any::type_name_of_val;
use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, fmt, layer::Layer, layer::SubscriberExt};

use crate::config::EnvSnapshot;

/// Log level and output format, read from `LOG_LEVEL` and `LOG_FORMAT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl LogSettings {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        let defaults = Self::default();
        Self {
            level: env
                .get("LOG_LEVEL")
                .map(str::to_string)
                .unwrap_or(defaults.level),
            format: env
                .get("LOG_FORMAT")
                .map(str::to_string)
                .unwrap_or(defaults.format),
        }
    }
}

/// Errors that can occur while initializing global telemetry.
#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("failed to install log tracer bridge: {0}")]
    LogTracer(#[from] log::SetLoggerError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

static TELEMETRY_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber once, bridging `log::` records into tracing.
///
/// Output goes to stderr so command output on stdout stays machine readable.
/// `RUST_LOG` takes precedence over the configured level. Calls after a
/// successful install are no-ops; a failed install can be retried.
pub fn init_tracing(settings: &LogSettings) -> Result<(), TelemetryInitError> {
    if TELEMETRY_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(());
    }

    let installed = install_log_bridge().and_then(|()| install_subscriber(settings));
    if installed.is_err() {
        TELEMETRY_INITIALIZED.store(false, Ordering::SeqCst);
    }
    installed
}

fn install_log_bridge() -> Result<(), TelemetryInitError> {
    match LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init()
    {
        Ok(()) => Ok(()),
        // A bridge registered by an earlier attempt is already what we want.
        Err(_) if type_name_of_val(log::logger()).contains("LogTracer") => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn install_subscriber(settings: &LogSettings) -> Result<(), TelemetryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let fmt_layer = match settings.format.as_str() {
        "pretty" => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        _ => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    // Not `try_init`: that would register a second `LogTracer` and fail.
    let subscriber = tracing_subscriber::registry().with(env_filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
