use crate::app_env;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::FromEnvError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, prelude::*, registry};

/// Constructs a filter which uses [app_env::LOG_LEVEL] to configure per-module logging. Filters
/// to the "info" level by default.
pub fn init_env_filter() -> Result<EnvFilter, FromEnvError> {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(app_env::LOG_LEVEL)
        .from_env()
}

/// Installs the global logging sink: JSON lines on stdout, filtered by `env_filter`. Though the
/// logger is set up with the "tracing" crate, it also picks up libraries still using "log".
/// Fails if a global subscriber was already installed.
pub fn setup_logging(env_filter: EnvFilter) -> Result<(), TryInitError> {
    registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_filter(env_filter),
        )
        .try_init()
}
