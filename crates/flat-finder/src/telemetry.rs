use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Where formatted log lines go. One-shot reports keep stdout for their JSON payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    Stderr,
}

impl LogSink {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

#[derive(Debug)]
pub enum TelemetryError {
    /// `APP_LOG_LEVEL` (or `--log-level`) is not a valid tracing directive.
    EnvFilter { value: String, source: ParseError },
    /// A global subscriber was already installed, or the sink could not be set up.
    Subscriber {
        sink: LogSink,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => write!(
                f,
                "log level '{}' is not a valid tracing filter (set APP_LOG_LEVEL or RUST_LOG)",
                value
            ),
            TelemetryError::Subscriber { sink, source } => write!(
                f,
                "could not install the {} log subscriber: {}",
                sink.label(),
                source
            ),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber { source, .. } => Some(&**source),
        }
    }
}

pub fn init(config: &TelemetryConfig, sink: LogSink) -> Result<(), TelemetryError> {
    let env_filter = build_filter(&config.log_level)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false);

    match sink {
        LogSink::Stdout => builder.try_init(),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
    }
    .map_err(|source| TelemetryError::Subscriber { sink, source })
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
            value: log_level.to_string(),
            source,
        }),
    }
}
