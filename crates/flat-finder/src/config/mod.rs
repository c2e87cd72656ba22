use crate::ballot::BallotView;
use crate::listing::TransitMode;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub datasets: DatasetConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let transit_mode = match env::var("APP_TRANSIT_MODE") {
            Ok(value) => TransitMode::from_str(&value)
                .ok_or(ConfigError::InvalidTransitMode { value })?,
            Err(_) => TransitMode::default(),
        };
        let ballot_view = match env::var("APP_BALLOT_VIEW") {
            Ok(value) => {
                BallotView::from_str(&value).ok_or(ConfigError::InvalidBallotView { value })?
            }
            Err(_) => BallotView::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            datasets: DatasetConfig {
                catalog_path: optional_path("APP_CATALOG_PATH"),
                demand_path: optional_path("APP_DEMAND_PATH"),
                transit_mode,
                ballot_view,
            },
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the unit catalog and demand statistics come from, and the default
/// pipeline toggles applied when a request does not override them.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub catalog_path: Option<PathBuf>,
    pub demand_path: Option<PathBuf>,
    pub transit_mode: TransitMode,
    pub ballot_view: BallotView,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTransitMode { value: String },
    InvalidBallotView { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTransitMode { value } => write!(
                f,
                "APP_TRANSIT_MODE must be 'rail' or 'light_rail', got '{}'",
                value
            ),
            ConfigError::InvalidBallotView { value } => write!(
                f,
                "APP_BALLOT_VIEW must be 'all' or 'first_timer_families', got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTransitMode { .. }
            | ConfigError::InvalidBallotView { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_CATALOG_PATH",
            "APP_DEMAND_PATH",
            "APP_TRANSIT_MODE",
            "APP_BALLOT_VIEW",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.datasets.catalog_path.is_none());
        assert_eq!(config.datasets.transit_mode, TransitMode::RailOnly);
        assert_eq!(config.datasets.ballot_view, BallotView::AllApplicants);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_pipeline_toggles() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_TRANSIT_MODE", "light_rail");
        env::set_var("APP_BALLOT_VIEW", "first_timer_families");
        env::set_var("APP_CATALOG_PATH", "data/units.json");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.datasets.transit_mode, TransitMode::WithLightRail);
        assert_eq!(config.datasets.ballot_view, BallotView::FirstTimerFamilies);
        assert_eq!(
            config.datasets.catalog_path,
            Some(PathBuf::from("data/units.json"))
        );
        reset_env();
    }

    #[test]
    fn rejects_unknown_transit_mode() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_TRANSIT_MODE", "ferry");
        let err = AppConfig::load().expect_err("invalid mode rejected");
        assert!(matches!(err, ConfigError::InvalidTransitMode { .. }));
        reset_env();
    }
}
