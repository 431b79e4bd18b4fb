use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::decisions::prequalify::PrequalConfig;

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
    pub policy: PolicyOverrides,
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

        let policy = PolicyOverrides {
            max_income_multiple: optional_ratio("APP_MAX_INCOME_MULTIPLE")?,
            max_loan_to_value: optional_ratio("APP_MAX_LTV")?,
            max_debt_to_income: optional_ratio("APP_MAX_DTI")?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            policy,
        })
    }
}

fn optional_ratio(key: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(key) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidRatio { key })?;
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRatio { key });
            }
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Environment-level overrides for the pre-qualification policy dials.
///
/// Absent variables fall back to the compiled defaults in [`PrequalConfig`],
/// matching the thresholds the upstream scoring backend enforces.
#[derive(Debug, Clone, Default)]
pub struct PolicyOverrides {
    pub max_income_multiple: Option<f64>,
    pub max_loan_to_value: Option<f64>,
    pub max_debt_to_income: Option<f64>,
}

impl PolicyOverrides {
    pub fn apply(&self, mut config: PrequalConfig) -> PrequalConfig {
        if let Some(multiple) = self.max_income_multiple {
            config.max_income_multiple = multiple;
        }
        if let Some(ltv) = self.max_loan_to_value {
            config.max_loan_to_value = ltv;
        }
        if let Some(dti) = self.max_debt_to_income {
            config.max_debt_to_income = dti;
        }
        config
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRatio { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRatio { key } => {
                write!(f, "{key} must be a positive finite number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidRatio { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
