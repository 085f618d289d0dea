use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::locations::DEFAULT_SECTOR_ORDER;
use crate::search::{ScoringWeights, DEFAULT_RENOVATION_KEYWORDS};

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
    pub search: SearchConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            search: SearchConfig::from_env()?,
        })
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Search policy dials: penalty weights, renovation phrases, and sector display order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub weights: ScoringWeights,
    pub renovation_keywords: Vec<String>,
    pub sector_order: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            renovation_keywords: DEFAULT_RENOVATION_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            sector_order: DEFAULT_SECTOR_ORDER
                .iter()
                .map(|sector| sector.to_string())
                .collect(),
        }
    }
}

impl SearchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let weights = ScoringWeights {
            surface_penalty: penalty_var("SEARCH_SURFACE_PENALTY", defaults.weights.surface_penalty)?,
            rooms_penalty: penalty_var("SEARCH_ROOMS_PENALTY", defaults.weights.rooms_penalty)?,
            feature_penalty: penalty_var("SEARCH_FEATURE_PENALTY", defaults.weights.feature_penalty)?,
        };

        let renovation_keywords = list_var("SEARCH_RENOVATION_KEYWORDS", ',')
            .unwrap_or(defaults.renovation_keywords);
        let sector_order = list_var("SEARCH_SECTOR_ORDER", ';').unwrap_or(defaults.sector_order);

        Ok(Self {
            weights,
            renovation_keywords,
            sector_order,
        })
    }
}

fn penalty_var(name: &'static str, default: u8) -> Result<u8, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|value| *value <= 100)
            .ok_or(ConfigError::InvalidPenalty { name }),
        Err(_) => Ok(default),
    }
}

fn list_var(name: &str, separator: char) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let values: Vec<String> = raw
        .split(separator)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPenalty { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPenalty { name } => {
                write!(f, "{name} must be a whole number between 0 and 100")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPenalty { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
