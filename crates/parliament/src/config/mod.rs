use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::registry::locale::Language;

/// Distinguishes runtime behavior for different stages of the deployment.
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
    pub registry: RegistryConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let raw_language = env::var("APP_LANGUAGE").unwrap_or_else(|_| "ka".to_string());
        let language = Language::from_code(&raw_language)
            .ok_or(ConfigError::InvalidLanguage { value: raw_language })?;

        let roster_path = env::var("APP_ROSTER_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let parliament_unit =
            env::var("APP_PARLIAMENT_UNIT").unwrap_or_else(|_| "parliament".to_string());

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            registry: RegistryConfig {
                roster_path,
                language,
                parliament_unit,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the roster comes from and how it is presented.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub roster_path: Option<PathBuf>,
    /// Display language used to pick the localized name field.
    pub language: Language,
    /// Short name of the unit treated as the national parliament.
    pub parliament_unit: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLanguage { value: String },
    MissingRoster,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLanguage { value } => {
                write!(f, "APP_LANGUAGE '{value}' is not a supported language (ka, en)")
            }
            ConfigError::MissingRoster => {
                write!(f, "no roster given: pass --roster or set APP_ROSTER_PATH")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
