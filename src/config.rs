//! Environment-based configuration module
//!
//! Configuration can be set via:
//! 1. Environment variables (highest priority)
//! 2. .env file
//! 3. Default values (lowest priority)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use std::{env, fs};

/// Application environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    fn parse(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub app_name: String,
    pub version: String,
    pub catalog: CatalogConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

/// Catalog and Caja behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Stock at or below this value is flagged as low in Caja
    pub low_stock_threshold: i64,

    /// Maximum entries kept in each in-memory activity log
    pub activity_log_capacity: usize,
}

/// Local login simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Credentials that log in with the admin role
    pub admin_email: String,
    pub admin_password: String,

    /// Session timeout in minutes
    pub session_timeout_mins: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    pub log_to_file: bool,
    pub log_to_stdout: bool,
    /// Use JSON format (true for production)
    pub json_format: bool,
    pub max_file_size_mb: u64,
    pub max_log_files: u32,
}

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@test.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";
/// 30 days.
pub const MAX_SESSION_TIMEOUT_MINS: i64 = 30 * 24 * 60;

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

impl AppConfig {
    /// Builds the configuration from any key source; unset or unparsable
    /// keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| {
            lookup(key).map(|s| s == "true").unwrap_or(default)
        };

        let environment = Environment::parse(lookup("APP_ENV"));

        Self {
            environment,
            app_name: lookup("APP_NAME").unwrap_or_else(|| "Caja - TIC Americas".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),

            catalog: CatalogConfig {
                low_stock_threshold: parsed(&lookup, "LOW_STOCK_THRESHOLD").unwrap_or(5),
                activity_log_capacity: parsed(&lookup, "ACTIVITY_LOG_CAPACITY").unwrap_or(500),
            },

            security: SecurityConfig {
                admin_email: lookup("ADMIN_EMAIL")
                    .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
                admin_password: lookup("ADMIN_PASSWORD")
                    .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
                session_timeout_mins: parsed(&lookup, "SESSION_TIMEOUT_MINS").unwrap_or(480), // 8 hours
            },

            logging: LoggingConfig {
                level: lookup("RUST_LOG").unwrap_or_else(|| {
                    if environment.is_production() {
                        "warn".to_string()
                    } else {
                        "debug".to_string()
                    }
                }),
                log_to_file: flag("LOG_TO_FILE", false),
                log_to_stdout: flag("LOG_TO_STDOUT", true),
                json_format: environment.is_production(),
                max_file_size_mb: 10,
                max_log_files: 5,
            },
        }
    }

    /// Load configuration from environment and defaults
    pub fn load() -> Self {
        Self::default()
    }

    /// Load configuration from a .env file (if exists). Variables already set
    /// in the environment win over the file.
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let file_vars = parse_dotenv(&content);
        Some(Self::from_lookup(|key| {
            env::var(key).ok().or_else(|| file_vars.get(key).cloned())
        }))
    }

    pub fn get_log_dir(&self, app_data_dir: &Path) -> PathBuf {
        app_data_dir.join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Validate configuration for production
    pub fn validate(&self) -> Result<(), String> {
        if self.catalog.low_stock_threshold < 0 {
            return Err("LOW_STOCK_THRESHOLD must not be negative".to_string());
        }
        if self.catalog.activity_log_capacity == 0 {
            return Err("ACTIVITY_LOG_CAPACITY must be at least 1".to_string());
        }
        if !(1..=MAX_SESSION_TIMEOUT_MINS).contains(&self.security.session_timeout_mins) {
            return Err(format!(
                "SESSION_TIMEOUT_MINS must be between 1 and {}",
                MAX_SESSION_TIMEOUT_MINS
            ));
        }
        if self.is_production() && self.security.admin_password == DEFAULT_ADMIN_PASSWORD {
            return Err(
                "ADMIN_PASSWORD must be changed in production. \
                 Set it via environment variable."
                    .to_string(),
            );
        }
        Ok(())
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

/// Simple .env parser (key=value format)
fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Global configuration instance
static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration from `.env` in the working
/// directory when present, otherwise from the environment alone.
pub fn init_config() -> &'static AppConfig {
    GLOBAL_CONFIG.get_or_init(|| {
        AppConfig::load_from_file(Path::new(".env")).unwrap_or_else(AppConfig::load)
    })
}

/// Get the global configuration; `None` until `init_config()` has run.
pub fn get_config() -> Option<&'static AppConfig> {
    GLOBAL_CONFIG.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.catalog.low_stock_threshold, 5);
        assert_eq!(config.catalog.activity_log_capacity, 500);
        assert_eq!(config.security.admin_email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(config.security.session_timeout_mins, 480);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let pairs = [
            ("APP_ENV", "production"),
            ("LOW_STOCK_THRESHOLD", "2"),
            ("ADMIN_PASSWORD", "s3cret"),
            ("SESSION_TIMEOUT_MINS", "not-a-number"),
        ];
        let config = AppConfig::from_lookup(lookup_from(&pairs));
        assert!(config.is_production());
        assert_eq!(config.catalog.low_stock_threshold, 2);
        assert_eq!(config.security.session_timeout_mins, 480);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_admin_password() {
        let pairs = [("APP_ENV", "production")];
        let config = AppConfig::from_lookup(lookup_from(&pairs));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_dotenv() {
        let vars = parse_dotenv(
            "# comentario\n\nAPP_NAME=\"Caja Norte\"\nLOW_STOCK_THRESHOLD = 3\nbroken line\n",
        );
        assert_eq!(vars.get("APP_NAME").map(String::as_str), Some("Caja Norte"));
        assert_eq!(vars.get("LOW_STOCK_THRESHOLD").map(String::as_str), Some("3"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join(format!("caja-{}.env", uuid::Uuid::new_v4()));
        fs::write(&path, "CAJA_TEST_ONLY=1\nACTIVITY_LOG_CAPACITY=42\n").unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        if env::var("ACTIVITY_LOG_CAPACITY").is_err() {
            assert_eq!(config.catalog.activity_log_capacity, 42);
        }
        fs::remove_file(&path).unwrap();

        assert!(AppConfig::load_from_file(&path).is_none());
    }

    #[test]
    fn test_session_timeout_bounds() {
        for value in ["0", "-5", "100000000000000"] {
            let pairs = [("SESSION_TIMEOUT_MINS", value)];
            let config = AppConfig::from_lookup(lookup_from(&pairs));
            assert!(config.validate().is_err(), "timeout {} accepted", value);
        }

        let pairs = [("SESSION_TIMEOUT_MINS", "43200")];
        let config = AppConfig::from_lookup(lookup_from(&pairs));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_global_config_after_init() {
        let initialized = init_config();
        let fetched = get_config().unwrap();
        assert!(std::ptr::eq(initialized, fetched));
    }
}
