use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

// Top-level container for every setting
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub admin: AdminConfig,
    pub database: Option<DatabaseConfig>,
    pub redis: Option<RedisConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

// Class representative login
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub password: String,
    pub session_ttl_seconds: u64,
}

impl AdminConfig {
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_ADMIN_PASSWORD
    }
}

// Absent => seats live in memory
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Absent => sessions live in memory
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &'static str, default: &str, expected: &'static str) -> Result<T, ConfigError> {
    let value = var_or(name, default);
    value.parse().map_err(|_| ConfigError::Invalid { name, expected, value })
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_format = match var_or("LOG_FORMAT", "pretty").to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    expected: "log format (pretty | json)",
                    value: other.to_string(),
                })
            }
        };

        let database = match optional_var("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                pool_size: parse_var("DB_POOL_SIZE", "10", "number")?,
            }),
            None => None,
        };

        Ok(Config {
            app: AppConfig {
                host: var_or("HOST", "0.0.0.0"),
                port: parse_var("PORT", "5000", "port number")?,
                environment: var_or("ENVIRONMENT", "development"),
                rust_log: var_or("RUST_LOG", "classroom_seats=debug,tower_http=debug"),
                log_format,
            },
            admin: AdminConfig {
                password: optional_var("ADMIN_PASSWORD")
                    .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
                session_ttl_seconds: parse_var("SESSION_TTL_SECONDS", "86400", "number of seconds")?,
            },
            database,
            redis: optional_var("REDIS_URL").map(|url| RedisConfig { url }),
        })
    }

    /// In-memory backends and a known admin password.
    pub fn for_tests() -> Self {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
                rust_log: "classroom_seats=debug".to_string(),
                log_format: LogFormat::Pretty,
            },
            admin: AdminConfig {
                password: "lop-truong".to_string(),
                session_ttl_seconds: 3600,
            },
            database: None,
            redis: None,
        }
    }
}
