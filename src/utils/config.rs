use dotenv::dotenv;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_DATABASE_NAME: &str = "petclinic";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// No URL means the in-memory store is used.
    pub database_url: Option<String>,
    pub database_name: String,
    pub bind_address: String,
    pub log_level: String,
    pub apm_enabled: bool,
    pub tag_app_name: String,
    pub tag_name: String,
}

impl AppConfig {

    pub fn global() -> Result<&'static AppConfig, ConfigError> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }
        let config = Self::from_env()?;
        Ok(CONFIG.get_or_init(|| config))
    }

    pub fn from_env() -> Result<AppConfig, ConfigError> {
        dotenv().ok();

        Ok(AppConfig {
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            database_name: var_or("DATABASE_NAME", DEFAULT_DATABASE_NAME),
            bind_address: var_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            log_level: var_or("LOG_LEVEL", DEFAULT_LOG_LEVEL),
            apm_enabled: match env::var("IS_CONFIG_ENABLE") {
                Ok(value) => parse_bool("IS_CONFIG_ENABLE", &value)?,
                Err(_) => false,
            },
            tag_app_name: var_or("TAG_APP_NAME", ""),
            tag_name: var_or("TAG_NAME", ""),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue { name, value: value.to_string() }),
    }
}
