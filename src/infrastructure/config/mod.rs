use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const DEFAULT_LOG_FILE: &str = "./log.txt";

#[derive(Debug, Clone)]
pub struct Config {
    pub freshrss: FreshRssConfig,
    pub karakeep: KarakeepConfig,
    pub log_file: PathBuf,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct FreshRssConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct KarakeepConfig {
    pub endpoint: String,
    pub api_key: String,
    pub verify_ssl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| -> AppResult<String> {
            present(key).ok_or_else(|| AppError::Config(format!("{} is not set", key)))
        };
        // Karakeep settings also accept the names used by the karakeep_python_api client
        let karakeep_var = |key: &str, legacy: &str| present(key).or_else(|| present(legacy));
        let required_karakeep = |key: &str, legacy: &str| -> AppResult<String> {
            karakeep_var(key, legacy).ok_or_else(|| {
                AppError::Config(format!("{} (or {}) is not set", key, legacy))
            })
        };

        let config = Config {
            freshrss: FreshRssConfig {
                host: required("FRESHRSS_API_HOST")?,
                username: required("FRESHRSS_API_USERNAME")?,
                password: required("FRESHRSS_API_PASSWORD")?,
            },
            karakeep: KarakeepConfig {
                endpoint: required_karakeep(
                    "KARAKEEP_API_ENDPOINT",
                    "KARAKEEP_PYTHON_API_ENDPOINT",
                )?,
                api_key: required_karakeep("KARAKEEP_API_KEY", "KARAKEEP_PYTHON_API_KEY")?,
                verify_ssl: karakeep_var(
                    "KARAKEEP_API_VERIFY_SSL",
                    "KARAKEEP_PYTHON_API_VERIFY_SSL",
                )
                .map(|s| s.trim().to_lowercase() != "false")
                .unwrap_or(true),
            },
            log_file: lookup("LOG_FILE")
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
                .into(),
            log_format: match lookup("LOG_FORMAT").as_deref().map(str::trim) {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }
}
