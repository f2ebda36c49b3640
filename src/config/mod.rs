//! Configuration module for the back-office client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the travel booking backend
    pub api_url: String,
    /// Path to the SQLite file holding persisted client state
    pub storage_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Page size sent as `limit` on list requests
    pub page_limit: u32,
    /// Quiet period before a search box fires its request
    pub search_debounce: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("BACKOFFICE_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let storage_path = env::var("BACKOFFICE_STORAGE_PATH")
            .unwrap_or_else(|_| "./data/backoffice.sqlite".to_string())
            .into();

        let log_level = env::var("BACKOFFICE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("BACKOFFICE_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let page_limit = parse_or("BACKOFFICE_PAGE_LIMIT", 10u32);
        let search_debounce =
            Duration::from_millis(parse_or("BACKOFFICE_SEARCH_DEBOUNCE_MS", 500u64));
        let request_timeout =
            Duration::from_secs(parse_or("BACKOFFICE_REQUEST_TIMEOUT_SECS", 30u64));

        Self {
            api_url,
            storage_path,
            log_level,
            log_format,
            page_limit,
            search_debounce,
            request_timeout,
        }
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value {:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
