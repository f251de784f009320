//! Configuration management for Lambda functions.

use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
///
/// Every field has a default so the functions run with no configuration at
/// all; environment variables override per deployment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the CourseUP catalog API
    pub catalog_base_url: String,
    /// Academic term as YYYYMM (01 = spring, 05 = summer, 09 = fall);
    /// derived from the current date when unset
    pub term: Option<String>,
    /// Sections starting before this hour are excluded
    pub earliest_start_hour: u8,
    /// Sections ending after this hour are excluded
    pub latest_end_hour: u8,
    /// Maximum number of schedules returned per request
    pub max_schedules: usize,
    /// Maximum number of section combinations examined per request
    pub max_combinations: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            catalog_base_url: env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "https://courseup.vikelabs.ca".to_string()),
            term: env::var("TERM").ok(),
            earliest_start_hour: env_or("EARLIEST_START_HOUR", 7),
            latest_end_hour: env_or("LATEST_END_HOUR", 23),
            max_schedules: env_or("MAX_SCHEDULES", 50),
            max_combinations: env_or("MAX_COMBINATIONS", 1_000_000),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
