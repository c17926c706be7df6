use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment-driven settings read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_file: PathBuf,
    pub request_timeout: Duration,
    pub rate_limit_window: Duration,
    pub rate_limit_per_minute: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_string("BIND_ADDR", "0.0.0.0:8000"),
            database_file: PathBuf::from(env_string("DATABASE_FILE", "database.db")),
            request_timeout: Duration::from_secs(env_u64("REQUEST_TIMEOUT", 25)),
            rate_limit_window: Duration::from_secs(60),
            rate_limit_per_minute: env_u64("RATE_LIMIT_PER_MINUTE", 45) as usize,
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}
