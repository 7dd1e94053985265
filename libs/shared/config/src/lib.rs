use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub metric_retention_secs: u64,
    pub metric_retention_samples: usize,
    pub dashboard_points: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_env("PORT", 3000),
            metric_retention_secs: parse_env("METRIC_RETENTION_SECS", 3600),
            metric_retention_samples: parse_env("METRIC_RETENTION_SAMPLES", 500),
            dashboard_points: parse_env("DASHBOARD_POINTS", 20),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            metric_retention_secs: 3600,
            metric_retention_samples: 500,
            dashboard_points: 20,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("{} has invalid value {:?}, using default {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
