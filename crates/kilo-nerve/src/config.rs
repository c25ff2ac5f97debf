use std::time::Duration;

use crate::errors::Error;

pub const DEFAULT_BRAIN_URL: &str = "http://localhost:9000";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NerveConfig {
    /// Name reported as `source` on everything sent
    pub service: String,
    pub base_url: String,
    pub timeout: Duration,
    /// When false, notifications are only logged
    pub enabled: bool,
}

impl NerveConfig {
    /// Read `KILO_*` variables through `lookup`.
    pub fn from_lookup<F>(default_service: &str, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service = lookup("KILO_SERVICE_NAME").unwrap_or(default_service.to_string());
        let base_url = lookup("KILO_BRAIN_URL").unwrap_or(DEFAULT_BRAIN_URL.to_string());

        let timeout_ms = match lookup("KILO_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| Error::Config {
                key: "KILO_TIMEOUT_MS".to_string(),
                message: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let enabled = match lookup("KILO_NERVE_ENABLED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| Error::Config {
                key: "KILO_NERVE_ENABLED".to_string(),
                message: format!("expected true or false, got {:?}", raw),
            })?,
            None => true,
        };

        if enabled && !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config {
                key: "KILO_BRAIN_URL".to_string(),
                message: format!("not an http(s) URL: {}", base_url),
            });
        }

        Ok(Self {
            service,
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            enabled,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
