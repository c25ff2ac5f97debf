//! KiloNerve: reports what a service does to the Kilo brain

/// Notification contract and payloads
pub mod nerve;

/// HTTP client
pub mod client;

/// Log-only nerve
pub mod log;

/// Environment configuration
pub mod config;

/// Client errors
pub mod errors;

use std::sync::Arc;

pub use client::KiloNerve;
pub use config::{NerveConfig, DEFAULT_TIMEOUT_MS};
pub use errors::Error;
pub use log::LogNerve;
pub use nerve::{Alert, AlertType, Metadata, Nerve, Observation, Priority, Severity, UiEvent};

/// Build the nerve described by `config`.
pub fn build(config: &NerveConfig) -> Result<Arc<dyn Nerve>, Error> {
    if config.enabled {
        Ok(Arc::new(KiloNerve::from_config(config)?))
    } else {
        Ok(Arc::new(LogNerve::new(&config.service)))
    }
}
