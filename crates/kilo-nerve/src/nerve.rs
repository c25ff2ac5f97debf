use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Structured fields attached to observations and UI events
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Health,
    System,
    Reminder,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Body of `POST /observations`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, new)]
pub struct Observation {
    pub source: String,
    pub content: String,
    pub priority: Priority,
    pub metadata: Metadata,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /events`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, new)]
pub struct UiEvent {
    pub source: String,
    pub event: String,
    pub payload: Metadata,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /alerts`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, new)]
pub struct Alert {
    pub source: String,
    pub alert_type: AlertType,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

/// What a service can tell Kilo.
///
/// Callers await each call; nothing is returned beyond success or failure.
#[async_trait]
pub trait Nerve: Send + Sync {
    /// Record a textual event with structured metadata.
    async fn send_observation(
        &self,
        content: &str,
        priority: Priority,
        metadata: Metadata,
    ) -> Result<(), Error>;

    /// Push a real-time event to live user interfaces.
    async fn emit_event(&self, event_name: &str, payload: Metadata) -> Result<(), Error>;

    /// Raise an operator-facing alert.
    async fn alert_kilo(
        &self,
        alert_type: AlertType,
        message: &str,
        severity: Severity,
    ) -> Result<(), Error>;
}
