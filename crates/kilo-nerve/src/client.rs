use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::{
    config::{NerveConfig, DEFAULT_TIMEOUT_MS},
    errors::Error,
    nerve::{Alert, AlertType, Metadata, Nerve, Observation, Priority, Severity, UiEvent},
};

/// HTTP nerve posting JSON to the Kilo brain.
pub struct KiloNerve {
    client: Client,
    service: String,
    base_url: String,
}

impl KiloNerve {
    /// Client with the default request timeout.
    pub fn new(service: &str, base_url: &str) -> Result<Self, Error> {
        Self::from_config(&NerveConfig {
            service: service.to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            enabled: true,
        })
    }

    pub fn from_config(config: &NerveConfig) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            service: config.service.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<T: Serialize + Sync>(&self, endpoint: &str, body: &T) -> Result<(), Error> {
        let resp = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Rejected {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Kilo accepted {} from {}", endpoint, self.service);
        Ok(())
    }
}

#[async_trait]
impl Nerve for KiloNerve {
    async fn send_observation(
        &self,
        content: &str,
        priority: Priority,
        metadata: Metadata,
    ) -> Result<(), Error> {
        let observation = Observation::new(
            self.service.clone(),
            content.to_string(),
            priority,
            metadata,
            Utc::now(),
        );
        self.post("observations", &observation).await
    }

    async fn emit_event(&self, event_name: &str, payload: Metadata) -> Result<(), Error> {
        let event = UiEvent::new(
            self.service.clone(),
            event_name.to_string(),
            payload,
            Utc::now(),
        );
        self.post("events", &event).await
    }

    async fn alert_kilo(
        &self,
        alert_type: AlertType,
        message: &str,
        severity: Severity,
    ) -> Result<(), Error> {
        let alert = Alert::new(
            self.service.clone(),
            alert_type,
            message.to_string(),
            severity,
            Utc::now(),
        );
        self.post("alerts", &alert).await
    }
}
