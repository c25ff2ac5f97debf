use async_trait::async_trait;

use crate::{
    errors::Error,
    nerve::{AlertType, Metadata, Nerve, Priority, Severity},
};

/// Nerve that only writes to the log. Used when Kilo is switched off.
#[derive(Clone, Debug)]
pub struct LogNerve {
    service: String,
}

impl LogNerve {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }
}

#[async_trait]
impl Nerve for LogNerve {
    async fn send_observation(
        &self,
        content: &str,
        priority: Priority,
        metadata: Metadata,
    ) -> Result<(), Error> {
        tracing::info!(
            service = %self.service,
            ?priority,
            metadata = %serde_json::Value::Object(metadata),
            "observation: {}",
            content
        );
        Ok(())
    }

    async fn emit_event(&self, event_name: &str, payload: Metadata) -> Result<(), Error> {
        tracing::info!(
            service = %self.service,
            payload = %serde_json::Value::Object(payload),
            "event: {}",
            event_name
        );
        Ok(())
    }

    async fn alert_kilo(
        &self,
        alert_type: AlertType,
        message: &str,
        severity: Severity,
    ) -> Result<(), Error> {
        tracing::info!(
            service = %self.service,
            ?alert_type,
            ?severity,
            "alert: {}",
            message
        );
        Ok(())
    }
}
