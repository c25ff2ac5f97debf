//! Shared helpers for driving the meds router in tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cqrs_es::persist::ViewRepository;
use domain::medications::cqrs::{self, MedicationsRepo};
use kilo_nerve::{AlertType, Error, Metadata, Nerve, Priority, Severity};
use meds_api::{router, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// One call made on the nerve, plus whether the watched medication was
/// already deleted in the view when the call happened.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Observation {
        content: String,
        priority: Priority,
        metadata: Metadata,
    },
    Event {
        name: String,
        payload: Metadata,
    },
    Alert {
        alert_type: AlertType,
        message: String,
        severity: Severity,
        deleted_at_call: Option<bool>,
    },
}

/// Nerve that remembers every call and can be told to fail.
#[derive(Default)]
pub struct RecordingNerve {
    calls: Mutex<Vec<Call>>,
    fail: bool,
    watch: Mutex<Option<(MedicationsRepo, String)>>,
}

impl RecordingNerve {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Record the deleted flag of `id` whenever an alert is raised.
    pub fn watch(&self, repo: MedicationsRepo, id: &str) {
        *self.watch.lock().unwrap() = Some((repo, id.to_string()));
    }

    fn record(&self, call: Call) -> Result<(), Error> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(Error::Rejected {
                endpoint: "test".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Nerve for RecordingNerve {
    async fn send_observation(
        &self,
        content: &str,
        priority: Priority,
        metadata: Metadata,
    ) -> Result<(), Error> {
        self.record(Call::Observation {
            content: content.to_string(),
            priority,
            metadata,
        })
    }

    async fn emit_event(&self, event_name: &str, payload: Metadata) -> Result<(), Error> {
        self.record(Call::Event {
            name: event_name.to_string(),
            payload,
        })
    }

    async fn alert_kilo(
        &self,
        alert_type: AlertType,
        message: &str,
        severity: Severity,
    ) -> Result<(), Error> {
        let watched = self.watch.lock().unwrap().clone();
        let deleted_at_call = match watched {
            Some((repo, id)) => repo
                .load(&id)
                .await
                .unwrap()
                .map(|view| view.medication.deleted),
            None => None,
        };

        self.record(Call::Alert {
            alert_type,
            message: message.to_string(),
            severity,
            deleted_at_call,
        })
    }
}

/// Router over the in-memory store.
pub fn app(nerve: Arc<RecordingNerve>) -> (Router, MedicationsRepo) {
    let (medications_cqrs, medications_repo) = cqrs::init_in_memory();
    let app = router(AppState::new(
        medications_cqrs,
        medications_repo.clone(),
        nerve,
    ));
    (app, medications_repo)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}
