use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{http::StatusCode, Router};
use cqrs_es::{
    mem_store::MemStore,
    persist::{GenericQuery, PersistenceError, ViewContext, ViewRepository},
    CqrsFramework, Query,
};
use domain::medications::{cqrs::MedicationsRepo, Medication, MemViewRepository, Services, View};
use meds_api::{router, AppState};
use serde_json::json;

mod common;

use common::{post_empty, post_json, send, RecordingNerve};

/// View repository whose writes can be switched off.
#[derive(Default)]
struct FlakyViews {
    inner: MemViewRepository,
    failing: AtomicBool,
}

#[async_trait]
impl ViewRepository<View, Medication> for FlakyViews {
    async fn load(&self, view_id: &str) -> Result<Option<View>, PersistenceError> {
        self.inner.load(view_id).await
    }

    async fn load_with_context(
        &self,
        view_id: &str,
    ) -> Result<Option<(View, ViewContext)>, PersistenceError> {
        self.inner.load_with_context(view_id).await
    }

    async fn update_view(&self, view: View, context: ViewContext) -> Result<(), PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::UnknownError("view table unavailable".into()));
        }
        self.inner.update_view(view, context).await
    }
}

fn app(nerve: Arc<RecordingNerve>, views: Arc<FlakyViews>) -> Router {
    let queries: Vec<Box<dyn Query<Medication>>> =
        vec![Box::new(GenericQuery::new(views.clone()))];
    let cqrs = CqrsFramework::new(MemStore::<Medication>::default(), queries, Services::default());
    let repo: MedicationsRepo = views;
    router(AppState::new(Arc::new(cqrs), repo, nerve))
}

#[tokio::test]
async fn add_with_unwritten_view_is_a_server_error_not_a_404() {
    let nerve = Arc::new(RecordingNerve::default());
    let views = Arc::new(FlakyViews::default());
    views.failing.store(true, Ordering::SeqCst);
    let app = app(nerve.clone(), views);

    let (status, body) = send(
        &app,
        post_json("/add", json!({"name": "Aspirin", "dosage": "500mg"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("view"));
    assert!(nerve.calls().is_empty());
}

#[tokio::test]
async fn take_with_stale_view_does_not_report_an_old_dose() {
    let nerve = Arc::new(RecordingNerve::default());
    let views = Arc::new(FlakyViews::default());
    let app = app(nerve.clone(), views.clone());

    let (status, body) = send(
        &app,
        post_json("/add", json!({"name": "Aspirin", "dosage": "500mg"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["med"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, post_empty(&format!("/take/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    nerve.clear();

    views.failing.store(true, Ordering::SeqCst);
    let (status, body) = send(&app, post_empty(&format!("/take/{}", id))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains(&id));
    assert!(nerve.calls().is_empty());
}
