use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use cqrs_es::EventStore;
use domain::medications::{
    self, cqrs::MedicationsRepo, inputs::AddMedicationInput, Medication, View,
};
use kilo_nerve::{AlertType, Metadata, Priority, Severity};
use serde_json::json;
use std::collections::HashMap;
use ulid::Ulid;

use crate::{error::ApiError, state::AppState};

/// Command metadata carrying a fresh `command_id`, returned alongside it.
fn command_metadata() -> (String, HashMap<String, String>) {
    let command_id = Ulid::new().to_string();
    let mut metadata = HashMap::new();
    metadata.insert("command_id".to_string(), command_id.clone());
    (command_id, metadata)
}

fn med_fields(med: &Medication) -> Metadata {
    let mut fields = Metadata::new();
    fields.insert("med_id".to_string(), json!(med.id));
    fields.insert("med_name".to_string(), json!(med.name));
    fields.insert("dosage".to_string(), json!(med.dosage));
    fields
}

fn ui_payload(med: &Medication) -> Metadata {
    let mut payload = Metadata::new();
    payload.insert("med_name".to_string(), json!(med.name));
    payload.insert("dosage".to_string(), json!(med.dosage));
    payload
}

/// Notifications run after the command commits; a failure is logged and
/// never fails the request.
fn report(call: &str, result: Result<(), kilo_nerve::Error>) {
    if let Err(e) = result {
        tracing::warn!("KiloNerve {} failed: {}", call, e);
    }
}

async fn load_live(repo: &MedicationsRepo, id: &str) -> Result<Medication, ApiError> {
    repo.load(id)
        .await?
        .and_then(View::live)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

/// The medication as of `command_id`. The command has already committed, so a
/// view that is missing or older than it is a projection failure, not a 404.
async fn load_committed(
    repo: &MedicationsRepo,
    id: &str,
    command_id: &str,
) -> Result<Medication, ApiError> {
    match repo.load(id).await? {
        Some(view) if view.command_id == command_id => Ok(view.medication),
        _ => Err(ApiError::ViewBehind(id.to_string())),
    }
}

// Add medication
pub async fn add_med<ES>(
    State(state): State<AppState<ES>>,
    Json(input): Json<AddMedicationInput>,
) -> Result<impl IntoResponse, ApiError>
where
    ES: EventStore<Medication> + 'static,
    ES::AC: Send,
{
    let id = Ulid::new().to_string();

    let command = medications::Command::AddMedication {
        id: id.clone(),
        name: input.name,
        dosage: input.dosage,
        schedule: input.schedule,
        times: input.times,
    };

    let (command_id, metadata) = command_metadata();
    state
        .medications_cqrs
        .execute_with_metadata(&id, command, metadata)
        .await?;

    let med = load_committed(&state.medications_repo, &id, &command_id).await?;
    tracing::info!("Medication {} added: {}", med.id, med.name);

    let mut observed = med_fields(&med);
    observed.insert("schedule".to_string(), json!(med.schedule));
    observed.insert("times".to_string(), json!(med.times));

    report(
        "send_observation",
        state
            .nerve
            .send_observation(
                &format!(
                    "New medication added: {} ({}) - {}",
                    med.name, med.dosage, med.schedule
                ),
                Priority::Normal,
                observed,
            )
            .await,
    );

    report(
        "emit_event",
        state.nerve.emit_event("med_added", ui_payload(&med)).await,
    );

    Ok((StatusCode::CREATED, Json(json!({ "med": med }))))
}

// Record a dose
pub async fn take_med<ES>(
    Path(id): Path<String>,
    State(state): State<AppState<ES>>,
) -> Result<impl IntoResponse, ApiError>
where
    ES: EventStore<Medication> + 'static,
    ES::AC: Send,
{
    let (command_id, metadata) = command_metadata();
    state
        .medications_cqrs
        .execute_with_metadata(&id, medications::Command::TakeMedication, metadata)
        .await?;

    let med = load_committed(&state.medications_repo, &id, &command_id).await?;
    let time_taken = med.last_taken().unwrap_or_else(Utc::now);
    tracing::info!("Medication {} taken at {}", med.id, time_taken);

    let mut observed = med_fields(&med);
    observed.insert("time_taken".to_string(), json!(time_taken.to_rfc3339()));

    report(
        "send_observation",
        state
            .nerve
            .send_observation(
                &format!("User took {} ({})", med.name, med.dosage),
                Priority::Normal,
                observed,
            )
            .await,
    );

    report(
        "emit_event",
        state.nerve.emit_event("med_taken", ui_payload(&med)).await,
    );

    Ok(Json(json!({ "med": med })))
}

// Delete medication
pub async fn delete_med<ES>(
    Path(id): Path<String>,
    State(state): State<AppState<ES>>,
) -> Result<impl IntoResponse, ApiError>
where
    ES: EventStore<Medication> + 'static,
    ES::AC: Send,
{
    let med = load_live(&state.medications_repo, &id).await?;

    let (_, metadata) = command_metadata();
    state
        .medications_cqrs
        .execute_with_metadata(&id, medications::Command::DeleteMedication, metadata)
        .await?;

    tracing::info!("Medication {} deleted: {}", med.id, med.name);

    report(
        "alert_kilo",
        state
            .nerve
            .alert_kilo(
                AlertType::Health,
                &format!("Medication deleted: {}", med.name),
                Severity::Info,
            )
            .await,
    );

    Ok(Json(json!({ "message": format!("{} deleted", med.name) })))
}

// Get medication
pub async fn get_med<ES>(
    Path(id): Path<String>,
    State(state): State<AppState<ES>>,
) -> Result<impl IntoResponse, ApiError>
where
    ES: EventStore<Medication> + 'static,
{
    let med = load_live(&state.medications_repo, &id).await?;
    Ok(Json(json!({ "med": med })))
}
