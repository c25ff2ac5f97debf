use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cqrs_es::{persist::PersistenceError, AggregateError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Command(#[from] AggregateError<domain::Error>),

    #[error("View storage error: {0}")]
    Storage(#[from] PersistenceError),

    #[error("Medication not found: {0}")]
    NotFound(String),

    #[error("Medication {0} was saved but its view has not caught up")]
    ViewBehind(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Command(AggregateError::UserError(err)) => match err {
                domain::Error::NotFound { .. } => StatusCode::NOT_FOUND,
                domain::Error::Uniqueness { .. } => StatusCode::CONFLICT,
                domain::Error::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::Command(AggregateError::AggregateConflict) => StatusCode::CONFLICT,
            ApiError::Command(_) | ApiError::Storage(_) | ApiError::ViewBehind(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
