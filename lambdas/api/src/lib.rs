//! Meds service HTTP surface

/// Environment configuration
pub mod config;

/// Error to response mapping
pub mod error;

/// Endpoint handlers
pub mod handlers;

/// Shared state
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use cqrs_es::EventStore;
use domain::medications::Medication;

pub use config::{Config, Store};
pub use error::ApiError;
pub use state::AppState;

pub fn router<ES>(state: AppState<ES>) -> Router
where
    ES: EventStore<Medication> + 'static,
    ES::AC: Send,
{
    Router::new()
        .route("/add", post(handlers::add_med::<ES>))
        .route("/take/:id", post(handlers::take_med::<ES>))
        .route(
            "/:id",
            get(handlers::get_med::<ES>).delete(handlers::delete_med::<ES>),
        )
        .with_state(state)
}
