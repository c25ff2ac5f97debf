use std::sync::Arc;

use cqrs_es::{CqrsFramework, EventStore};
use domain::medications::{cqrs::MedicationsRepo, Medication};
use kilo_nerve::Nerve;

/// Shared per-request state, generic over the event store back-end.
pub struct AppState<ES>
where
    ES: EventStore<Medication>,
{
    pub medications_repo: MedicationsRepo,
    pub medications_cqrs: Arc<CqrsFramework<Medication, ES>>,
    pub nerve: Arc<dyn Nerve>,
}

impl<ES> AppState<ES>
where
    ES: EventStore<Medication>,
{
    pub fn new(
        medications_cqrs: Arc<CqrsFramework<Medication, ES>>,
        medications_repo: MedicationsRepo,
        nerve: Arc<dyn Nerve>,
    ) -> Self {
        Self {
            medications_repo,
            medications_cqrs,
            nerve,
        }
    }
}

impl<ES> Clone for AppState<ES>
where
    ES: EventStore<Medication>,
{
    fn clone(&self) -> Self {
        Self {
            medications_repo: self.medications_repo.clone(),
            medications_cqrs: self.medications_cqrs.clone(),
            nerve: self.nerve.clone(),
        }
    }
}
