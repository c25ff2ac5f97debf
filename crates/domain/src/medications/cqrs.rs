use std::{env, sync::Arc};
use cqrs_es::{
    mem_store::MemStore,
    persist::{GenericQuery, PersistedEventStore, PersistenceError, ViewRepository},
    CqrsFramework, Query,
};
use dynamo_es::{DynamoEventRepository, DynamoViewRepository};
use super::{Medication, MemViewRepository, Services, View};

pub type MedicationsRepo = Arc<dyn ViewRepository<View, Medication>>;

pub type DynamoCqrs =
    CqrsFramework<Medication, PersistedEventStore<DynamoEventRepository, Medication>>;

pub type MemCqrs = CqrsFramework<Medication, MemStore<Medication>>;

/// Projection from medication events into `repo`. A failed view write is
/// logged; the events themselves stay committed.
fn projection<R>(repo: Arc<R>) -> Box<GenericQuery<R, View, Medication>>
where
    R: ViewRepository<View, Medication> + 'static,
{
    let mut query = GenericQuery::new(repo);
    query.use_error_handler(Box::new(|err: PersistenceError| {
        tracing::error!("Medication view update failed: {}", err);
    }));
    Box::new(query)
}

/// DynamoDB event store and view table, named from the environment.
pub fn init(client: aws_sdk_dynamodb::Client) -> (Arc<DynamoCqrs>, MedicationsRepo) {
    let event_log_table = env::var("DYNAMODB_EVENT_LOG_TABLE")
        .unwrap_or("meds-event-log".to_string());
    let event_snapshots_table = env::var("DYNAMODB_EVENT_SNAPSHOTS_TABLE")
        .unwrap_or("meds-event-snapshots".to_string());
    let view_table = env::var("DYNAMODB_MEDICATIONS_VIEW_TABLE")
        .unwrap_or("meds-medications-view".to_string());

    let repo = Arc::new(DynamoViewRepository::<View, Medication>::new(
        &view_table,
        client.clone(),
    ));

    let store = PersistedEventStore::new_snapshot_store(
        DynamoEventRepository::new(client).with_tables(&event_log_table, &event_snapshots_table),
        5,
    );

    let queries: Vec<Box<dyn Query<Medication>>> = vec![projection(repo.clone())];
    let view_repo: MedicationsRepo = repo;

    (
        Arc::new(CqrsFramework::new(store, queries, Services::default())),
        view_repo,
    )
}

/// Event store and view repository held in process memory.
///
/// `MemStore` does not check event sequence numbers, so two commands racing
/// on the same medication can both commit. The later view write then fails
/// its version check and is only logged, leaving the view one event behind.
/// Use it for local runs and tests, never for shared deployments.
pub fn init_in_memory() -> (Arc<MemCqrs>, MedicationsRepo) {
    let repo = Arc::new(MemViewRepository::default());
    let store = MemStore::<Medication>::default();

    let queries: Vec<Box<dyn Query<Medication>>> = vec![projection(repo.clone())];
    let view_repo: MedicationsRepo = repo;

    (
        Arc::new(CqrsFramework::new(store, queries, Services::default())),
        view_repo,
    )
}
