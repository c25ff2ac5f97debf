use async_trait::async_trait;
use cqrs_es::persist::{PersistenceError, ViewContext, ViewRepository};
use dashmap::{mapref::entry::Entry, DashMap};
use super::{Medication, View};

/// View repository kept in process memory, for local runs and tests.
///
/// Versions follow the same optimistic rule as the DynamoDB repository: an
/// update is accepted only if it was loaded at the currently stored version.
#[derive(Default)]
pub struct MemViewRepository {
    views: DashMap<String, (View, i64)>,
}

#[async_trait]
impl ViewRepository<View, Medication> for MemViewRepository {
    async fn load(&self, view_id: &str) -> Result<Option<View>, PersistenceError> {
        Ok(self.views.get(view_id).map(|entry| entry.0.clone()))
    }

    async fn load_with_context(
        &self,
        view_id: &str,
    ) -> Result<Option<(View, ViewContext)>, PersistenceError> {
        Ok(self.views.get(view_id).map(|entry| {
            let (view, version) = entry.value();
            (view.clone(), ViewContext::new(view_id.to_string(), *version))
        }))
    }

    async fn update_view(&self, view: View, context: ViewContext) -> Result<(), PersistenceError> {
        match self.views.entry(context.view_instance_id) {
            Entry::Occupied(mut stored) => {
                if stored.get().1 != context.version {
                    return Err(PersistenceError::OptimisticLockError);
                }
                stored.insert((view, context.version + 1));
            }
            Entry::Vacant(slot) => {
                if context.version != 0 {
                    return Err(PersistenceError::OptimisticLockError);
                }
                slot.insert((view, 1));
            }
        }
        Ok(())
    }
}
