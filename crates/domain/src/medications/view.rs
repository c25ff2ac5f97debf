use cqrs_es::{Aggregate, EventEnvelope, View as CqrsView};
use serde::{Deserialize, Serialize};
use super::{Medication, AGGREGATE_TYPE};

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct View {
    pub aggregate_type: String,
    pub command_id: String,
    pub id: String,
    pub medication: Medication,
}

impl View {
    /// The medication, unless it has been deleted
    pub fn live(self) -> Option<Medication> {
        if self.medication.deleted {
            None
        } else {
            Some(self.medication)
        }
    }
}

impl CqrsView<Medication> for View {
    fn update(&mut self, event: &EventEnvelope<Medication>) {
        self.id.clone_from(&event.aggregate_id);
        self.aggregate_type = AGGREGATE_TYPE.to_string();
        self.command_id = event
            .metadata
            .get("command_id")
            .cloned()
            .unwrap_or_default();
        self.medication.apply(event.payload.clone());
    }
}
