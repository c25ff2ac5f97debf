use chrono::{DateTime, Utc};
use cqrs_es::DomainEvent;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    MedicationAdded {
        id: String,
        name: String,
        dosage: String,
        schedule: String,
        times: Vec<String>,
        created_at: DateTime<Utc>,
    },

    MedicationTaken {
        id: String,
        taken_at: DateTime<Utc>,
    },

    MedicationDeleted {
        id: String,
        name: String,
        updated_at: DateTime<Utc>,
    },
}

impl DomainEvent for Event {
    fn event_type(&self) -> String {
        match self {
            Event::MedicationAdded { .. } => "Medication:Added".to_string(),
            Event::MedicationTaken { .. } => "Medication:Taken".to_string(),
            Event::MedicationDeleted { .. } => "Medication:Deleted".to_string(),
        }
    }

    fn event_version(&self) -> String {
        "1.0".to_string()
    }
}
