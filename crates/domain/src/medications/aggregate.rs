use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cqrs_es::Aggregate;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

use super::{Command, Event};

/// Medication aggregate
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct Medication {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub name: String,
    pub dosage: String,
    pub schedule: String,
    /// Administration times, e.g. "08:00"
    pub times: Vec<String>,

    /// Every time the medication was recorded as taken, oldest first
    pub taken: Vec<DateTime<Utc>>,

    pub deleted: bool,
}

pub const AGGREGATE_TYPE: &str = "Medication";

#[derive(Clone, Default)]
pub struct Services {}

#[async_trait]
impl Aggregate for Medication {
    type Command = Command;
    type Event = Event;
    type Error = Error;
    type Services = Services;

    fn aggregate_type() -> String {
        AGGREGATE_TYPE.to_string()
    }

    async fn handle(
        &self,
        command: Self::Command,
        _services: &Self::Services,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            Command::AddMedication {
                id,
                name,
                dosage,
                schedule,
                times,
            } => {
                self.validate_new()?;
                validate_required("name", &name)?;
                validate_required("dosage", &dosage)?;

                Ok(vec![Event::MedicationAdded {
                    id,
                    name: name.trim().to_string(),
                    dosage: dosage.trim().to_string(),
                    schedule,
                    times,
                    created_at: Utc::now(),
                }])
            }

            Command::TakeMedication => {
                self.validate_existing()?;

                Ok(vec![Event::MedicationTaken {
                    id: self.id.clone(),
                    taken_at: Utc::now(),
                }])
            }

            Command::DeleteMedication => {
                self.validate_existing()?;

                Ok(vec![Event::MedicationDeleted {
                    id: self.id.clone(),
                    name: self.name.clone(),
                    updated_at: Utc::now(),
                }])
            }
        }
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            Event::MedicationAdded {
                id,
                name,
                dosage,
                schedule,
                times,
                created_at,
            } => {
                self.id = id;
                self.name = name;
                self.dosage = dosage;
                self.schedule = schedule;
                self.times = times;
                self.created_at = created_at;
                self.updated_at = created_at;
            }

            Event::MedicationTaken { taken_at, .. } => {
                self.taken.push(taken_at);
                self.updated_at = taken_at;
            }

            Event::MedicationDeleted { updated_at, .. } => {
                self.deleted = true;
                self.updated_at = updated_at;
            }
        }
    }
}

impl Medication {
    /// Most recent time the medication was taken
    pub fn last_taken(&self) -> Option<DateTime<Utc>> {
        self.taken.last().copied()
    }

    fn validate_new(&self) -> Result<(), Error> {
        if !self.id.is_empty() {
            return Err(Error::Uniqueness { field: "id".to_string() });
        }
        Ok(())
    }

    fn validate_existing(&self) -> Result<(), Error> {
        // A deleted medication is gone as far as callers are concerned.
        if self.id.is_empty() || self.deleted {
            return Err(Error::NotFound { entity: AGGREGATE_TYPE.to_string() });
        }
        Ok(())
    }
}

fn validate_required(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("Medication {} must not be empty", field),
        });
    }
    Ok(())
}
