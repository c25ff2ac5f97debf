use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub enum Command {
    /// Register a new medication
    AddMedication {
        id: String,
        name: String,
        dosage: String,
        schedule: String,
        times: Vec<String>,
    },

    /// Record that the medication was taken now
    TakeMedication,

    /// Remove the medication
    DeleteMedication,
}
