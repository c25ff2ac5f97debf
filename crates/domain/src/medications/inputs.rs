use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddMedicationInput {
    pub name: String,
    pub dosage: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub times: Vec<String>,
}
