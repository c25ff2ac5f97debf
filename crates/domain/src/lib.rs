//! Meds Domain Models

/// Medication aggregate
pub mod medications;

/// Domain errors
pub mod errors;

pub use errors::Error;
