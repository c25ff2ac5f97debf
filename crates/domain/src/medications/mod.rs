/// Medication aggregate
pub mod aggregate;

/// Commands
pub mod commands;

/// Events
pub mod events;

/// Input DTOs
pub mod inputs;

/// View (read model)
pub mod view;

/// In-memory view storage
pub mod memory;

/// CQRS setup
pub mod cqrs;

pub use aggregate::{Medication, Services, AGGREGATE_TYPE};
pub use commands::Command;
pub use events::Event;
pub use memory::MemViewRepository;
pub use view::View;
