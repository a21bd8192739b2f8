//! Discovery and adaptation of change-notification and coercion callbacks.

pub mod casts;
pub mod discovery;
pub mod metadata;

pub use discovery::{discover_handlers, ChangeCandidate, DiscoveredHandlers, InstanceShape};
