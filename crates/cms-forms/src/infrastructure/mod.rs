//! Infrastructure layer
//!
//! Concrete implementations of the outbound ports.

pub mod persistence;
pub mod events;

pub use persistence::{InMemoryFormRepository, JsonFileFormRepository};
pub use events::{NoOpEventPublisher, RecordingEventPublisher, TracingEventPublisher};
