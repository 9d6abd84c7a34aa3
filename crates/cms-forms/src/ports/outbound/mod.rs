//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must implement.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::FormSchema;
use crate::domain::events::FormEvent;
use crate::domain::value_objects::EntityId;

/// Form document store.
///
/// Works on whole transport documents: there is no partial field update,
/// and deleting a form removes its fields and options with it.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Store a new form; fails with `Conflict` if the id exists
    async fn create(&self, form: &FormSchema) -> Result<(), RepositoryError>;

    /// Replace a stored form by id (last write wins)
    async fn replace(&self, form: &FormSchema) -> Result<(), RepositoryError>;

    /// Find form by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormSchema>, RepositoryError>;

    /// Fetch every stored form
    async fn find_all(&self) -> Result<Vec<FormSchema>, RepositoryError>;

    /// Delete form
    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<FormEvent>) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
