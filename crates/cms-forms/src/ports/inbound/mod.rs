//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::{CreateFormCommand, FormSchema};
use crate::domain::aggregates::Form;
use crate::domain::services::{SchemaWarning, Submission, ValidationReport};
use crate::domain::value_objects::EntityId;
use crate::error::SchemaError;
use crate::ports::outbound::RepositoryError;

/// Form management use cases
#[async_trait]
pub trait FormUseCases: Send + Sync {
    /// Create and store a new form
    async fn create_form(&self, command: CreateFormCommand) -> Result<Form, UseCaseError>;

    /// Store a form from an external schema document
    async fn import_form(&self, schema: FormSchema) -> Result<Form, UseCaseError>;

    /// Load a form for editing
    async fn open_form(&self, id: &EntityId) -> Result<Form, UseCaseError>;

    /// Replace the stored copy with an edited form
    async fn save_form(&self, form: &Form) -> Result<(), UseCaseError>;

    /// Get form by ID
    async fn get_form(&self, id: &EntityId) -> Result<Option<Form>, UseCaseError>;

    /// List all forms, active or not
    async fn list_forms(&self) -> Result<Vec<Form>, UseCaseError>;

    /// List forms open to public consumption
    async fn list_active_forms(&self) -> Result<Vec<Form>, UseCaseError>;

    /// Delete a form with all its fields and options
    async fn delete_form(&self, id: &EntityId) -> Result<(), UseCaseError>;

    /// Validate a visitor submission against an active form
    async fn validate_submission(&self, id: &EntityId, submission: &Submission) -> Result<ValidationReport, UseCaseError>;
}

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("form not found: {0}")]
    NotFound(String),

    #[error("form is not active: {0}")]
    Inactive(String),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("schema rejected: {}", format_warnings(.0))]
    Lint(Vec<SchemaWarning>),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

fn format_warnings(warnings: &[SchemaWarning]) -> String {
    warnings.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
