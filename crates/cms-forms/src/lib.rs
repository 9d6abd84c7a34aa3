//! CMS Console Form Definition Engine
//!
//! Operators compose arbitrary-shaped forms (a named entity with an ordered
//! list of typed fields, some carrying enumerated option sets). This crate
//! persists, reorders, lints and interprets those schemas so a public
//! surface can render them and validate visitor submissions.
//!
//! ## Architecture
//!
//! - **Domain Layer**: `Form` aggregate, `FormField` entities, option and
//!   field-type value objects, submission validation
//! - **Application Layer**: `FormService` use cases, transport DTOs
//! - **Ports Layer**: repository and event publisher interfaces
//! - **Infrastructure Layer**: in-memory and JSON document stores
//!
//! ## Example
//!
//! ```
//! use cms_forms::{FieldPatch, FieldType, Form, Submission};
//!
//! let mut form = Form::create("Contact Form").unwrap();
//! assert_eq!(form.slug(), "contact-form");
//!
//! let email = form.add_field();
//! form.update_field(email, FieldPatch::new().label("Email Address").field_type(FieldType::Email).required(true));
//! assert_eq!(form.fields()[email].name(), "email_address");
//!
//! let report = form.validate(&Submission::new());
//! assert_eq!(report.violations().len(), 1);
//! ```

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use domain::aggregates::{Form, FormField, FieldPatch, MoveDirection};
pub use domain::value_objects::{slugify, EntityId, FieldOption, FieldType, PrimitiveKind, Separator};
pub use domain::events::FormEvent;
pub use domain::services::{SchemaWarning, Submission, SubmissionValidator, ValidationReport, Violation};
pub use application::{CreateFormCommand, FieldSchema, FormSchema, FormService, OptionSchema};
pub use ports::inbound::{FormUseCases, UseCaseError};
pub use ports::outbound::{EventPublisher, FormRepository, RepositoryError};
pub use infrastructure::{InMemoryFormRepository, JsonFileFormRepository, NoOpEventPublisher, RecordingEventPublisher, TracingEventPublisher};
pub use config::FormsConfig;
pub use error::{ConfigError, SchemaError, SchemaResult};
