//! Domain services
//!
//! Stateless logic that reads a whole form: submission validation and
//! schema linting.

pub mod validation;
pub mod lint;

pub use validation::{Submission, SubmissionValidator, ValidationReport, Violation};
pub use lint::{lint, SchemaWarning};
