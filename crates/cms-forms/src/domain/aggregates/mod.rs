//! Aggregates module

pub mod field;
pub mod form;

pub use field::{FieldPatch, FormField};
pub use form::{Form, MoveDirection};
