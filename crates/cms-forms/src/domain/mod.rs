//! Domain module
//!
//! Form, field and option modelling plus the composition and validation rules.

pub mod aggregates;
pub mod value_objects;
pub mod events;
pub mod services;

pub use aggregates::*;
pub use value_objects::*;
pub use events::*;
pub use services::*;
