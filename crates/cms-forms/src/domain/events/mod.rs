//! Domain Events
//!
//! Raised by the application service after each persisted change.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::EntityId;

/// Form lifecycle events
#[derive(Clone, Debug, PartialEq)]
pub enum FormEvent {
    Created {
        form_id: EntityId,
        name: String,
        created_at: DateTime<Utc>,
    },

    Replaced {
        form_id: EntityId,
        field_count: usize,
        replaced_at: DateTime<Utc>,
    },

    Deleted {
        form_id: EntityId,
        deleted_at: DateTime<Utc>,
    },
}

impl FormEvent {
    /// Get the form this event belongs to
    pub fn form_id(&self) -> &EntityId {
        match self {
            FormEvent::Created { form_id, .. } => form_id,
            FormEvent::Replaced { form_id, .. } => form_id,
            FormEvent::Deleted { form_id, .. } => form_id,
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            FormEvent::Created { .. } => "form.created",
            FormEvent::Replaced { .. } => "form.replaced",
            FormEvent::Deleted { .. } => "form.deleted",
        }
    }
}
