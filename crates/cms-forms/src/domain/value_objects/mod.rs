//! Value Objects module
//!
//! Immutable, validated domain primitives.

pub mod slug;
pub mod field_type;
pub mod option;

pub use slug::{slugify, Separator};
pub use field_type::{FieldType, PrimitiveKind};
pub use option::FieldOption;

/// Opaque identifier of a form
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn test_opaque_id_round_trips_as_str() {
        let id = EntityId::from_string("legacy-42");
        assert_eq!(id.as_str(), "legacy-42");
        assert_eq!(id.to_string(), "legacy-42");
    }
}
