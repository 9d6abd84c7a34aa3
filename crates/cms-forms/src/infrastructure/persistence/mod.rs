//! Form repositories

mod json_file;

pub use json_file::JsonFileFormRepository;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::application::dto::FormSchema;
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::{FormRepository, RepositoryError};

/// In-memory form repository (for testing and development)
#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: DashMap<String, FormSchema>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn create(&self, form: &FormSchema) -> Result<(), RepositoryError> {
        match self.forms.entry(form.id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(form.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(form.clone());
                Ok(())
            }
        }
    }

    async fn replace(&self, form: &FormSchema) -> Result<(), RepositoryError> {
        match self.forms.get_mut(&form.id) {
            Some(mut stored) => {
                *stored = form.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(form.id.clone())),
        }
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormSchema>, RepositoryError> {
        Ok(self.forms.get(id.as_str()).map(|f| f.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<FormSchema>, RepositoryError> {
        Ok(self.forms.iter().map(|f| f.value().clone()).collect())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        self.forms
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}
