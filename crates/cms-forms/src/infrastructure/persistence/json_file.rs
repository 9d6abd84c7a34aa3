//! JSON document store
//!
//! One pretty-printed `<id>.json` document per form inside a directory.
//! Writes go through a temporary file and a rename so a reader never sees a
//! half-written document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::application::dto::FormSchema;
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::{FormRepository, RepositoryError};

/// File-backed form repository
pub struct JsonFileFormRepository {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileFormRepository {
    /// Open (creating if needed) a store rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "opened form store");
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, RepositoryError> {
        let valid = !id.is_empty()
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::Storage(format!("invalid form id for file store: {:?}", id)));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }

    async fn write_document(&self, path: &Path, form: &FormSchema) -> Result<(), RepositoryError> {
        let body = serde_json::to_vec_pretty(form)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, body).await?;
        fs::rename(&staging, path).await?;
        Ok(())
    }

    async fn read_document(path: &Path) -> Result<Option<FormSchema>, RepositoryError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl FormRepository for JsonFileFormRepository {
    async fn create(&self, form: &FormSchema) -> Result<(), RepositoryError> {
        let path = self.path_for(&form.id)?;
        let _guard = self.write_lock.lock().await;
        if fs::try_exists(&path).await? {
            return Err(RepositoryError::Conflict(form.id.clone()));
        }
        self.write_document(&path, form).await
    }

    async fn replace(&self, form: &FormSchema) -> Result<(), RepositoryError> {
        let path = self.path_for(&form.id)?;
        let _guard = self.write_lock.lock().await;
        if !fs::try_exists(&path).await? {
            return Err(RepositoryError::NotFound(form.id.clone()));
        }
        self.write_document(&path, form).await
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormSchema>, RepositoryError> {
        let path = self.path_for(id.as_str())?;
        Self::read_document(&path).await
    }

    async fn find_all(&self) -> Result<Vec<FormSchema>, RepositoryError> {
        let mut forms = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_document(&path).await {
                Ok(Some(form)) => forms.push(form),
                Ok(None) => {}
                Err(RepositoryError::Serialization(e)) => {
                    error!(path = %path.display(), error = %e, "skipping unreadable form document");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(forms)
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        let path = self.path_for(id.as_str())?;
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RepositoryError::NotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
