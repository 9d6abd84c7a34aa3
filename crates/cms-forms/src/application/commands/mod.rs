//! Command handlers
//!
//! Application service that orchestrates form use cases.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::application::dto::{CreateFormCommand, FormSchema};
use crate::config::FormsConfig;
use crate::domain::aggregates::Form;
use crate::domain::events::FormEvent;
use crate::domain::services::{SchemaWarning, Submission, ValidationReport};
use crate::domain::value_objects::EntityId;
use crate::error::SchemaError;
use crate::ports::inbound::{FormUseCases, UseCaseError};
use crate::ports::outbound::{EventPublisher, FormRepository, RepositoryError};

/// Form application service
pub struct FormService {
    form_repo: Arc<dyn FormRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    preserve_field_name_overrides: bool,
    reject_duplicate_option_values: bool,
}

impl FormService {
    pub fn new(
        form_repo: Arc<dyn FormRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            form_repo,
            event_publisher,
            preserve_field_name_overrides: false,
            reject_duplicate_option_values: false,
        }
    }

    /// Apply the editing policies from configuration
    pub fn with_config(mut self, config: &FormsConfig) -> Self {
        self.preserve_field_name_overrides = config.preserve_field_name_overrides;
        self.reject_duplicate_option_values = config.reject_duplicate_option_values;
        self
    }

    async fn load(&self, id: &EntityId) -> Result<Form, UseCaseError> {
        let schema = self.form_repo.find_by_id(id).await?
            .ok_or_else(|| UseCaseError::NotFound(id.to_string()))?;
        Ok(Form::try_from(schema)?)
    }

    fn begin_session(&self, mut form: Form) -> Form {
        form.preserve_field_name_overrides(self.preserve_field_name_overrides);
        form
    }

    fn check_saveable(&self, form: &Form) -> Result<(), UseCaseError> {
        if form.name().trim().is_empty() {
            return Err(SchemaError::EmptyName.into());
        }

        let warnings = form.lint();
        for warning in &warnings {
            warn!(form_id = %form.id(), "{}", warning);
        }

        if self.reject_duplicate_option_values {
            let duplicates: Vec<SchemaWarning> = warnings
                .into_iter()
                .filter(SchemaWarning::is_duplicate_option_value)
                .collect();
            if !duplicates.is_empty() {
                return Err(UseCaseError::Lint(duplicates));
            }
        }
        Ok(())
    }

    async fn store_new(&self, form: Form) -> Result<Form, UseCaseError> {
        self.check_saveable(&form)?;

        self.form_repo.create(&FormSchema::from(&form)).await?;
        info!(form_id = %form.id(), name = form.name(), "form created");

        self.event_publisher.publish(vec![FormEvent::Created {
            form_id: form.id().clone(),
            name: form.name().to_string(),
            created_at: form.created_at(),
        }]).await?;

        Ok(self.begin_session(form))
    }
}

fn not_found(id: &EntityId) -> impl FnOnce(RepositoryError) -> UseCaseError + '_ {
    move |e| match e {
        RepositoryError::NotFound(_) => UseCaseError::NotFound(id.to_string()),
        other => other.into(),
    }
}

#[async_trait]
impl FormUseCases for FormService {
    async fn create_form(&self, command: CreateFormCommand) -> Result<Form, UseCaseError> {
        let mut form = Form::create(command.name)?;

        if let Some(slug) = command.slug {
            form.set_slug(slug);
        }
        if command.description.is_some() {
            form.set_description(command.description);
        }
        if command.image.is_some() {
            form.set_image(command.image);
        }
        if let Some(is_active) = command.is_active {
            form.set_active(is_active);
        }

        self.store_new(form).await
    }

    async fn import_form(&self, schema: FormSchema) -> Result<Form, UseCaseError> {
        let form = Form::try_from(schema)?;
        self.store_new(form).await
    }

    async fn open_form(&self, id: &EntityId) -> Result<Form, UseCaseError> {
        let form = self.load(id).await?;
        Ok(self.begin_session(form))
    }

    async fn save_form(&self, form: &Form) -> Result<(), UseCaseError> {
        self.check_saveable(form)?;

        self.form_repo.replace(&FormSchema::from(form)).await
            .map_err(not_found(form.id()))?;
        info!(form_id = %form.id(), fields = form.fields().len(), "form replaced");

        self.event_publisher.publish(vec![FormEvent::Replaced {
            form_id: form.id().clone(),
            field_count: form.fields().len(),
            replaced_at: Utc::now(),
        }]).await?;

        Ok(())
    }

    async fn get_form(&self, id: &EntityId) -> Result<Option<Form>, UseCaseError> {
        match self.form_repo.find_by_id(id).await? {
            Some(schema) => Ok(Some(Form::try_from(schema)?)),
            None => Ok(None),
        }
    }

    async fn list_forms(&self) -> Result<Vec<Form>, UseCaseError> {
        let mut forms: Vec<Form> = self.form_repo.find_all().await?
            .into_iter()
            .filter_map(|schema| {
                let id = schema.id.clone();
                Form::try_from(schema)
                    .map_err(|e| error!(form_id = %id, error = %e, "skipping unreadable form"))
                    .ok()
            })
            .collect();
        forms.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        Ok(forms)
    }

    async fn list_active_forms(&self) -> Result<Vec<Form>, UseCaseError> {
        let mut forms = self.list_forms().await?;
        forms.retain(Form::is_active);
        Ok(forms)
    }

    async fn delete_form(&self, id: &EntityId) -> Result<(), UseCaseError> {
        self.form_repo.delete(id).await.map_err(not_found(id))?;
        info!(form_id = %id, "form deleted");

        self.event_publisher.publish(vec![FormEvent::Deleted {
            form_id: id.clone(),
            deleted_at: Utc::now(),
        }]).await?;

        Ok(())
    }

    async fn validate_submission(&self, id: &EntityId, submission: &Submission) -> Result<ValidationReport, UseCaseError> {
        let form = self.load(id).await?;
        if !form.is_active() {
            return Err(UseCaseError::Inactive(id.to_string()));
        }
        Ok(form.validate(submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::FieldPatch;
    use crate::domain::value_objects::FieldType;
    use crate::infrastructure::{InMemoryFormRepository, JsonFileFormRepository, NoOpEventPublisher};
    use crate::infrastructure::events::RecordingEventPublisher;
    use serde_json::json;

    fn service() -> (FormService, Arc<RecordingEventPublisher>) {
        let events = Arc::new(RecordingEventPublisher::default());
        let service = FormService::new(Arc::new(InMemoryFormRepository::new()), events.clone());
        (service, events)
    }

    async fn json_service(root: &std::path::Path, config: &FormsConfig) -> FormService {
        let repo = JsonFileFormRepository::open(root).await.unwrap();
        FormService::new(Arc::new(repo), Arc::new(NoOpEventPublisher)).with_config(config)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, events) = service();
        let form = service.create_form(CreateFormCommand::named("Contact Form")).await.unwrap();
        assert_eq!(form.slug(), "contact-form");

        let found = service.get_form(form.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "Contact Form");

        let published = events.take();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].event_type(), "form.created");
    }

    #[tokio::test]
    async fn test_create_with_manual_slug() {
        let (service, _) = service();
        let command = CreateFormCommand {
            slug: Some("talk-to-us".into()),
            is_active: Some(false),
            ..CreateFormCommand::named("Contact Form")
        };
        let form = service.create_form(command).await.unwrap();
        assert_eq!(form.slug(), "talk-to-us");
        assert!(!form.is_active());
    }

    #[tokio::test]
    async fn test_edit_session_round_trip() {
        let (service, events) = service();
        let created = service.create_form(CreateFormCommand::named("Careers")).await.unwrap();

        let mut form = service.open_form(created.id()).await.unwrap();
        form.add_field_with(FieldPatch::new().label("Full Name").required(true));
        form.add_field_with(FieldPatch::new().label("Email").field_type(FieldType::Email));
        form.move_field(1, crate::MoveDirection::Up);
        service.save_form(&form).await.unwrap();

        let reloaded = service.open_form(created.id()).await.unwrap();
        let names: Vec<_> = reloaded.fields().iter().map(|f| (f.name(), f.order())).collect();
        assert_eq!(names, vec![("email", 0), ("full_name", 1)]);
        assert_eq!(events.take().last().map(FormEvent::event_type), Some("form.replaced"));
    }

    #[tokio::test]
    async fn test_save_unknown_form_is_not_found() {
        let (service, _) = service();
        let form = Form::create("Never Stored").unwrap();
        let err = service.save_form(&form).await.unwrap_err();
        assert!(matches!(err, UseCaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let (service, _) = service();
        let mut form = service.create_form(CreateFormCommand::named("Gallery Feedback")).await.unwrap();
        form.add_field_with(FieldPatch::new().label("Rating").field_type(FieldType::Radio));
        service.save_form(&form).await.unwrap();

        service.delete_form(form.id()).await.unwrap();
        assert!(service.get_form(form.id()).await.unwrap().is_none());
        assert!(matches!(service.delete_form(form.id()).await, Err(UseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_inactive_forms_hidden_from_public() {
        let (service, _) = service();
        let live = service.create_form(CreateFormCommand::named("Live")).await.unwrap();
        let command = CreateFormCommand { is_active: Some(false), ..CreateFormCommand::named("Draft") };
        let draft = service.create_form(command).await.unwrap();

        let all = service.list_forms().await.unwrap();
        assert_eq!(all.len(), 2);
        let active = service.list_active_forms().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id(), live.id());

        let err = service.validate_submission(draft.id(), &Submission::new()).await.unwrap_err();
        assert!(matches!(err, UseCaseError::Inactive(_)));
    }

    #[tokio::test]
    async fn test_duplicate_option_values_rejected_when_configured() {
        let config = FormsConfig { reject_duplicate_option_values: true, ..FormsConfig::default() };
        let service = FormService::new(Arc::new(InMemoryFormRepository::new()), Arc::new(NoOpEventPublisher))
            .with_config(&config);

        let mut form = service.create_form(CreateFormCommand::named("Survey")).await.unwrap();
        let f = form.add_field_with(FieldPatch::new().label("Answer").field_type(FieldType::Select));
        for label in ["Yes", "yes"] {
            let o = form.add_option(f);
            form.update_option_label(f, o, label);
        }

        let err = service.save_form(&form).await.unwrap_err();
        assert!(matches!(err, UseCaseError::Lint(ref w) if w.len() == 1));
    }

    #[tokio::test]
    async fn test_duplicate_option_values_accepted_by_default() {
        let (service, _) = service();
        let mut form = service.create_form(CreateFormCommand::named("Survey")).await.unwrap();
        let f = form.add_field_with(FieldPatch::new().label("Answer").field_type(FieldType::Select));
        for label in ["Yes", "yes"] {
            let o = form.add_option(f);
            form.update_option_label(f, o, label);
        }
        service.save_form(&form).await.unwrap();
    }

    #[tokio::test]
    async fn test_open_applies_name_policy() {
        let config = FormsConfig { preserve_field_name_overrides: true, ..FormsConfig::default() };
        let service = FormService::new(Arc::new(InMemoryFormRepository::new()), Arc::new(NoOpEventPublisher))
            .with_config(&config);

        let created = service.create_form(CreateFormCommand::named("Enquiry")).await.unwrap();
        let mut form = service.open_form(created.id()).await.unwrap();
        let f = form.add_field_with(FieldPatch::new().label("Phone").name("mobile"));
        form.update_field(f, FieldPatch::new().label("Phone Number"));
        assert_eq!(form.fields()[f].name(), "mobile");
    }

    #[tokio::test]
    async fn test_name_override_survives_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormsConfig { preserve_field_name_overrides: true, ..FormsConfig::default() };

        let service = json_service(dir.path(), &config).await;
        let created = service.create_form(CreateFormCommand::named("Enquiry")).await.unwrap();
        let mut form = service.open_form(created.id()).await.unwrap();
        let f = form.add_field_with(FieldPatch::new().label("Phone"));
        form.update_field(f, FieldPatch::new().name("mobile"));
        service.save_form(&form).await.unwrap();

        let service = json_service(dir.path(), &config).await;
        let mut form = service.open_form(created.id()).await.unwrap();
        form.update_field(f, FieldPatch::new().label("Phone Number"));
        service.save_form(&form).await.unwrap();

        let reloaded = service.open_form(created.id()).await.unwrap();
        assert_eq!(reloaded.fields()[f].label(), "Phone Number");
        assert_eq!(reloaded.fields()[f].name(), "mobile");
    }

    #[tokio::test]
    async fn test_unreadable_documents_skipped_in_listing() {
        let repo = Arc::new(InMemoryFormRepository::new());
        let service = FormService::new(repo.clone(), Arc::new(NoOpEventPublisher));
        service.create_form(CreateFormCommand::named("Good")).await.unwrap();

        let broken: FormSchema = serde_json::from_value(json!({
            "id": "broken",
            "name": "Broken",
            "fields": [ { "label": "Phone", "type": "tel" } ]
        })).unwrap();
        repo.create(&broken).await.unwrap();

        let forms = service.list_forms().await.unwrap();
        assert_eq!(forms.len(), 1);
        assert!(matches!(
            service.open_form(&EntityId::from_string("broken")).await,
            Err(UseCaseError::Schema(SchemaError::UnknownFieldType(_)))
        ));
    }

    #[tokio::test]
    async fn test_import_rejects_blank_name() {
        let (service, _) = service();
        let schema: FormSchema = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(matches!(
            service.import_form(schema).await,
            Err(UseCaseError::Schema(SchemaError::EmptyName))
        ));
    }
}
