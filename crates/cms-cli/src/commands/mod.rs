//! CLI Commands

pub mod config;
pub mod fields;
pub mod forms;
pub mod options;
pub mod validate;

use std::sync::Arc;

use anyhow::{bail, Context as _};
use cms_forms::{
    EntityId, Form, FormService, FormUseCases, FormsConfig, JsonFileFormRepository, TracingEventPublisher,
};

use crate::output::OutputFormat;

/// Everything a command needs: the service over the configured store
pub struct Context {
    pub service: FormService,
    pub format: OutputFormat,
}

impl Context {
    pub async fn open(config: FormsConfig, format: OutputFormat) -> anyhow::Result<Self> {
        let repo = JsonFileFormRepository::open(config.data_dir.clone())
            .await
            .with_context(|| format!("opening form store at {}", config.data_dir.display()))?;
        let service = FormService::new(Arc::new(repo), Arc::new(TracingEventPublisher)).with_config(&config);
        Ok(Self { service, format })
    }

    /// Start an edit session on a stored form
    pub async fn open_form(&self, id: &str) -> anyhow::Result<Form> {
        Ok(self.service.open_form(&EntityId::from_string(id)).await?)
    }

    /// Save an edit session and show the result
    pub async fn save_and_show(&self, form: &Form) -> anyhow::Result<()> {
        self.service.save_form(form).await?;
        self.format.print_form(form)
    }
}

/// The engine treats a stale index as a defect, so user input is checked here
pub fn check_field_index(form: &Form, index: usize) -> anyhow::Result<()> {
    if index >= form.fields().len() {
        bail!("form '{}' has no field #{} ({} fields)", form.name(), index, form.fields().len());
    }
    Ok(())
}

pub fn check_option_index(form: &Form, field_index: usize, option_index: usize) -> anyhow::Result<()> {
    check_field_index(form, field_index)?;
    let field = &form.fields()[field_index];
    if option_index >= field.options().len() {
        bail!("field '{}' has no option #{} ({} options)", field.name(), option_index, field.options().len());
    }
    Ok(())
}
