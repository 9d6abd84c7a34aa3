//! Form commands

use std::path::Path;

use anyhow::Context as _;
use cms_forms::{CreateFormCommand, EntityId, FormSchema, FormUseCases};

use super::Context;
use crate::FormCommands;

pub async fn handle(action: FormCommands, ctx: &Context) -> anyhow::Result<()> {
    match action {
        FormCommands::List { active } => {
            let forms = if active {
                ctx.service.list_active_forms().await?
            } else {
                ctx.service.list_forms().await?
            };
            ctx.format.print_forms(&forms)
        }
        FormCommands::Show { id } => {
            let form = ctx.open_form(&id).await?;
            ctx.format.print_form(&form)
        }
        FormCommands::Create { name, slug, description, image, inactive } => {
            let command = CreateFormCommand {
                name,
                slug,
                description,
                image,
                is_active: Some(!inactive),
            };
            let form = ctx.service.create_form(command).await?;
            ctx.format.print_form(&form)
        }
        FormCommands::Update { id, name, slug, description, image, active } => {
            let mut form = ctx.open_form(&id).await?;
            if let Some(name) = name {
                form.set_name(name)?;
            }
            if let Some(slug) = slug {
                form.set_slug(slug);
            }
            if let Some(description) = description {
                form.set_description(non_empty(description));
            }
            if let Some(image) = image {
                form.set_image(non_empty(image));
            }
            if let Some(active) = active {
                form.set_active(active);
            }
            ctx.save_and_show(&form).await
        }
        FormCommands::Delete { id } => {
            ctx.service.delete_form(&EntityId::from_string(&id)).await?;
            println!("deleted form {}", id);
            Ok(())
        }
        FormCommands::Import { file } => {
            let schema = read_schema(&file)?;
            let form = ctx.service.import_form(schema).await?;
            ctx.format.print_form(&form)
        }
        FormCommands::Export { id } => {
            let form = ctx.open_form(&id).await?;
            println!("{}", FormSchema::from(&form).to_json_pretty()?);
            Ok(())
        }
        FormCommands::Lint { id } => {
            let form = ctx.open_form(&id).await?;
            ctx.format.print_warnings(&form.lint())
        }
    }
}

/// An empty flag value clears the attribute
fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn read_schema(path: &Path) -> anyhow::Result<FormSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    FormSchema::from_json(&content).with_context(|| format!("parsing {}", path.display()))
}
