//! Output formatting

use clap::ValueEnum;
use cms_forms::{Form, FormSchema, SchemaWarning, ValidationReport};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct FormRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Fields")]
    fields: usize,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "#")]
    order: u32,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    field_type: String,
    #[tabled(rename = "Required")]
    required: bool,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Options")]
    options: String,
}

impl OutputFormat {
    pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(data)?);
        Ok(())
    }

    pub fn print_forms(&self, forms: &[Form]) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => {
                let schemas: Vec<FormSchema> = forms.iter().map(FormSchema::from).collect();
                Self::print_json(&schemas)
            }
            OutputFormat::Table => {
                let rows = forms.iter().map(|f| FormRow {
                    id: f.id().to_string(),
                    name: f.name().to_string(),
                    slug: f.slug().to_string(),
                    active: f.is_active(),
                    fields: f.fields().len(),
                });
                println!("{}", Table::new(rows));
                Ok(())
            }
        }
    }

    pub fn print_form(&self, form: &Form) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => Self::print_json(&FormSchema::from(form)),
            OutputFormat::Table => {
                println!("{} ({})", form.name(), form.id());
                println!("slug: {}  active: {}", form.slug(), form.is_active());
                if let Some(description) = form.description() {
                    println!("{}", description);
                }
                let rows = form.fields().iter().map(|f| FieldRow {
                    order: f.order(),
                    label: f.label().to_string(),
                    name: f.name().to_string(),
                    field_type: f.field_type().to_string(),
                    required: f.is_required(),
                    active: f.is_active(),
                    options: f.options().iter().map(|o| o.value()).collect::<Vec<_>>().join(", "),
                });
                println!("{}", Table::new(rows));
                Ok(())
            }
        }
    }

    pub fn print_warnings(&self, warnings: &[SchemaWarning]) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => Self::print_json(&warnings),
            OutputFormat::Table => {
                if warnings.is_empty() {
                    println!("no warnings");
                }
                for warning in warnings {
                    println!("warning: {}", warning);
                }
                Ok(())
            }
        }
    }

    pub fn print_report(&self, report: &ValidationReport) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => Self::print_json(report),
            OutputFormat::Table => {
                if report.is_valid() {
                    println!("submission is valid");
                }
                for violation in report.violations() {
                    println!("{}: {}", violation.field_name(), violation);
                }
                Ok(())
            }
        }
    }
}
