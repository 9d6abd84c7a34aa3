//! Transport Contract
//!
//! The shape exchanged with the persistence boundary and with the public
//! rendering surface. Scalars keep their primitive JSON types; option sets
//! are inlined into their fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::aggregates::{Form, FormField};
use crate::domain::value_objects::{slugify, EntityId, FieldOption, FieldType, Separator};
use crate::error::{SchemaError, SchemaResult};

// =============================================================================
// Schema documents
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub name: String,
    /// Field type tag; checked against the registry on load
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSchema>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSchema {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

fn default_true() -> bool {
    true
}

impl FormSchema {
    /// Decode a schema document
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as pretty-printed JSON
    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =============================================================================
// Form <-> FormSchema
// =============================================================================

impl From<&Form> for FormSchema {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id().to_string(),
            name: form.name().to_string(),
            slug: form.slug().to_string(),
            description: form.description().map(String::from),
            image: form.image().map(String::from),
            is_active: form.is_active(),
            fields: form.fields().iter().map(FieldSchema::from).collect(),
            created_at: Some(form.created_at()),
            updated_at: Some(form.updated_at()),
        }
    }
}

impl From<&FormField> for FieldSchema {
    fn from(field: &FormField) -> Self {
        let options = if field.field_type().is_choice() {
            field.options().iter().map(OptionSchema::from).collect()
        } else {
            Vec::new()
        };
        Self {
            label: field.label().to_string(),
            name: field.name().to_string(),
            field_type: field.field_type().as_str().to_string(),
            placeholder: field.placeholder().map(String::from),
            required: field.is_required(),
            is_active: field.is_active(),
            order: field.order(),
            options,
        }
    }
}

impl From<&FieldOption> for OptionSchema {
    fn from(option: &FieldOption) -> Self {
        Self {
            label: option.label().to_string(),
            value: option.value().to_string(),
        }
    }
}

impl TryFrom<FormSchema> for Form {
    type Error = SchemaError;

    /// Load a stored schema.
    ///
    /// Any unknown field type fails the whole load. Fields are stable-sorted
    /// by their stored `order` and renumbered, so a document with gaps or
    /// duplicate ordinals still yields a dense sequence.
    fn try_from(schema: FormSchema) -> Result<Self, Self::Error> {
        if schema.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }

        let id = if schema.id.trim().is_empty() {
            EntityId::new()
        } else {
            EntityId::from_string(schema.id)
        };
        let slug = if schema.slug.trim().is_empty() {
            slugify(&schema.name, Separator::Hyphen)
        } else {
            schema.slug
        };

        let mut stored = schema.fields;
        let dense = stored.iter().enumerate().all(|(i, f)| f.order as usize == i);
        if !dense {
            warn!(form_id = %id, "stored field order is not contiguous, renumbering");
            stored.sort_by_key(|f| f.order);
        }

        let fields = stored
            .into_iter()
            .map(|f| field_from_schema(&id, f))
            .collect::<Result<Vec<_>, _>>()?;

        let now = Utc::now();
        let created_at = schema.created_at.unwrap_or(now);
        Ok(Form::restore(
            id,
            schema.name,
            slug,
            schema.description,
            schema.image,
            schema.is_active,
            fields,
            created_at,
            schema.updated_at.unwrap_or(created_at),
        ))
    }
}

fn field_from_schema(form_id: &EntityId, schema: FieldSchema) -> Result<FormField, SchemaError> {
    let field_type: FieldType = schema.field_type.parse()?;

    let name = if schema.name.trim().is_empty() {
        slugify(&schema.label, Separator::Underscore)
    } else {
        schema.name
    };

    let options = if field_type.is_choice() {
        schema.options.into_iter().map(option_from_schema).collect()
    } else {
        if !schema.options.is_empty() {
            warn!(
                form_id = %form_id,
                field = %name,
                field_type = %field_type,
                dropped = schema.options.len(),
                "dropping options on non-choice field"
            );
        }
        Vec::new()
    };

    Ok(FormField::restore(
        schema.label,
        name,
        field_type,
        schema.placeholder,
        schema.required,
        schema.is_active,
        schema.order,
        options,
    ))
}

fn option_from_schema(schema: OptionSchema) -> FieldOption {
    if schema.value.is_empty() {
        FieldOption::new(schema.label)
    } else {
        FieldOption::from_parts(schema.label, schema.value)
    }
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateFormCommand {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateFormCommand {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
