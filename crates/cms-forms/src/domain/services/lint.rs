//! Schema lint
//!
//! Problems an operator should see before publishing a form that do not
//! make the schema unusable.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::domain::aggregates::Form;

/// Non-blocking schema problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaWarning {
    /// Field with a blank label (and so a blank name)
    EmptyFieldLabel { index: usize },
    /// Choice field that renders no choices
    ChoiceFieldWithoutOptions { name: String },
    /// Option with a blank label
    EmptyOptionLabel { name: String, index: usize },
    /// Two options of one field collapse to the same value
    DuplicateOptionValue { name: String, value: String },
    /// Two fields share a submission key
    DuplicateFieldName { name: String },
}

impl SchemaWarning {
    /// Whether this warning is about colliding option values
    pub fn is_duplicate_option_value(&self) -> bool {
        matches!(self, Self::DuplicateOptionValue { .. })
    }
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFieldLabel { index } => write!(f, "field #{} has no label", index),
            Self::ChoiceFieldWithoutOptions { name } => write!(f, "choice field '{}' has no options", name),
            Self::EmptyOptionLabel { name, index } => write!(f, "option #{} of field '{}' has no label", index, name),
            Self::DuplicateOptionValue { name, value } => {
                write!(f, "field '{}' has more than one option with value '{}'", name, value)
            }
            Self::DuplicateFieldName { name } => write!(f, "more than one field is named '{}'", name),
        }
    }
}

/// Collect every warning for `form`, in field order
pub fn lint(form: &Form) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();
    let mut seen_names = HashSet::new();
    let mut reported_names = HashSet::new();

    for (index, field) in form.fields().iter().enumerate() {
        if field.label().trim().is_empty() {
            warnings.push(SchemaWarning::EmptyFieldLabel { index });
        } else if !seen_names.insert(field.name()) && reported_names.insert(field.name()) {
            warnings.push(SchemaWarning::DuplicateFieldName { name: field.name().to_string() });
        }

        if !field.field_type().is_choice() {
            continue;
        }
        if field.options().is_empty() {
            warnings.push(SchemaWarning::ChoiceFieldWithoutOptions { name: field.name().to_string() });
        }

        let mut seen_values = HashSet::new();
        let mut reported_values = HashSet::new();
        for (option_index, option) in field.options().iter().enumerate() {
            if option.label().trim().is_empty() {
                warnings.push(SchemaWarning::EmptyOptionLabel {
                    name: field.name().to_string(),
                    index: option_index,
                });
                continue;
            }
            if !seen_values.insert(option.value()) && reported_values.insert(option.value()) {
                warnings.push(SchemaWarning::DuplicateOptionValue {
                    name: field.name().to_string(),
                    value: option.value().to_string(),
                });
            }
        }
    }

    warnings
}
