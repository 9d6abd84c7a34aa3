//! Submission validation
//!
//! The contract the public rendering surface relies on: given a form and a
//! visitor submission keyed by field name, report every violation at once.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::aggregates::{Form, FormField};
use crate::domain::value_objects::{FieldType, PrimitiveKind};

/// Visitor submission, keyed by field name
pub type Submission = HashMap<String, Value>;

/// A single submission problem
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("required field '{name}' is missing")]
    MissingRequiredField { name: String },

    #[error("'{value}' is not an option of field '{name}'")]
    InvalidOptionValue { name: String, value: String },

    #[error("field '{name}' is not a valid {expected}")]
    TypeMismatch {
        name: String,
        expected: FieldType,
        /// Primitive kind of `expected`, for consumers that only know kinds
        expected_kind: PrimitiveKind,
    },
}

impl Violation {
    pub fn type_mismatch(name: impl Into<String>, expected: FieldType) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected,
            expected_kind: expected.primitive_kind(),
        }
    }

    /// Field the violation refers to
    pub fn field_name(&self) -> &str {
        match self {
            Self::MissingRequiredField { name } => name,
            Self::InvalidOptionValue { name, .. } => name,
            Self::TypeMismatch { name, .. } => name,
        }
    }
}

/// Complete validation outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Validates submissions against a form schema.
///
/// Pure and total: never mutates its inputs, and checks every active field
/// even after the first failure.
pub struct SubmissionValidator;

impl SubmissionValidator {
    pub fn validate(form: &Form, submission: &Submission) -> ValidationReport {
        let violations = form
            .active_fields()
            .filter_map(|field| Self::check_field(field, submission.get(field.name())))
            .collect();
        ValidationReport { violations }
    }

    fn check_field(field: &FormField, raw: Option<&Value>) -> Option<Violation> {
        let field_type = field.field_type();
        let name = || field.name().to_string();

        if field.is_required() && !field_type.validate_required(raw) {
            return Some(Violation::MissingRequiredField { name: name() });
        }

        // Optional and left blank: nothing further to check
        let raw = raw.filter(|v| !is_blank(v))?;

        if field_type.is_choice() {
            let value = choice_value(raw);
            if !field.has_option_value(&value) {
                return Some(Violation::InvalidOptionValue { name: name(), value });
            }
            return None;
        }

        let parses = match field_type {
            FieldType::Email => raw.as_str().is_some_and(is_valid_email),
            FieldType::Number => is_number(raw),
            FieldType::Date => raw.as_str().is_some_and(is_date),
            _ => true,
        };
        (!parses).then(|| Violation::type_mismatch(name(), field_type))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// String rendering used to compare against option values
fn choice_value(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_number(raw: &Value) -> bool {
    match raw {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

fn is_date(raw: &str) -> bool {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").is_ok()
}

/// local@domain.tld with non-empty parts
fn is_valid_email(raw: &str) -> bool {
    let raw = raw.trim();
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
