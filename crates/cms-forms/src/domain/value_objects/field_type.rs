//! Field Type Registry
//!
//! The closed set of supported field kinds and the rules each kind implies:
//! whether it carries options, which primitive a submission produces and
//! what "required" means for it.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// Supported field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Number,
    Date,
    Select,
    Textarea,
    Checkbox,
    Radio,
}

/// Primitive value a field produces on submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Date,
}

impl FieldType {
    /// Every registered kind, in display order
    pub const ALL: [FieldType; 8] = [
        Self::Text,
        Self::Email,
        Self::Number,
        Self::Date,
        Self::Select,
        Self::Textarea,
        Self::Checkbox,
        Self::Radio,
    ];

    /// Stable wire tag
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
        }
    }

    /// Whether the field takes its value from an option set
    pub const fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }

    /// Primitive produced on submission. Choice fields submit one of their
    /// option values, which are strings.
    pub const fn primitive_kind(&self) -> PrimitiveKind {
        match self {
            Self::Text | Self::Email | Self::Textarea | Self::Select | Self::Radio => PrimitiveKind::String,
            Self::Number => PrimitiveKind::Number,
            Self::Date => PrimitiveKind::Date,
            Self::Checkbox => PrimitiveKind::Boolean,
        }
    }

    /// Whether a placeholder hint is rendered for this kind
    pub const fn accepts_placeholder(&self) -> bool {
        matches!(self, Self::Text | Self::Email | Self::Number | Self::Textarea)
    }

    /// Required-ness check for a raw submitted value.
    ///
    /// A checkbox is satisfied only when checked; every other kind is
    /// satisfied by a non-empty value.
    pub fn validate_required(&self, raw: Option<&Value>) -> bool {
        match self {
            Self::Checkbox => is_checked(raw),
            _ => is_filled(raw),
        }
    }
}

/// `true`, or the string forms browsers send for a ticked box
fn is_checked(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::Bool(checked)) => *checked,
        Some(Value::String(s)) => matches!(s.trim(), "true" | "on"),
        _ => false,
    }
}

fn is_filled(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => true,
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| SchemaError::UnknownFieldType(tag.to_string()))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tags_round_trip() {
        for field_type in FieldType::ALL {
            assert_eq!(field_type.as_str().parse::<FieldType>().unwrap(), field_type);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "phone".parse::<FieldType>().unwrap_err();
        assert!(matches!(err, SchemaError::UnknownFieldType(ref t) if t == "phone"));
        // Tags are case sensitive; nothing is coerced to text
        assert!("Text".parse::<FieldType>().is_err());
        assert!("".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_choice_types() {
        let choice: Vec<_> = FieldType::ALL.into_iter().filter(FieldType::is_choice).collect();
        assert_eq!(choice, vec![FieldType::Select, FieldType::Radio]);
    }

    #[test]
    fn test_primitive_kinds() {
        assert_eq!(FieldType::Number.primitive_kind(), PrimitiveKind::Number);
        assert_eq!(FieldType::Checkbox.primitive_kind(), PrimitiveKind::Boolean);
        assert_eq!(FieldType::Date.primitive_kind(), PrimitiveKind::Date);
        assert_eq!(FieldType::Radio.primitive_kind(), PrimitiveKind::String);
    }

    #[test]
    fn test_checkbox_required_means_checked() {
        let t = FieldType::Checkbox;
        assert!(t.validate_required(Some(&json!(true))));
        assert!(t.validate_required(Some(&json!("on"))));
        assert!(!t.validate_required(Some(&json!(false))));
        assert!(!t.validate_required(Some(&json!("false"))));
        assert!(!t.validate_required(None));
    }

    #[test]
    fn test_required_means_non_empty() {
        let t = FieldType::Text;
        assert!(t.validate_required(Some(&json!("hello"))));
        assert!(t.validate_required(Some(&json!(0))));
        assert!(!t.validate_required(Some(&json!("   "))));
        assert!(!t.validate_required(Some(&Value::Null)));
        assert!(!t.validate_required(Some(&json!([]))));
        assert!(!t.validate_required(None));
    }
}
