//! Option Set Model
//!
//! Label/value pairs attached to choice fields.

use super::slug::{slugify, Separator};

/// One selectable choice of a `select` or `radio` field.
///
/// The value is derived from the label on every label edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldOption {
    label: String,
    value: String,
}

impl FieldOption {
    /// Create an option, deriving its value from the label
    pub fn new(label: impl Into<String>) -> Self {
        let mut option = Self::default();
        option.set_label(label);
        option
    }

    /// Restore a stored option verbatim
    pub(crate) fn from_parts(label: String, value: String) -> Self {
        Self { label, value }
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn value(&self) -> &str { &self.value }

    /// Replace the label and re-derive the value
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.value = slugify(&self.label, Separator::Underscore);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_derived_from_label() {
        let option = FieldOption::new("North India");
        assert_eq!(option.label(), "North India");
        assert_eq!(option.value(), "north_india");
    }

    #[test]
    fn test_relabel_rederives_value() {
        let mut option = FieldOption::new("UK");
        option.set_label("United Kingdom");
        assert_eq!(option.value(), "united_kingdom");
    }

    #[test]
    fn test_default_is_blank() {
        let option = FieldOption::default();
        assert_eq!(option.label(), "");
        assert_eq!(option.value(), "");
    }
}
