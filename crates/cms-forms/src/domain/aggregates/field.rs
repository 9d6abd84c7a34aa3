//! Field entity
//!
//! A single typed, orderable input definition inside a [`Form`](super::Form).

use crate::domain::value_objects::{slugify, FieldOption, FieldType, Separator};

/// Form field entity
///
/// # Invariants
/// - `name` is derived from `label` unless an override is being preserved
/// - `options` is empty for non-choice types
/// - `order` is owned by the containing form
#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    label: String,
    name: String,
    field_type: FieldType,
    placeholder: Option<String>,
    required: bool,
    is_active: bool,
    order: u32,
    options: Vec<FieldOption>,
    // Set when the name was typed directly, or on load when the label would not produce it
    name_overridden: bool,
}

impl FormField {
    pub(crate) fn new(order: u32) -> Self {
        Self {
            label: String::new(),
            name: String::new(),
            field_type: FieldType::Text,
            placeholder: None,
            required: false,
            is_active: true,
            order,
            options: Vec::new(),
            name_overridden: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        label: String,
        name: String,
        field_type: FieldType,
        placeholder: Option<String>,
        required: bool,
        is_active: bool,
        order: u32,
        options: Vec<FieldOption>,
    ) -> Self {
        // A stored name that the label would not produce was typed by hand
        let name_overridden = name != slugify(&label, Separator::Underscore);
        Self {
            label,
            name,
            field_type,
            placeholder,
            required,
            is_active,
            order,
            options,
            name_overridden,
        }
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn name(&self) -> &str { &self.name }
    pub fn field_type(&self) -> FieldType { self.field_type }
    pub fn placeholder(&self) -> Option<&str> { self.placeholder.as_deref() }
    pub fn is_required(&self) -> bool { self.required }
    pub fn is_active(&self) -> bool { self.is_active }
    pub fn order(&self) -> u32 { self.order }
    pub fn options(&self) -> &[FieldOption] { &self.options }

    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    /// Apply a partial update.
    ///
    /// A new label re-derives `name`, except when `preserve_name_override`
    /// is set and the name was typed directly. An explicit `patch.name` wins
    /// over the derived one.
    pub fn apply(&mut self, patch: FieldPatch, preserve_name_override: bool) {
        if let Some(label) = patch.label {
            self.label = label;
            if !(preserve_name_override && self.name_overridden) {
                self.name = slugify(&self.label, Separator::Underscore);
                self.name_overridden = false;
            }
        }
        if let Some(name) = patch.name {
            self.name = slugify(&name, Separator::Underscore);
            self.name_overridden = true;
        }
        if let Some(field_type) = patch.field_type {
            self.field_type = field_type;
            if !field_type.is_choice() {
                self.options.clear();
            }
        }
        if let Some(placeholder) = patch.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    /// Append a blank option, returning its index
    pub fn add_option(&mut self) -> usize {
        assert!(
            self.field_type.is_choice(),
            "options added to non-choice field '{}' of type {}",
            self.name,
            self.field_type
        );
        self.options.push(FieldOption::default());
        self.options.len() - 1
    }

    /// Relabel the option at `index`, re-deriving its value
    pub fn update_option_label(&mut self, index: usize, label: impl Into<String>) {
        self.check_option_index(index);
        self.options[index].set_label(label);
    }

    /// Remove the option at `index`; later options shift up
    pub fn remove_option(&mut self, index: usize) -> FieldOption {
        self.check_option_index(index);
        self.options.remove(index)
    }

    /// Whether `value` equals one of this field's option values
    pub fn has_option_value(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value() == value)
    }

    fn check_option_index(&self, index: usize) {
        assert!(
            index < self.options.len(),
            "stale option index {} for field '{}' with {} options",
            index,
            self.name,
            self.options.len()
        );
    }
}

/// Partial update of a [`FormField`]
///
/// No `order`: only the form renumbers fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
    pub placeholder: Option<Option<String>>,
    pub required: Option<bool>,
    pub is_active: Option<bool>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
