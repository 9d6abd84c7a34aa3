//! Form Aggregate
//!
//! Aggregate root of a form definition. Every structural mutation of the
//! field list goes through the composition operations here, which keep
//! field ordinals dense and matching list position.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::field::{FieldPatch, FormField};
use crate::domain::services::{lint, SchemaWarning, Submission, SubmissionValidator, ValidationReport};
use crate::domain::value_objects::{slugify, EntityId, FieldOption, Separator};
use crate::error::SchemaError;

/// Direction of a single-step field move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub const fn offset(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// Form aggregate root
///
/// # Invariants
/// - `fields[i].order() == i` after every operation
/// - `slug` follows `name` until the operator edits it directly
///
/// A `Form` value is an edit session: it is loaded, mutated in memory and
/// saved back whole. The slug and field-name override flags live only for
/// the lifetime of the value.
#[derive(Clone, Debug)]
pub struct Form {
    id: EntityId,
    name: String,
    slug: String,
    description: Option<String>,
    image: Option<String>,
    is_active: bool,
    fields: Vec<FormField>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    slug_overridden: bool,
    preserve_field_name_overrides: bool,
}

impl Form {
    /// Create an empty, active form
    pub fn create(name: impl Into<String>) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        let now = Utc::now();
        Ok(Self {
            id: EntityId::new(),
            slug: slugify(&name, Separator::Hyphen),
            name,
            description: None,
            image: None,
            is_active: true,
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
            slug_overridden: false,
            preserve_field_name_overrides: false,
        })
    }

    /// Rebuild a stored form. Fields are renumbered to their list position.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: EntityId,
        name: String,
        slug: String,
        description: Option<String>,
        image: Option<String>,
        is_active: bool,
        fields: Vec<FormField>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut form = Self {
            id,
            name,
            slug,
            description,
            image,
            is_active,
            fields,
            created_at,
            updated_at,
            slug_overridden: false,
            preserve_field_name_overrides: false,
        };
        form.renumber();
        form
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn slug(&self) -> &str { &self.slug }
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
    pub fn image(&self) -> Option<&str> { self.image.as_deref() }
    pub fn is_active(&self) -> bool { self.is_active }
    pub fn fields(&self) -> &[FormField] { &self.fields }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }
    pub fn is_slug_overridden(&self) -> bool { self.slug_overridden }

    /// Fields shown to visitors, in rendering order
    pub fn active_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().filter(|f| f.is_active())
    }

    /// Keep operator-typed field names across later label edits
    pub fn preserve_field_name_overrides(&mut self, preserve: bool) {
        self.preserve_field_name_overrides = preserve;
    }

    // =========================================================================
    // Form attributes
    // =========================================================================

    /// Rename; the slug follows unless it was edited directly.
    /// A blank name is refused and leaves the form untouched.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        self.name = name;
        if !self.slug_overridden {
            self.slug = slugify(&self.name, Separator::Hyphen);
        }
        self.touch();
        Ok(())
    }

    /// Set the slug by hand, normalized to a URL-safe identifier. A value
    /// with nothing URL-safe in it hands the slug back to the name.
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        let slug = slugify(&slug.into(), Separator::Hyphen);
        if slug.is_empty() {
            self.slug_overridden = false;
            self.slug = slugify(&self.name, Separator::Hyphen);
        } else {
            self.slug_overridden = true;
            self.slug = slug;
        }
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    /// Opaque asset handle, passed through untouched
    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
        self.touch();
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
        self.touch();
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append a blank text field, returning its index
    pub fn add_field(&mut self) -> usize {
        let index = self.fields.len();
        self.fields.push(FormField::new(index as u32));
        debug!(form_id = %self.id, index, "field added");
        self.touch();
        index
    }

    /// Append a field and apply `patch` to it in one step
    pub fn add_field_with(&mut self, patch: FieldPatch) -> usize {
        let index = self.add_field();
        self.update_field(index, patch);
        index
    }

    /// Apply a partial update to the field at `index`
    pub fn update_field(&mut self, index: usize, patch: FieldPatch) {
        self.check_field_index(index);
        self.fields[index].apply(patch, self.preserve_field_name_overrides);
        debug!(form_id = %self.id, index, name = self.fields[index].name(), "field updated");
        self.touch();
    }

    /// Remove the field at `index` and close the gap in the ordinals
    pub fn remove_field(&mut self, index: usize) -> FormField {
        self.check_field_index(index);
        let removed = self.fields.remove(index);
        self.renumber();
        debug!(form_id = %self.id, index, name = removed.name(), "field removed");
        self.touch();
        removed
    }

    /// Swap the field at `index` with its neighbour.
    ///
    /// Returns `false` without touching anything when the neighbour would
    /// fall outside the list.
    pub fn move_field(&mut self, index: usize, direction: MoveDirection) -> bool {
        self.check_field_index(index);
        let target = match index.checked_add_signed(direction.offset()) {
            Some(target) if target < self.fields.len() => target,
            _ => return false,
        };
        self.fields.swap(index, target);
        self.renumber();
        debug!(form_id = %self.id, from = index, to = target, "field moved");
        self.touch();
        true
    }

    /// Append a blank option to the choice field at `field_index`
    pub fn add_option(&mut self, field_index: usize) -> usize {
        self.check_field_index(field_index);
        let index = self.fields[field_index].add_option();
        self.touch();
        index
    }

    /// Relabel an option, re-deriving its value
    pub fn update_option_label(&mut self, field_index: usize, option_index: usize, label: impl Into<String>) {
        self.check_field_index(field_index);
        self.fields[field_index].update_option_label(option_index, label);
        self.touch();
    }

    pub fn remove_option(&mut self, field_index: usize, option_index: usize) -> FieldOption {
        self.check_field_index(field_index);
        let removed = self.fields[field_index].remove_option(option_index);
        self.touch();
        removed
    }

    // =========================================================================
    // Interpretation
    // =========================================================================

    /// Non-blocking schema problems
    pub fn lint(&self) -> Vec<SchemaWarning> {
        lint(self)
    }

    /// Validate a visitor submission against this schema
    pub fn validate(&self, submission: &Submission) -> ValidationReport {
        SubmissionValidator::validate(self, submission)
    }

    fn renumber(&mut self) {
        for (position, field) in self.fields.iter_mut().enumerate() {
            field.set_order(position as u32);
        }
    }

    fn check_field_index(&self, index: usize) {
        assert!(
            index < self.fields.len(),
            "stale field index {} for form {} with {} fields",
            index,
            self.id,
            self.fields.len()
        );
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;
    use proptest::prelude::*;

    fn form_with_fields(labels: &[&str]) -> Form {
        let mut form = Form::create("Test Form").unwrap();
        for label in labels {
            form.add_field_with(FieldPatch::new().label(*label));
        }
        form
    }

    fn names(form: &Form) -> Vec<&str> {
        form.fields().iter().map(FormField::name).collect()
    }

    fn assert_dense(form: &Form) {
        for (i, field) in form.fields().iter().enumerate() {
            assert_eq!(field.order() as usize, i);
        }
    }

    #[test]
    fn test_form_creation() {
        let form = Form::create("Contact Form").unwrap();
        assert_eq!(form.name(), "Contact Form");
        assert_eq!(form.slug(), "contact-form");
        assert!(form.is_active());
        assert!(form.fields().is_empty());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(Form::create("  "), Err(SchemaError::EmptyName)));
    }

    #[test]
    fn test_slug_follows_name() {
        let mut form = Form::create("Draft").unwrap();
        form.set_name("Contact Form").unwrap();
        assert_eq!(form.slug(), "contact-form");
    }

    #[test]
    fn test_manual_slug_survives_rename() {
        let mut form = Form::create("Contact Form").unwrap();
        form.set_slug("get-in-touch");
        form.set_name("Contact Us").unwrap();
        assert_eq!(form.name(), "Contact Us");
        assert_eq!(form.slug(), "get-in-touch");
        assert!(form.is_slug_overridden());
    }

    #[test]
    fn test_clearing_slug_resumes_derivation() {
        let mut form = Form::create("Contact Form").unwrap();
        form.set_slug("custom");
        form.set_slug("");
        assert_eq!(form.slug(), "contact-form");
        form.set_name("Careers Enquiry").unwrap();
        assert_eq!(form.slug(), "careers-enquiry");
    }

    #[test]
    fn test_manual_slug_is_normalized() {
        let mut form = Form::create("Contact Form").unwrap();
        form.set_slug("Get In Touch!");
        assert_eq!(form.slug(), "get-in-touch");
        assert!(form.is_slug_overridden());

        form.set_slug("?!");
        assert_eq!(form.slug(), "contact-form");
        assert!(!form.is_slug_overridden());
    }

    #[test]
    fn test_blank_rename_rejected() {
        let mut form = Form::create("Contact Form").unwrap();
        assert!(matches!(form.set_name("   "), Err(SchemaError::EmptyName)));
        assert_eq!(form.name(), "Contact Form");
        assert_eq!(form.slug(), "contact-form");
    }

    #[test]
    fn test_add_field_defaults() {
        let mut form = Form::create("F").unwrap();
        form.add_field();
        let index = form.add_field();
        assert_eq!(index, 1);
        let field = &form.fields()[1];
        assert_eq!(field.order(), 1);
        assert_eq!(field.field_type(), FieldType::Text);
        assert!(field.is_active());
        assert!(!field.is_required());
    }

    #[test]
    fn test_update_field_derives_name() {
        let mut form = form_with_fields(&["Placeholder"]);
        form.update_field(0, FieldPatch::new().label("Full Name"));
        assert_eq!(form.fields()[0].name(), "full_name");
    }

    #[test]
    fn test_name_override_policy() {
        let mut form = form_with_fields(&["Full Name"]);
        form.preserve_field_name_overrides(true);
        form.update_field(0, FieldPatch::new().name("applicant"));
        form.update_field(0, FieldPatch::new().label("Applicant Name"));
        assert_eq!(form.fields()[0].name(), "applicant");
    }

    #[test]
    fn test_remove_field_renumbers() {
        let mut form = form_with_fields(&["A", "B", "C", "D"]);
        let removed = form.remove_field(1);
        assert_eq!(removed.name(), "b");
        assert_eq!(names(&form), vec!["a", "c", "d"]);
        assert_dense(&form);
    }

    #[test]
    fn test_move_field_swaps_and_renumbers() {
        let mut form = form_with_fields(&["A", "B", "C"]);
        assert!(form.move_field(2, MoveDirection::Up));
        assert_eq!(names(&form), vec!["a", "c", "b"]);
        assert!(form.move_field(0, MoveDirection::Down));
        assert_eq!(names(&form), vec!["c", "a", "b"]);
        assert_dense(&form);
    }

    #[test]
    fn test_move_is_noop_at_boundaries() {
        let mut form = form_with_fields(&["A", "B"]);
        let before = form.fields().to_vec();
        assert!(!form.move_field(0, MoveDirection::Up));
        assert!(!form.move_field(1, MoveDirection::Down));
        assert_eq!(form.fields(), &before[..]);
    }

    #[test]
    fn test_option_operations_through_form() {
        let mut form = Form::create("Visa Enquiry").unwrap();
        let country = form.add_field_with(FieldPatch::new().label("Country").field_type(FieldType::Select));
        let first = form.add_option(country);
        form.update_option_label(country, first, "North India");
        assert_eq!(form.fields()[country].options()[0].value(), "north_india");

        form.remove_option(country, first);
        assert!(form.fields()[country].options().is_empty());
    }

    #[test]
    #[should_panic(expected = "stale field index")]
    fn test_stale_field_index_panics() {
        let mut form = form_with_fields(&["A"]);
        form.remove_field(1);
    }

    #[test]
    #[should_panic(expected = "stale field index")]
    fn test_move_on_empty_form_panics() {
        let mut form = Form::create("Empty").unwrap();
        form.move_field(0, MoveDirection::Down);
    }

    #[test]
    fn test_active_fields_skip_hidden() {
        let mut form = form_with_fields(&["A", "B", "C"]);
        form.update_field(1, FieldPatch::new().active(false));
        let active: Vec<_> = form.active_fields().map(FormField::name).collect();
        assert_eq!(active, vec!["a", "c"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
        Move(usize, bool),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            any::<usize>().prop_map(Op::Remove),
            (any::<usize>(), any::<bool>()).prop_map(|(i, up)| Op::Move(i, up)),
        ]
    }

    proptest! {
        #[test]
        fn prop_order_matches_position_after_every_op(ops in prop::collection::vec(op(), 0..64)) {
            let mut form = Form::create("Prop").unwrap();
            for op in ops {
                let len = form.fields().len();
                match op {
                    Op::Add => { form.add_field(); }
                    Op::Remove(i) if len > 0 => { form.remove_field(i % len); }
                    Op::Move(i, up) if len > 0 => {
                        let direction = if up { MoveDirection::Up } else { MoveDirection::Down };
                        form.move_field(i % len, direction);
                    }
                    _ => {}
                }
                for (i, field) in form.fields().iter().enumerate() {
                    prop_assert_eq!(field.order() as usize, i);
                }
            }
        }
    }
}
