//! Field-level metadata for the hierarchy forms
//!
//! Every aggregate publishes a static table of its editable fields. The
//! validator, the list search and the sort all read the record through it.

use super::field_type::{FieldType, FieldValue};
use super::validation::ValidationRules;
use crate::shared::hierarchy::Level;

/// Metadata for a single field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMetadata {
    /// Field key as used in forms and error maps (e.g. "stateCode")
    pub name: &'static str,
    pub field_type: FieldType,
    pub ui: FieldUiMetadata,
    pub validation: ValidationRules,
}

/// UI hints for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUiMetadata {
    pub label: &'static str,
    /// Part of the list page search
    pub list_search: bool,
    /// Part of the search-to-link lookup
    pub link_search: bool,
}

impl FieldMetadata {
    pub const fn new(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            ui: FieldUiMetadata {
                label,
                list_search: false,
                link_search: false,
            },
            validation: ValidationRules::none(),
        }
    }

    /// Required free text
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldType::Text).with_rules(ValidationRules::required())
    }

    /// Required numeric code of at least two digits
    pub const fn numeric_code(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldType::NumericCode).with_rules(ValidationRules::numeric_code())
    }

    /// Required alphanumeric code of at least two characters
    pub const fn alphanumeric_code(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldType::AlphanumericCode)
            .with_rules(ValidationRules::alphanumeric_code())
    }

    /// Required reference to an ancestor level
    pub const fn parent_ref(name: &'static str, label: &'static str, level: Level) -> Self {
        Self::new(name, label, FieldType::ParentRef(level)).with_rules(ValidationRules::selection())
    }

    pub const fn flag(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldType::Flag)
    }

    pub const fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.validation = rules;
        self
    }

    pub const fn list_search(mut self) -> Self {
        self.ui.list_search = true;
        self
    }

    pub const fn link_search(mut self) -> Self {
        self.ui.link_search = true;
        self
    }

    pub fn label(&self) -> &'static str {
        self.ui.label
    }

    pub fn is_optional(&self) -> bool {
        !self.validation.required
    }
}

/// Access to a record's fields by their form key
pub trait FormFields {
    /// Static field table, in form order
    fn field_metadata() -> &'static [FieldMetadata];

    /// Current value of `field`, `None` for unknown keys
    fn field_value(&self, field: &str) -> Option<FieldValue<'_>>;

    /// Set a text field from form input; returns `false` for unknown or
    /// non-text keys
    fn set_field(&mut self, field: &str, value: &str) -> bool;

    fn field(name: &str) -> Option<&'static FieldMetadata> {
        Self::field_metadata().iter().find(|f| f.name == name)
    }
}
