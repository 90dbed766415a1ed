//! Metadata describing the editable fields of every aggregate
//!
//! Each aggregate exposes a static [`FieldMetadata`] table through
//! [`FormFields`]. The validator walks that table, so adding a rule to a
//! field is a one-line change in the aggregate.

mod field_type;
mod types;
mod validation;

pub use field_type::{FieldType, FieldValue};
pub use types::{FieldMetadata, FieldUiMetadata, FormFields};
pub use validation::{validate, Pattern, ValidationErrors, ValidationRules};
