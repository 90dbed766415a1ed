use serde::{Deserialize, Serialize};

use super::{AuditHistory, AuditInfo};
use crate::shared::metadata::{FieldMetadata, FieldValue};

/// Fields shared by every record of the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseAggregate<Id> {
    /// Unique record id, assigned at creation and never changed
    pub id: Id,
    pub full_name: String,
    /// Display key; children reference their parents by this value
    pub short_name: String,
    pub is_active: bool,
    pub audit: AuditInfo,
    #[serde(default)]
    pub history: AuditHistory,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id, full_name: &str, short_name: &str, audit: AuditInfo) -> Self {
        Self {
            id,
            full_name: full_name.to_string(),
            short_name: short_name.to_string(),
            is_active: true,
            audit,
            history: AuditHistory::new(),
        }
    }

    pub fn with_history(mut self, history: AuditHistory) -> Self {
        self.history = history;
        self
    }

    /// Flip the active flag; no other field is affected
    pub fn toggle_active(&mut self) {
        self.is_active = !self.is_active;
    }

    /// Value of a shared form field (`fullName`, `shortName`, `isActive`)
    pub fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "fullName" => Some(FieldValue::Text(&self.full_name)),
            "shortName" => Some(FieldValue::Text(&self.short_name)),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "fullName" => self.full_name = value.to_string(),
            "shortName" => self.short_name = value.to_string(),
            _ => return false,
        }
        true
    }
}

/// Form fields every aggregate starts with
pub const FULL_NAME_FIELD: FieldMetadata =
    FieldMetadata::text("fullName", "Full name").list_search().link_search();
pub const SHORT_NAME_FIELD: FieldMetadata =
    FieldMetadata::text("shortName", "Short name").list_search().link_search();
pub const IS_ACTIVE_FIELD: FieldMetadata = FieldMetadata::flag("isActive", "Active");
