//! Field type enumeration for metadata system

use crate::shared::hierarchy::Level;

/// Category of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,
    /// Digits only (`code`, `stateCode`, `gstCode`, `stdCode`)
    NumericCode,
    /// Letters and digits, kept uppercase (`cityCode`)
    AlphanumericCode,
    /// `shortName` of an ancestor record
    ParentRef(Level),
    Flag,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::NumericCode => "numeric_code",
            Self::AlphanumericCode => "alphanumeric_code",
            Self::ParentRef(_) => "parent_ref",
            Self::Flag => "flag",
        }
    }
}

/// Natural value of a field, used for search and sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }
}
