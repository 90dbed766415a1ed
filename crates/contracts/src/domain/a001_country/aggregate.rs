use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, FULL_NAME_FIELD, IS_ACTIVE_FIELD, SHORT_NAME_FIELD,
};
use crate::shared::hierarchy::{Hierarchical, Level};
use crate::shared::metadata::{FieldMetadata, FieldValue, FormFields};

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(pub Uuid);

impl CountryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CountryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CountryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Country, the root of the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(flatten)]
    pub base: BaseAggregate<CountryId>,

    /// Numeric country code, at least two digits
    pub code: String,
}

impl Country {
    pub fn new(base: BaseAggregate<CountryId>, code: &str) -> Self {
        Self {
            base,
            code: code.to_string(),
        }
    }
}

static FIELDS: [FieldMetadata; 4] = [
    FULL_NAME_FIELD,
    SHORT_NAME_FIELD,
    FieldMetadata::numeric_code("code", "Code").list_search(),
    IS_ACTIVE_FIELD,
];

impl FormFields for Country {
    fn field_metadata() -> &'static [FieldMetadata] {
        &FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "code" => Some(FieldValue::Text(&self.code)),
            _ => self.base.field_value(field),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "code" => {
                self.code = value.to_string();
                true
            }
            _ => self.base.set_field(field, value),
        }
    }
}

impl Hierarchical for Country {
    const LEVEL: Level = Level::Country;

    fn parent_key(&self, _level: Level) -> Option<&str> {
        None
    }

    fn set_parent_key(&mut self, _level: Level, _value: &str) -> bool {
        false
    }
}

impl AggregateRoot for Country {
    type Id = CountryId;

    fn base(&self) -> &BaseAggregate<CountryId> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseAggregate<CountryId> {
        &mut self.base
    }

    fn from_base(base: BaseAggregate<CountryId>) -> Self {
        Self::new(base, "")
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "country"
    }

    fn element_name() -> &'static str {
        "Country"
    }

    fn list_name() -> &'static str {
        "Countries"
    }
}
