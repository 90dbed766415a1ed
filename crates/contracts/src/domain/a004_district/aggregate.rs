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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictId(pub Uuid);

impl DistrictId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for DistrictId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(DistrictId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    #[serde(flatten)]
    pub base: BaseAggregate<DistrictId>,

    pub city: String,
    pub state: String,
    pub country: String,
}

impl District {
    pub fn new(base: BaseAggregate<DistrictId>, city: &str, state: &str, country: &str) -> Self {
        Self {
            base,
            city: city.to_string(),
            state: state.to_string(),
            country: country.to_string(),
        }
    }
}

static FIELDS: [FieldMetadata; 6] = [
    FULL_NAME_FIELD,
    SHORT_NAME_FIELD,
    FieldMetadata::parent_ref("city", "City", Level::City).list_search(),
    FieldMetadata::parent_ref("state", "State", Level::State),
    FieldMetadata::parent_ref("country", "Country", Level::Country),
    IS_ACTIVE_FIELD,
];

impl FormFields for District {
    fn field_metadata() -> &'static [FieldMetadata] {
        &FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match Level::from_field_name(field) {
            Some(level) => self.parent_key(level).map(FieldValue::Text),
            None => self.base.field_value(field),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match Level::from_field_name(field) {
            Some(level) => self.set_parent_key(level, value),
            None => self.base.set_field(field, value),
        }
    }
}

impl Hierarchical for District {
    const LEVEL: Level = Level::District;

    fn parent_key(&self, level: Level) -> Option<&str> {
        match level {
            Level::City => Some(&self.city),
            Level::State => Some(&self.state),
            Level::Country => Some(&self.country),
            _ => None,
        }
    }

    fn set_parent_key(&mut self, level: Level, value: &str) -> bool {
        let slot = match level {
            Level::City => &mut self.city,
            Level::State => &mut self.state,
            Level::Country => &mut self.country,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

impl AggregateRoot for District {
    type Id = DistrictId;

    fn base(&self) -> &BaseAggregate<DistrictId> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseAggregate<DistrictId> {
        &mut self.base
    }

    fn from_base(base: BaseAggregate<DistrictId>) -> Self {
        Self::new(base, "", "", "")
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "district"
    }

    fn element_name() -> &'static str {
        "District"
    }

    fn list_name() -> &'static str {
        "Districts"
    }
}
