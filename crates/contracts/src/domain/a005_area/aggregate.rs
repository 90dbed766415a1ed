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
pub struct AreaId(pub Uuid);

impl AreaId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for AreaId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(AreaId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Area of a district, identified for mail by its pin code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(flatten)]
    pub base: BaseAggregate<AreaId>,

    pub district: String,
    pub city: String,
    pub state: String,
    pub country: String,

    pub pin_code: String,
}

impl Area {
    pub fn new(
        base: BaseAggregate<AreaId>,
        district: &str,
        city: &str,
        state: &str,
        country: &str,
        pin_code: &str,
    ) -> Self {
        Self {
            base,
            district: district.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            country: country.to_string(),
            pin_code: pin_code.to_string(),
        }
    }
}

static FIELDS: [FieldMetadata; 8] = [
    FULL_NAME_FIELD,
    SHORT_NAME_FIELD,
    FieldMetadata::parent_ref("district", "District", Level::District).list_search(),
    FieldMetadata::parent_ref("city", "City", Level::City),
    FieldMetadata::parent_ref("state", "State", Level::State),
    FieldMetadata::parent_ref("country", "Country", Level::Country),
    FieldMetadata::text("pinCode", "Pin code").list_search().link_search(),
    IS_ACTIVE_FIELD,
];

impl FormFields for Area {
    fn field_metadata() -> &'static [FieldMetadata] {
        &FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        if field == "pinCode" {
            return Some(FieldValue::Text(&self.pin_code));
        }
        match Level::from_field_name(field) {
            Some(level) => self.parent_key(level).map(FieldValue::Text),
            None => self.base.field_value(field),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        if field == "pinCode" {
            self.pin_code = value.to_string();
            return true;
        }
        match Level::from_field_name(field) {
            Some(level) => self.set_parent_key(level, value),
            None => self.base.set_field(field, value),
        }
    }
}

impl Hierarchical for Area {
    const LEVEL: Level = Level::Area;

    fn parent_key(&self, level: Level) -> Option<&str> {
        match level {
            Level::District => Some(&self.district),
            Level::City => Some(&self.city),
            Level::State => Some(&self.state),
            Level::Country => Some(&self.country),
            _ => None,
        }
    }

    fn set_parent_key(&mut self, level: Level, value: &str) -> bool {
        let slot = match level {
            Level::District => &mut self.district,
            Level::City => &mut self.city,
            Level::State => &mut self.state,
            Level::Country => &mut self.country,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

impl AggregateRoot for Area {
    type Id = AreaId;

    fn base(&self) -> &BaseAggregate<AreaId> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseAggregate<AreaId> {
        &mut self.base
    }

    fn from_base(base: BaseAggregate<AreaId>) -> Self {
        Self::new(base, "", "", "", "", "")
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "area"
    }

    fn element_name() -> &'static str {
        "Area"
    }

    fn list_name() -> &'static str {
        "Areas"
    }
}
