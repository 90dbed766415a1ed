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
pub struct CityId(pub Uuid);

impl CityId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CityId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CityId::new)
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
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(flatten)]
    pub base: BaseAggregate<CityId>,

    pub state: String,
    pub country: String,

    /// Letters and digits, stored uppercase
    pub city_code: String,
}

impl City {
    pub fn new(base: BaseAggregate<CityId>, state: &str, country: &str, city_code: &str) -> Self {
        Self {
            base,
            state: state.to_string(),
            country: country.to_string(),
            city_code: normalize_city_code(city_code),
        }
    }
}

/// City codes are case-insensitive and kept uppercase from input on
pub fn normalize_city_code(input: &str) -> String {
    input.to_uppercase()
}

static FIELDS: [FieldMetadata; 6] = [
    FULL_NAME_FIELD,
    SHORT_NAME_FIELD,
    FieldMetadata::parent_ref("state", "State", Level::State).list_search(),
    FieldMetadata::parent_ref("country", "Country", Level::Country),
    FieldMetadata::alphanumeric_code("cityCode", "City code").list_search(),
    IS_ACTIVE_FIELD,
];

impl FormFields for City {
    fn field_metadata() -> &'static [FieldMetadata] {
        &FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "state" => Some(FieldValue::Text(&self.state)),
            "country" => Some(FieldValue::Text(&self.country)),
            "cityCode" => Some(FieldValue::Text(&self.city_code)),
            _ => self.base.field_value(field),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            "state" => self.state = value.to_string(),
            "country" => self.country = value.to_string(),
            "cityCode" => self.city_code = normalize_city_code(value),
            _ => return self.base.set_field(field, value),
        }
        true
    }
}

impl Hierarchical for City {
    const LEVEL: Level = Level::City;

    fn parent_key(&self, level: Level) -> Option<&str> {
        match level {
            Level::State => Some(&self.state),
            Level::Country => Some(&self.country),
            _ => None,
        }
    }

    fn set_parent_key(&mut self, level: Level, value: &str) -> bool {
        match level {
            Level::State => self.state = value.to_string(),
            Level::Country => self.country = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl AggregateRoot for City {
    type Id = CityId;

    fn base(&self) -> &BaseAggregate<CityId> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseAggregate<CityId> {
        &mut self.base
    }

    fn from_base(base: BaseAggregate<CityId>) -> Self {
        Self::new(base, "", "", "")
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "city"
    }

    fn element_name() -> &'static str {
        "City"
    }

    fn list_name() -> &'static str {
        "Cities"
    }
}
