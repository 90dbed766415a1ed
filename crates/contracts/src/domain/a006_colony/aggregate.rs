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
pub struct ColonyId(pub Uuid);

impl ColonyId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ColonyId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ColonyId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Colony, the leaf of the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    #[serde(flatten)]
    pub base: BaseAggregate<ColonyId>,

    pub area: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Colony {
    pub fn new(
        base: BaseAggregate<ColonyId>,
        area: &str,
        district: &str,
        city: &str,
        state: &str,
        country: &str,
    ) -> Self {
        Self {
            base,
            area: area.to_string(),
            district: district.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            country: country.to_string(),
        }
    }
}

static FIELDS: [FieldMetadata; 8] = [
    FULL_NAME_FIELD,
    SHORT_NAME_FIELD,
    FieldMetadata::parent_ref("area", "Area", Level::Area).list_search(),
    FieldMetadata::parent_ref("district", "District", Level::District),
    FieldMetadata::parent_ref("city", "City", Level::City),
    FieldMetadata::parent_ref("state", "State", Level::State),
    FieldMetadata::parent_ref("country", "Country", Level::Country),
    IS_ACTIVE_FIELD,
];

impl FormFields for Colony {
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

impl Hierarchical for Colony {
    const LEVEL: Level = Level::Colony;

    fn parent_key(&self, level: Level) -> Option<&str> {
        match level {
            Level::Area => Some(&self.area),
            Level::District => Some(&self.district),
            Level::City => Some(&self.city),
            Level::State => Some(&self.state),
            Level::Country => Some(&self.country),
            Level::Colony => None,
        }
    }

    fn set_parent_key(&mut self, level: Level, value: &str) -> bool {
        let slot = match level {
            Level::Area => &mut self.area,
            Level::District => &mut self.district,
            Level::City => &mut self.city,
            Level::State => &mut self.state,
            Level::Country => &mut self.country,
            Level::Colony => return false,
        };
        *slot = value.to_string();
        true
    }
}

impl AggregateRoot for Colony {
    type Id = ColonyId;

    fn base(&self) -> &BaseAggregate<ColonyId> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseAggregate<ColonyId> {
        &mut self.base
    }

    fn from_base(base: BaseAggregate<ColonyId>) -> Self {
        Self::new(base, "", "", "", "", "")
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "colony"
    }

    fn element_name() -> &'static str {
        "Colony"
    }

    fn list_name() -> &'static str {
        "Colonies"
    }
}
