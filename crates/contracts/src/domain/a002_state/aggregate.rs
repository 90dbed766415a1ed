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
pub struct StateId(pub Uuid);

impl StateId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for StateId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(StateId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// State (or province) of a country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(flatten)]
    pub base: BaseAggregate<StateId>,

    /// `shortName` of the country
    pub country: String,

    pub state_code: String,
    pub gst_code: String,
    pub std_code: String,
}

impl State {
    pub fn new(
        base: BaseAggregate<StateId>,
        country: &str,
        state_code: &str,
        gst_code: &str,
        std_code: &str,
    ) -> Self {
        Self {
            base,
            country: country.to_string(),
            state_code: state_code.to_string(),
            gst_code: gst_code.to_string(),
            std_code: std_code.to_string(),
        }
    }
}

static FIELDS: [FieldMetadata; 7] = [
    FULL_NAME_FIELD,
    SHORT_NAME_FIELD,
    FieldMetadata::parent_ref("country", "Country", Level::Country).list_search(),
    FieldMetadata::numeric_code("stateCode", "State code").list_search(),
    FieldMetadata::numeric_code("gstCode", "GST code"),
    FieldMetadata::numeric_code("stdCode", "STD code"),
    IS_ACTIVE_FIELD,
];

impl FormFields for State {
    fn field_metadata() -> &'static [FieldMetadata] {
        &FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        match field {
            "country" => Some(FieldValue::Text(&self.country)),
            "stateCode" => Some(FieldValue::Text(&self.state_code)),
            "gstCode" => Some(FieldValue::Text(&self.gst_code)),
            "stdCode" => Some(FieldValue::Text(&self.std_code)),
            _ => self.base.field_value(field),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "country" => &mut self.country,
            "stateCode" => &mut self.state_code,
            "gstCode" => &mut self.gst_code,
            "stdCode" => &mut self.std_code,
            _ => return self.base.set_field(field, value),
        };
        *slot = value.to_string();
        true
    }
}

impl Hierarchical for State {
    const LEVEL: Level = Level::State;

    fn parent_key(&self, level: Level) -> Option<&str> {
        match level {
            Level::Country => Some(&self.country),
            _ => None,
        }
    }

    fn set_parent_key(&mut self, level: Level, value: &str) -> bool {
        match level {
            Level::Country => self.country = value.to_string(),
            _ => return false,
        }
        true
    }
}

impl AggregateRoot for State {
    type Id = StateId;

    fn base(&self) -> &BaseAggregate<StateId> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseAggregate<StateId> {
        &mut self.base
    }

    fn from_base(base: BaseAggregate<StateId>) -> Self {
        Self::new(base, "", "", "", "")
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "state"
    }

    fn element_name() -> &'static str {
        "State"
    }

    fn list_name() -> &'static str {
        "States"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::AuditInfo;
    use crate::shared::metadata::validate;

    fn state(country: &str, codes: [&str; 3]) -> State {
        State::new(
            BaseAggregate::new(StateId::generate(), "Karnataka", "KA", AuditInfo::default()),
            country,
            codes[0],
            codes[1],
            codes[2],
        )
    }

    #[test]
    fn test_all_codes_checked() {
        let errors = validate(&state("IN", ["29", "2", "08a"]));
        assert!(!errors.contains("stateCode"));
        assert!(errors.contains("gstCode"));
        assert!(errors.contains("stdCode"));
        assert!(validate(&state("IN", ["29", "29", "080"])).is_valid());
    }

    #[test]
    fn test_country_must_be_selected() {
        let errors = validate(&state("", ["29", "29", "080"]));
        assert_eq!(errors.get("country"), Some("Country must be selected"));
    }

    #[test]
    fn test_camel_case_codes() {
        let value = serde_json::to_value(state("IN", ["29", "29", "080"])).unwrap();
        assert_eq!(value["stateCode"], "29");
        assert_eq!(value["gstCode"], "29");
        assert_eq!(value["stdCode"], "080");
        assert_eq!(value["country"], "IN");
    }
}
