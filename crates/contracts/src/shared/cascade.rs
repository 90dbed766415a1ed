//! Cascading dropdown options
//!
//! The options of a parent-key field are narrowed by the value the form holds
//! for the next level up. When that level is not chosen yet, every option is
//! offered. Changing an upper level never clears lower selections, so a form
//! can end up holding a chain that does not line up; nothing here prevents it.

use super::hierarchy::{Hierarchical, Level};

/// Valid choices for the `field` dropdown of `form`.
///
/// `collection` holds the records of level `field`.
pub fn options_for<'a, T, F>(field: Level, form: &F, collection: &'a [T]) -> Vec<&'a T>
where
    T: Hierarchical,
    F: Hierarchical,
{
    debug_assert_eq!(T::LEVEL, field, "options collection does not match the field");

    let upper = field.parent().and_then(|level| form.chosen(level).map(|v| (level, v)));
    match upper {
        Some((level, value)) => collection
            .iter()
            .filter(|option| option.parent_key(level) == Some(value))
            .collect(),
        None => collection.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_country::aggregate::{Country, CountryId};
    use crate::domain::a002_state::aggregate::{State, StateId};
    use crate::domain::a003_city::aggregate::{City, CityId};
    use crate::domain::a004_district::aggregate::{District, DistrictId};
    use crate::domain::common::{AggregateId, AggregateRoot, AuditInfo, BaseAggregate};

    fn state(short: &str, country: &str) -> State {
        State::new(
            BaseAggregate::new(StateId::generate(), short, short, AuditInfo::default()),
            country,
            "10",
            "10",
            "10",
        )
    }

    fn city(short: &str, state: &str, country: &str) -> City {
        City::new(
            BaseAggregate::new(CityId::generate(), short, short, AuditInfo::default()),
            state,
            country,
            "C1",
        )
    }

    fn district_form(city: &str, state: &str, country: &str) -> District {
        District::new(
            BaseAggregate::new(DistrictId::generate(), "", "", AuditInfo::default()),
            city,
            state,
            country,
        )
    }

    fn names<T: AggregateRoot>(items: Vec<&T>) -> Vec<&str> {
        items.into_iter().map(|i| i.short_name()).collect()
    }

    #[test]
    fn test_filtered_by_next_higher_level() {
        let states = vec![state("CA", "US"), state("KA", "IN"), state("NY", "US")];
        let form = city("", "", "US");
        assert_eq!(names(options_for(Level::State, &form, &states)), vec!["CA", "NY"]);
    }

    #[test]
    fn test_unset_upper_level_shows_everything() {
        let cities = vec![city("SF", "CA", "US"), city("BLR", "KA", "IN")];
        // state unset, country set: only the next higher level counts
        let form = district_form("", "", "US");
        assert_eq!(names(options_for(Level::City, &form, &cities)), vec!["SF", "BLR"]);
    }

    #[test]
    fn test_root_level_is_never_filtered() {
        let countries = vec![
            Country::new(
                BaseAggregate::new(CountryId::generate(), "India", "IN", AuditInfo::default()),
                "356",
            ),
            Country::new(
                BaseAggregate::new(CountryId::generate(), "United States", "US", AuditInfo::default()),
                "840",
            ),
        ];
        let form = state("KA", "IN");
        assert_eq!(names(options_for(Level::Country, &form, &countries)), vec!["IN", "US"]);
    }

    #[test]
    fn test_upper_change_keeps_lower_selection() {
        let cities = vec![city("SF", "CA", "US"), city("BLR", "KA", "IN")];
        let mut form = district_form("SF", "CA", "US");
        form.state = "KA".to_string();
        // city stays as chosen, only the offered options move
        assert_eq!(form.city, "SF");
        assert_eq!(names(options_for(Level::City, &form, &cities)), vec!["BLR"]);
    }
}
