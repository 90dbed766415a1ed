use std::collections::{BTreeMap, BTreeSet};

use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a002_state::aggregate::State;
use contracts::domain::a003_city::aggregate::City;
use contracts::domain::a004_district::aggregate::District;
use contracts::domain::a005_area::aggregate::Area;
use contracts::domain::a006_colony::aggregate::Colony;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::hierarchy::Level;

use super::collections::{GeoCollections, RecordRef, Stored};
use super::repository::{Repository, StoreError};
use super::seed::SeedProvider;

/// In-memory store of every collection
///
/// Edit sessions take a full copy with [`GeoStore::snapshot`] and hand back
/// the records they changed through [`GeoStore::commit`].
#[derive(Debug, Clone, Default)]
pub struct GeoStore {
    collections: GeoCollections,
}

impl GeoStore {
    pub fn new(collections: GeoCollections) -> Self {
        Self { collections }
    }

    pub fn seeded(provider: &impl SeedProvider) -> Self {
        let collections = provider.load();
        tracing::info!(
            "Store seeded: {} countries, {} states, {} cities, {} districts, {} areas, {} colonies",
            collections.countries.len(),
            collections.states.len(),
            collections.cities.len(),
            collections.districts.len(),
            collections.areas.len(),
            collections.colonies.len(),
        );
        Self::new(collections)
    }

    pub fn collections(&self) -> &GeoCollections {
        &self.collections
    }

    pub fn items<T: Stored>(&self) -> &[T] {
        T::items(&self.collections)
    }

    /// Working copy for an edit session
    pub fn snapshot(&self) -> GeoCollections {
        self.collections.clone()
    }

    /// Write back the records listed in `changes`, copied from `working`.
    ///
    /// Records are matched by id, so anything else the store received since
    /// the snapshot stays as it is. When one of the listed records is gone
    /// from the store the whole commit is refused and nothing is written.
    pub fn commit(&mut self, working: &GeoCollections, changes: &ChangeSet) -> Result<(), StoreError> {
        for (level, ids) in &changes.0 {
            self.commit_level(*level, working, ids, false)?;
        }
        for (level, ids) in &changes.0 {
            self.commit_level(*level, working, ids, true)?;
        }
        tracing::debug!("Committed {} changed records", changes.len());
        Ok(())
    }

    fn commit_level(
        &mut self,
        level: Level,
        working: &GeoCollections,
        ids: &BTreeSet<String>,
        write: bool,
    ) -> Result<(), StoreError> {
        match level {
            Level::Country => write_back::<Country>(&mut self.collections, working, ids, write),
            Level::State => write_back::<State>(&mut self.collections, working, ids, write),
            Level::City => write_back::<City>(&mut self.collections, working, ids, write),
            Level::District => write_back::<District>(&mut self.collections, working, ids, write),
            Level::Area => write_back::<Area>(&mut self.collections, working, ids, write),
            Level::Colony => write_back::<Colony>(&mut self.collections, working, ids, write),
        }
    }

    /// Resolve an ancestor reference at the boundary: `shortName` to record
    pub fn resolve(&self, level: Level, short_name: &str) -> Result<Option<RecordRef>, StoreError> {
        let mut found = self.collections.with_short_name(level, short_name);
        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            count => Err(StoreError::AmbiguousShortName {
                entity: entity_name(level),
                short_name: short_name.to_string(),
                count,
            }),
        }
    }
}

fn entity_name(level: Level) -> &'static str {
    match level {
        Level::Country => Country::element_name(),
        Level::State => State::element_name(),
        Level::City => City::element_name(),
        Level::District => District::element_name(),
        Level::Area => Area::element_name(),
        Level::Colony => Colony::element_name(),
    }
}

/// Ids of the records an edit session changed, per level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(BTreeMap<Level, BTreeSet<String>>);

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<T: Stored>(&mut self, record: &T) {
        self.0
            .entry(T::LEVEL)
            .or_default()
            .insert(record.id().as_string());
    }

    /// Levels with at least one changed record
    pub fn levels(&self) -> Vec<Level> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// With `write == false` only checks that every listed record still exists.
fn write_back<T: Stored>(
    live: &mut GeoCollections,
    working: &GeoCollections,
    ids: &BTreeSet<String>,
    write: bool,
) -> Result<(), StoreError> {
    let live = T::items_mut(live);
    for id in ids {
        let Some(slot) = live.iter_mut().find(|r| r.id().as_string() == *id) else {
            return Err(StoreError::NotFound {
                entity: T::element_name(),
                id: id.clone(),
            });
        };
        if !write {
            continue;
        }
        if let Some(changed) = T::items(working).iter().find(|r| r.id() == slot.id()) {
            *slot = changed.clone();
        }
    }
    Ok(())
}

/// `true` when another record of the collection already uses `record`'s `shortName`
pub fn short_name_taken<T: Stored>(items: &[T], record: &T) -> bool {
    let short_name = record.short_name().trim();
    !short_name.is_empty()
        && items
            .iter()
            .any(|other| other.id() != record.id() && other.short_name().trim() == short_name)
}

impl<T: Stored> Repository<T> for GeoStore {
    fn list_all(&self) -> Vec<T> {
        T::items(&self.collections).clone()
    }

    fn get_by_id(&self, id: T::Id) -> Option<T> {
        T::items(&self.collections).iter().find(|r| r.id() == id).cloned()
    }

    fn find_by_short_name(&self, short_name: &str) -> Result<Option<T>, StoreError> {
        let matches: Vec<&T> = T::items(&self.collections)
            .iter()
            .filter(|r| r.short_name() == short_name)
            .collect();
        match matches.as_slice() {
            [] => Ok(None),
            [one] => Ok(Some((*one).clone())),
            many => Err(StoreError::AmbiguousShortName {
                entity: T::element_name(),
                short_name: short_name.to_string(),
                count: many.len(),
            }),
        }
    }

    fn insert(&mut self, record: T) -> Result<T::Id, StoreError> {
        let id = record.id();
        let items = T::items_mut(&mut self.collections);
        if items.iter().any(|r| r.id() == id) {
            return Err(StoreError::DuplicateId {
                entity: T::element_name(),
                id: id.as_string(),
            });
        }
        items.push(record);
        tracing::info!("{} {} inserted", T::element_name(), id.as_string());
        Ok(id)
    }

    fn update(&mut self, record: T) -> Result<(), StoreError> {
        let id = record.id();
        let items = T::items_mut(&mut self.collections);
        match items.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record;
                tracing::info!("{} {} updated", T::element_name(), id.as_string());
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: T::element_name(),
                id: id.as_string(),
            }),
        }
    }

    fn delete(&mut self, id: T::Id) -> bool {
        let items = T::items_mut(&mut self.collections);
        let before = items.len();
        items.retain(|r| r.id() != id);
        let removed = items.len() < before;
        if removed {
            tracing::info!("{} {} deleted", T::element_name(), id.as_string());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::StaticSeed;

    fn store() -> GeoStore {
        GeoStore::seeded(&StaticSeed)
    }

    #[test]
    fn test_find_by_short_name() {
        let store = store();
        let area: Option<Area> = store.find_by_short_name("GWH").unwrap();
        assert_eq!(area.unwrap().district, "CBD");
        let missing: Option<Area> = store.find_by_short_name("NOPE").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_duplicate_short_name_is_ambiguous() {
        let mut store = store();
        let mut copy: Country = Repository::<Country>::find_by_short_name(&store, "US")
            .unwrap()
            .unwrap();
        copy.base.id = AggregateId::generate();
        Repository::<Country>::insert(&mut store, copy).unwrap();

        let result = Repository::<Country>::find_by_short_name(&store, "US");
        assert!(matches!(
            result,
            Err(StoreError::AmbiguousShortName { count: 2, .. })
        ));
        assert!(store.resolve(Level::Country, "US").is_err());
    }

    #[test]
    fn test_insert_update_delete() {
        let mut store = store();
        let before = store.items::<Country>().len();
        let mut country = Country::new_for_insert("admin", chrono::Utc::now());
        country.base.short_name = "FR".into();
        let id = Repository::<Country>::insert(&mut store, country.clone()).unwrap();
        assert!(Repository::<Country>::insert(&mut store, country.clone()).is_err());

        country.code = "250".into();
        Repository::<Country>::update(&mut store, country).unwrap();
        let stored: Country = store.get_by_id(id).unwrap();
        assert_eq!(stored.code, "250");
        // appended at the end
        assert_eq!(store.items::<Country>()[before].id(), id);

        assert!(Repository::<Country>::delete(&mut store, id));
        assert!(!Repository::<Country>::delete(&mut store, id));
        assert_eq!(store.items::<Country>().len(), before);
    }

    #[test]
    fn test_update_unknown_record_fails() {
        let mut store = store();
        let country = Country::new_for_insert("admin", chrono::Utc::now());
        assert!(matches!(
            Repository::<Country>::update(&mut store, country),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_commit_writes_changed_records_only() {
        let mut store = store();
        let mut working = store.snapshot();
        working.colonies[0].base.full_name = "Renamed".into();
        working.colonies[1].base.full_name = "Not listed".into();
        working.areas.clear();

        let mut changes = ChangeSet::new();
        changes.record(&working.colonies[0]);
        store.commit(&working, &changes).unwrap();

        let colonies = store.items::<Colony>();
        assert_eq!(colonies[0].full_name(), "Renamed");
        assert_ne!(colonies[1].full_name(), "Not listed");
        assert!(!store.items::<Area>().is_empty());
    }

    #[test]
    fn test_commit_keeps_changes_made_after_snapshot() {
        let mut store = store();
        let mut working = store.snapshot();
        working.colonies[0].base.full_name = "Renamed".into();
        let mut changes = ChangeSet::new();
        changes.record(&working.colonies[0]);

        let gone = store.items::<Colony>()[1].id();
        assert!(Repository::<Colony>::delete(&mut store, gone));
        let mut fresh = Country::new_for_insert("admin", chrono::Utc::now());
        fresh.base.short_name = "FR".into();
        Repository::<Country>::insert(&mut store, fresh.clone()).unwrap();

        store.commit(&working, &changes).unwrap();
        assert!(Repository::<Colony>::get_by_id(&store, gone).is_none());
        assert!(Repository::<Country>::get_by_id(&store, fresh.id()).is_some());
        assert_eq!(store.items::<Colony>()[0].full_name(), "Renamed");
    }

    #[test]
    fn test_commit_refused_when_a_record_is_gone() {
        let mut store = store();
        let mut working = store.snapshot();
        working.colonies[0].base.full_name = "Renamed".into();
        working.areas[0].base.full_name = "Also renamed".into();
        let mut changes = ChangeSet::new();
        changes.record(&working.colonies[0]);
        changes.record(&working.areas[0]);
        assert_eq!(changes.len(), 2);

        let gone = working.colonies[0].id();
        Repository::<Colony>::delete(&mut store, gone);
        let before = store.collections().clone();

        assert!(matches!(
            store.commit(&working, &changes),
            Err(StoreError::NotFound { .. })
        ));
        assert_eq!(store.collections(), &before);
    }

    #[test]
    fn test_resolve_ancestor() {
        let store = store();
        let state = store.resolve(Level::State, "KA").unwrap().unwrap();
        assert_eq!(state.full_name, "Karnataka");
        assert!(store.resolve(Level::State, "ZZ").unwrap().is_none());
    }

    #[test]
    fn test_short_name_taken() {
        let store = store();
        let areas = store.items::<Area>();
        let mut fresh = Area::new_for_insert("admin", chrono::Utc::now());
        fresh.base.short_name = "GWH".into();
        assert!(short_name_taken(areas, &fresh));
        // a record never conflicts with itself
        assert!(!short_name_taken(areas, &areas[0]));
    }
}
