use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a002_state::aggregate::State;
use contracts::domain::a003_city::aggregate::City;
use contracts::domain::a004_district::aggregate::District;
use contracts::domain::a005_area::aggregate::Area;
use contracts::domain::a006_colony::aggregate::Colony;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::hierarchy::{Hierarchical, Level};
use contracts::shared::metadata::FormFields;

/// All six entity collections, each in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoCollections {
    pub countries: Vec<Country>,
    pub states: Vec<State>,
    pub cities: Vec<City>,
    pub districts: Vec<District>,
    pub areas: Vec<Area>,
    pub colonies: Vec<Colony>,
}

/// An aggregate kept in [`GeoCollections`]
pub trait Stored: AggregateRoot + Hierarchical + FormFields + 'static {
    fn items(collections: &GeoCollections) -> &Vec<Self>;

    fn items_mut(collections: &mut GeoCollections) -> &mut Vec<Self>;
}

impl Stored for Country {
    fn items(collections: &GeoCollections) -> &Vec<Self> {
        &collections.countries
    }

    fn items_mut(collections: &mut GeoCollections) -> &mut Vec<Self> {
        &mut collections.countries
    }
}

impl Stored for State {
    fn items(collections: &GeoCollections) -> &Vec<Self> {
        &collections.states
    }

    fn items_mut(collections: &mut GeoCollections) -> &mut Vec<Self> {
        &mut collections.states
    }
}

impl Stored for City {
    fn items(collections: &GeoCollections) -> &Vec<Self> {
        &collections.cities
    }

    fn items_mut(collections: &mut GeoCollections) -> &mut Vec<Self> {
        &mut collections.cities
    }
}

impl Stored for District {
    fn items(collections: &GeoCollections) -> &Vec<Self> {
        &collections.districts
    }

    fn items_mut(collections: &mut GeoCollections) -> &mut Vec<Self> {
        &mut collections.districts
    }
}

impl Stored for Area {
    fn items(collections: &GeoCollections) -> &Vec<Self> {
        &collections.areas
    }

    fn items_mut(collections: &mut GeoCollections) -> &mut Vec<Self> {
        &mut collections.areas
    }
}

impl Stored for Colony {
    fn items(collections: &GeoCollections) -> &Vec<Self> {
        &collections.colonies
    }

    fn items_mut(collections: &mut GeoCollections) -> &mut Vec<Self> {
        &mut collections.colonies
    }
}

/// Level-agnostic view of a record, used where the entity type is only known
/// at runtime (ancestor chains, child lists)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    pub level: Level,
    pub id: String,
    pub short_name: String,
    pub full_name: String,
    pub is_active: bool,
}

impl RecordRef {
    pub fn of<T: Stored>(record: &T) -> Self {
        Self {
            level: T::LEVEL,
            id: record.id().as_string(),
            short_name: record.short_name().to_string(),
            full_name: record.full_name().to_string(),
            is_active: record.is_active(),
        }
    }
}

fn refs_where<T: Stored>(items: &[T], keep: impl Fn(&T) -> bool) -> Vec<RecordRef> {
    items.iter().filter(|i| keep(*i)).map(RecordRef::of).collect()
}

impl GeoCollections {
    pub fn len(&self, level: Level) -> usize {
        match level {
            Level::Country => self.countries.len(),
            Level::State => self.states.len(),
            Level::City => self.cities.len(),
            Level::District => self.districts.len(),
            Level::Area => self.areas.len(),
            Level::Colony => self.colonies.len(),
        }
    }

    /// Records of `level` whose `shortName` equals `short_name`
    pub fn with_short_name(&self, level: Level, short_name: &str) -> Vec<RecordRef> {
        match level {
            Level::Country => refs_where(&self.countries, |r| r.short_name() == short_name),
            Level::State => refs_where(&self.states, |r| r.short_name() == short_name),
            Level::City => refs_where(&self.cities, |r| r.short_name() == short_name),
            Level::District => refs_where(&self.districts, |r| r.short_name() == short_name),
            Level::Area => refs_where(&self.areas, |r| r.short_name() == short_name),
            Level::Colony => refs_where(&self.colonies, |r| r.short_name() == short_name),
        }
    }

    /// Records of `child` level whose key for `parent` level equals `short_name`
    pub fn children_of(&self, parent: Level, child: Level, short_name: &str) -> Vec<RecordRef> {
        if !parent.is_ancestor_of(child) || short_name.is_empty() {
            return Vec::new();
        }
        let key = Some(short_name);
        match child {
            Level::Country => Vec::new(),
            Level::State => refs_where(&self.states, |r| r.parent_key(parent) == key),
            Level::City => refs_where(&self.cities, |r| r.parent_key(parent) == key),
            Level::District => refs_where(&self.districts, |r| r.parent_key(parent) == key),
            Level::Area => refs_where(&self.areas, |r| r.parent_key(parent) == key),
            Level::Colony => refs_where(&self.colonies, |r| r.parent_key(parent) == key),
        }
    }
}
