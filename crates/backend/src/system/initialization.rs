use std::collections::BTreeMap;

use contracts::shared::hierarchy::Level;
use contracts::shared::metadata::validate;

use crate::shared::data::{GeoStore, SeedProvider, Stored};

/// Seed the store and report what the seed looks like.
///
/// Invalid seed records and duplicate short names are logged, not rejected:
/// the console shows whatever the seed holds.
pub fn initialize_store(provider: &impl SeedProvider) -> GeoStore {
    let store = GeoStore::seeded(provider);

    for level in Level::ALL {
        report(&store, level);
    }
    store
}

fn report(store: &GeoStore, level: Level) {
    use contracts::domain::a001_country::aggregate::Country;
    use contracts::domain::a002_state::aggregate::State;
    use contracts::domain::a003_city::aggregate::City;
    use contracts::domain::a004_district::aggregate::District;
    use contracts::domain::a005_area::aggregate::Area;
    use contracts::domain::a006_colony::aggregate::Colony;

    match level {
        Level::Country => check::<Country>(store),
        Level::State => check::<State>(store),
        Level::City => check::<City>(store),
        Level::District => check::<District>(store),
        Level::Area => check::<Area>(store),
        Level::Colony => check::<Colony>(store),
    }
}

fn check<T: Stored>(store: &GeoStore) {
    let items = store.items::<T>();

    let invalid = items.iter().filter(|r| !validate(*r).is_valid()).count();
    if invalid > 0 {
        tracing::warn!("{}: {} seeded records fail validation", T::list_name(), invalid);
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in items {
        *counts.entry(record.short_name()).or_default() += 1;
    }
    for (short_name, count) in counts.into_iter().filter(|(_, c)| *c > 1) {
        tracing::warn!(
            "{}: short name '{}' is used by {} records",
            T::list_name(),
            short_name,
            count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::StaticSeed;

    #[test]
    fn test_initialize_store_loads_seed() {
        let store = initialize_store(&StaticSeed);
        assert_eq!(store.collections(), &StaticSeed.load());
    }
}
