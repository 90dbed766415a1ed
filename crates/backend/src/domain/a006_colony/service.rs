use contracts::domain::a006_colony::aggregate::{Colony, ColonyId};
use contracts::domain::common::{AggregateId, AggregateRoot};

use crate::shared::data::{GeoStore, Repository};

/// Hard delete of a colony, asked for confirmation through `confirm`
pub fn delete(
    store: &mut GeoStore,
    id: ColonyId,
    confirm: impl FnOnce(&Colony) -> bool,
) -> anyhow::Result<bool> {
    let colony: Colony = store
        .get_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("Colony {} not found", id.as_string()))?;

    if !confirm(&colony) {
        tracing::info!("Delete of colony {} cancelled", colony.short_name());
        return Ok(false);
    }

    Ok(Repository::<Colony>::delete(store, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::StaticSeed;

    #[test]
    fn test_delete_colony() {
        let mut store = GeoStore::seeded(&StaticSeed);
        let colonies = store.items::<Colony>();
        let (first, second) = (colonies[0].id(), colonies[1].id());
        let before = colonies.len();

        assert!(!delete(&mut store, first, |_| false).unwrap());
        assert_eq!(store.items::<Colony>().len(), before);

        assert!(delete(&mut store, first, |_| true).unwrap());
        let remaining = store.items::<Colony>();
        assert_eq!(remaining.len(), before - 1);
        // order of the rest is kept
        assert_eq!(remaining[0].id(), second);

        assert!(delete(&mut store, first, |_| true).is_err());
    }
}
