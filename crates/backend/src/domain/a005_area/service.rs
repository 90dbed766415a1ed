use contracts::domain::a005_area::aggregate::{Area, AreaId};
use contracts::domain::common::{AggregateId, AggregateRoot};

use crate::shared::data::{GeoStore, Repository};

/// Hard delete of an area from the list page.
///
/// `confirm` sees the record first; declining leaves the store untouched and
/// returns `Ok(false)`. Colonies pointing at the area keep their keys.
pub fn delete(
    store: &mut GeoStore,
    id: AreaId,
    confirm: impl FnOnce(&Area) -> bool,
) -> anyhow::Result<bool> {
    let area: Area = store
        .get_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("Area {} not found", id.as_string()))?;

    if !confirm(&area) {
        tracing::info!("Delete of area {} cancelled", area.short_name());
        return Ok(false);
    }

    Ok(Repository::<Area>::delete(store, id))
}
