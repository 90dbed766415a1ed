use contracts::domain::common::{AggregateId, HistoryEntry, HistoryFilter};
use contracts::shared::hierarchy::Level;

use crate::shared::data::{GeoStore, RecordRef, Repository, Stored};

/// One step of a record's ancestor chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorLink {
    pub level: Level,
    /// Key as stored on the record
    pub short_name: String,
    /// `None` when no record of that level carries the key
    pub record: Option<RecordRef>,
}

/// Detail page of a record
#[derive(Debug, Clone)]
pub struct RecordDetails<T> {
    pub record: T,
    /// Set ancestor keys, nearest first
    pub ancestors: Vec<AncestorLink>,
    /// Records of the next level down pointing at this one
    pub children: Vec<RecordRef>,
    /// History entries matching the filter, newest first
    pub history: Vec<HistoryEntry>,
}

pub fn load<T: Stored>(
    store: &GeoStore,
    id: T::Id,
    filter: &HistoryFilter,
) -> anyhow::Result<RecordDetails<T>> {
    let record: T = store.get_by_id(id).ok_or_else(|| {
        anyhow::anyhow!("{} {} not found", T::element_name(), id.as_string())
    })?;

    let mut ancestors = Vec::new();
    for level in T::LEVEL.ancestors() {
        let Some(short_name) = record.chosen(*level) else {
            continue;
        };
        let resolved = store.resolve(*level, short_name)?;
        if resolved.is_none() {
            tracing::warn!(
                "{} {} points at unknown {} '{}'",
                T::element_name(),
                record.short_name(),
                level,
                short_name
            );
        }
        ancestors.push(AncestorLink {
            level: *level,
            short_name: short_name.to_string(),
            record: resolved,
        });
    }

    let children = match T::LEVEL.child() {
        Some(child) => store
            .collections()
            .children_of(T::LEVEL, child, record.short_name()),
        None => Vec::new(),
    };

    let history = record
        .base()
        .history
        .filter(filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(RecordDetails {
        record,
        ancestors,
        children,
        history,
    })
}
