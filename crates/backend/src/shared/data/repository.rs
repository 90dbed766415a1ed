use contracts::domain::common::AggregateRoot;

/// Errors of the store seam
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} already exists")]
    DuplicateId { entity: &'static str, id: String },

    #[error("{entity} short name '{short_name}' is shared by {count} records")]
    AmbiguousShortName {
        entity: &'static str,
        short_name: String,
        count: usize,
    },
}

/// Load/save access to one entity collection
///
/// The edit and list flows only talk to this trait; a persistent store would
/// implement it as well.
pub trait Repository<T: AggregateRoot> {
    /// Every record, in insertion order
    fn list_all(&self) -> Vec<T>;

    fn get_by_id(&self, id: T::Id) -> Option<T>;

    /// Resolve a `shortName` reference. More than one match is an error,
    /// since references could not tell the records apart.
    fn find_by_short_name(&self, short_name: &str) -> Result<Option<T>, StoreError>;

    fn insert(&mut self, record: T) -> Result<T::Id, StoreError>;

    /// Replace the record with the same id, keeping its position
    fn update(&mut self, record: T) -> Result<(), StoreError>;

    /// Hard delete; returns `false` when the id is unknown
    fn delete(&mut self, id: T::Id) -> bool;
}
