use chrono::{DateTime, Utc};

use super::{AggregateId, AuditInfo, BaseAggregate, HistoryEntry};

/// Trait for an aggregate root
///
/// Defines the accessors and the static metadata every record of the
/// hierarchy provides.
pub trait AggregateRoot: Clone {
    /// Aggregate id type
    type Id: AggregateId;

    // ============================================================================
    // Instance data
    // ============================================================================

    fn base(&self) -> &BaseAggregate<Self::Id>;

    fn base_mut(&mut self) -> &mut BaseAggregate<Self::Id>;

    /// Build the aggregate around a base with every own field empty
    fn from_base(base: BaseAggregate<Self::Id>) -> Self;

    // ============================================================================
    // Static metadata
    // ============================================================================

    /// Aggregate index (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name (e.g. "country")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Country")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Countries")
    fn list_name() -> &'static str;

    // ============================================================================
    // Provided methods
    // ============================================================================

    fn id(&self) -> Self::Id {
        self.base().id
    }

    fn full_name(&self) -> &str {
        &self.base().full_name
    }

    fn short_name(&self) -> &str {
        &self.base().short_name
    }

    fn is_active(&self) -> bool {
        self.base().is_active
    }

    /// Qualified aggregate name (e.g. "a001_country")
    fn qualified_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// New empty record with a generated id and a seeded audit block ("Add")
    fn new_for_insert(operator: &str, now: DateTime<Utc>) -> Self
    where
        Self: Sized,
    {
        let base = BaseAggregate::new(
            Self::Id::generate(),
            "",
            "",
            AuditInfo::seeded(operator, now),
        );
        Self::from_base(base)
    }

    /// Hook before the record is written back to its collection.
    ///
    /// Only runs when audit stamping is enabled: updates the audit block and
    /// appends a "Created" or "Updated" history entry.
    fn stamp_write(&mut self, operator: &str, now: DateTime<Utc>, is_new: bool) {
        let base = self.base_mut();
        base.audit.touch(operator, now);
        let action = if is_new { "Created" } else { "Updated" };
        let entry = HistoryEntry::new(
            base.history.next_id(),
            action,
            operator,
            &now.format("%Y-%m-%d %H:%M").to_string(),
        );
        base.history.append(entry);
    }
}
