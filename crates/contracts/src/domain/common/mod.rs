//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod aggregate_root;
pub mod audit_info;
pub mod base_aggregate;
pub mod history;

// Re-exports
pub use aggregate_id::AggregateId;
pub use aggregate_root::AggregateRoot;
pub use audit_info::AuditInfo;
pub use base_aggregate::{BaseAggregate, FULL_NAME_FIELD, IS_ACTIVE_FIELD, SHORT_NAME_FIELD};
pub use history::{AuditHistory, HistoryEntry, HistoryFilter};
