pub mod cascade;
pub mod hierarchy;
pub mod link;
pub mod list_query;
pub mod metadata;
