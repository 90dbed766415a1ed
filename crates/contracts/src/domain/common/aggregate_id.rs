use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for aggregate identifier types
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Render the id as a string
    fn as_string(&self) -> String;

    /// Parse an id from a string
    fn from_string(s: &str) -> Result<Self, String>;

    /// Generate a fresh id for a record created via "Add"
    fn generate() -> Self;
}
