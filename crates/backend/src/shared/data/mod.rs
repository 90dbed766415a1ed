//! Entity collections and the repository seam in front of them

pub mod collections;
pub mod repository;
pub mod seed;
pub mod store;

pub use collections::{GeoCollections, RecordRef, Stored};
pub use repository::{Repository, StoreError};
pub use seed::{SeedProvider, StaticSeed};
pub use store::{ChangeSet, GeoStore};
