//! In-memory backend of the geographic reference console.
//!
//! Holds the entity collections behind a repository seam, seeds them from
//! static sample data and runs the list, detail and edit flows on top of the
//! model in `contracts`.

pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
