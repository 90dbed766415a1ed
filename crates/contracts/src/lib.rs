//! Shared model of the geographic reference console.
//!
//! `domain` holds the six aggregates of the hierarchy
//! (Country < State < City < District < Area < Colony) and their common parts.
//! `shared` holds the logic every edit and list page runs on top of them:
//! hierarchy lookup, cascading options, link/unlink, validation and list processing.

pub mod domain;
pub mod shared;
