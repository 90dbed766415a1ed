pub mod details;

pub use details::{load, AncestorLink, RecordDetails};
