pub mod common;

pub mod a001_country;
pub mod a002_state;
pub mod a003_city;
pub mod a004_district;
pub mod a005_area;
pub mod a006_colony;
