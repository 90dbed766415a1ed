pub mod a005_area;
pub mod a006_colony;
