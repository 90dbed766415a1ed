pub mod list_view;

pub use list_view::ListView;
