pub mod u101_browse_list;
pub mod u102_record_details;
pub mod u103_edit_record;
