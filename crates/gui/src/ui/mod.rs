pub mod shape_list;
pub mod status_bar;
pub mod toolbar;
