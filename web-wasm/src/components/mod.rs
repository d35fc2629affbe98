pub mod detail_drawer;
pub mod header;
pub mod result_pane;
pub mod search_box;
