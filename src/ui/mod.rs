pub mod map_panel;
pub mod panels;
pub mod plot;
pub mod table;
