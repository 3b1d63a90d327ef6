pub mod keyboard_diagram;
pub mod results;
pub mod stats_sidebar;
pub mod typing_area;
