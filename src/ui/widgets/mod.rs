// src/ui/widgets/mod.rs
//! Custom widgets for the soniq UI.

pub mod canvas;
pub mod file_list;
pub mod player_panel;

// Re-export widget rendering functions
pub use canvas::render_canvas;
pub use file_list::render_file_list;
pub use player_panel::render_player_panel;
