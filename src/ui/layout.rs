// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed areas for rendering.
pub struct ComputedLayout {
    /// File browser column
    pub files: Rect,
    /// Visualization canvas
    pub canvas: Rect,
    /// Player panel along the bottom
    pub player: Rect,
}

/// Split the terminal area into browser, canvas, and player panes.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(6)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(24), Constraint::Percentage(76)])
        .split(vertical[0]);

    ComputedLayout {
        files: columns[0],
        canvas: columns[1],
        player: vertical[1],
    }
}
