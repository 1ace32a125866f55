// src/ui/widgets/canvas.rs
//! Visualization canvas widget: shows the rendered surface in the
//! terminal through ratatui-image.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders},
};
use ratatui_image::{Image, Resize, picker::Picker};

use crate::render::{FrameTimer, Visualizer};

/// Render the visualizer surface, scaled to fit the pane.
pub fn render_canvas<T: FrameTimer>(
    f: &mut Frame<'_>,
    area: Rect,
    picker: &mut Picker,
    visualizer: &Visualizer<T>,
) {
    let title = format!(
        "2: Visualizer [{}] sens {:.1}",
        visualizer.mode().label(),
        visualizer.sensitivity()
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let frame = visualizer.surface().to_dynamic();
    if let Ok(proto) = picker.new_protocol(frame, inner, Resize::Fit(None)) {
        f.render_widget(Image::new(&proto), inner);
    }
}
