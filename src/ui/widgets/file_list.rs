// src/ui/widgets/file_list.rs
//! File browser list widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::fs::Entry;

fn icon_for_entry(entry: &Entry) -> &'static str {
    if entry.is_dir {
        "\u{f07b}" // folder
    } else if entry.is_audio {
        "\u{f1c7}" // audio file
    } else {
        "\u{f15b}" // plain file
    }
}

/// Render the file browser list.
pub fn render_file_list(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    entries: &[Entry],
    state: &mut ListState,
) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(format!("{} {}", icon_for_entry(entry), entry.name)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}
