// src/ui/widgets/player_panel.rs
//! Player information panel widget.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::audio::TrackMetadata;

/// Render the player panel: track line, transport icons, progress.
#[allow(clippy::too_many_arguments)]
pub fn render_player_panel(
    f: &mut Frame<'_>,
    area: Rect,
    metadata: Option<&TrackMetadata>,
    elapsed: u64,
    duration: u64,
    is_playing: bool,
    is_paused: bool,
    status: Option<&str>,
) {
    f.render_widget(Block::default().borders(Borders::ALL).title("3: Player"), area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Track line, or the most recent error
    let track_line = if let Some(status) = status {
        Line::from(Span::styled(status, Style::default().fg(Color::Red)))
    } else if let Some(meta) = metadata {
        let title = meta.title.as_deref().unwrap_or("Unknown title");
        let artist = meta.artist.as_deref().unwrap_or("Unknown artist");
        Line::from(vec![
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" — {artist}"), Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::raw("No track playing"))
    };
    f.render_widget(Paragraph::new(track_line), inner[0]);

    // Playback state icon
    let state_icon = if !is_playing {
        Span::styled(" ⏹ ", Style::default().fg(Color::Gray))
    } else if is_paused {
        Span::styled(" ⏵ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ⏸ ", Style::default().fg(Color::Green))
    };
    let controls = Line::from(vec![
        state_icon,
        Span::styled(
            "  [space] pause  [s] stop  [1-6/v] mode  [+/-] sensitivity  [q] quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(controls).alignment(Alignment::Left), inner[1]);

    // Progress gauge with time display
    let ratio = (elapsed as f64 / duration.max(1) as f64).clamp(0.0, 1.0);
    let time_label = format!(
        "{:02}:{:02} / {:02}:{:02}",
        elapsed / 60,
        elapsed % 60,
        duration / 60,
        duration % 60
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(ratio)
            .label(time_label),
        inner[2],
    );
}
