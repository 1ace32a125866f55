// src/ui/tui.rs
//! Terminal setup and the main event loop.
//!
//! The loop runs at the display refresh rate (~30 Hz); each iteration
//! is one "frame callback" for the visualizer's scheduler.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;

/// Display refresh interval driving the render loop.
const REFRESH: Duration = Duration::from_millis(33);

pub fn run() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal);

    // Restore the terminal even when the loop errored
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut app = App::new()?;
    let mut last_second = Instant::now();

    loop {
        app.advance();
        terminal.draw(|f| app.draw(f))?;

        if event::poll(REFRESH)? {
            if let CEvent::Key(key) = event::read()? {
                if app.on_key(key) {
                    return Ok(());
                }
            }
        }

        if last_second.elapsed() >= Duration::from_secs(1) {
            last_second = Instant::now();
            app.tick_elapsed();
        }
    }
}
